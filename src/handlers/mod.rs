pub mod quiz_handler;

use actix_web::web;

pub use quiz_handler::{download_quiz, health_check, index, latest_results, upload_pdf};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(upload_pdf)
        .service(download_quiz)
        .service(latest_results)
        .service(health_check);
}
