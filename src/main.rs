use actix_web::{middleware::Logger, web, App, HttpServer};

use quiz_generator_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    config.warn_on_missing_secrets();

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    log::info!(
        "Starting quiz generator on http://{}:{} ({} mode, model {})",
        bind_address.0,
        bind_address.1,
        config.run_mode,
        config.model
    );

    let state = AppState::new(config).map_err(std::io::Error::other)?;

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
