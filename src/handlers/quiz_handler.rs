use actix_multipart::Multipart;
use actix_web::{
    get,
    http::header::{ContentDisposition, ContentType},
    post, web, HttpRequest, HttpResponse, ResponseError,
};
use futures::StreamExt;
use maud::Markup;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::get_request_id,
    models::dto::LatestRun,
    views::quiz::{
        index_page, notice, quiz_text, results_section, NoticeKind, PARSE_ERROR_MESSAGE,
        UPLOAD_PROMPT,
    },
};

const UPLOAD_FIELD: &str = "file";
const PDF_MIME: &str = "application/pdf";

#[get("/")]
async fn index(state: web::Data<AppState>) -> Markup {
    let content = match state.latest_run().await {
        Some(run) => results_section(&run),
        None => notice(NoticeKind::Info, UPLOAD_PROMPT),
    };
    index_page(content)
}

#[post("/upload")]
async fn upload_pdf(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> HttpResponse {
    let request_id = get_request_id(&req).unwrap_or_default();

    match process_upload(&state, payload).await {
        Ok(run) => {
            log::info!("[{}] Generated quiz from {}", request_id, run.file_name);
            let page = index_page(results_section(&run));
            state.store_run(run).await;
            HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(page.into_string())
        }
        Err(e) => {
            log::error!("[{}] Upload failed: {}", request_id, e);
            let page = index_page(notice(NoticeKind::Error, &e.to_string()));
            HttpResponse::build(e.status_code())
                .content_type(ContentType::html())
                .body(page.into_string())
        }
    }
}

async fn process_upload(state: &AppState, payload: Multipart) -> AppResult<LatestRun> {
    let (file_name, bytes) = read_pdf_field(payload, state.config.max_upload_bytes).await?;
    log::info!("Received {} ({} bytes)", file_name, bytes.len());

    let results = state.pipeline.run_pdf(bytes).await?;
    Ok(LatestRun {
        file_name,
        uploaded_at: chrono::Utc::now(),
        results,
    })
}

/// Reads the `file` field, rejecting non-PDF and oversized uploads.
async fn read_pdf_field(mut payload: Multipart, limit: usize) -> AppResult<(String, Vec<u8>)> {
    while let Some(field) = payload.next().await {
        let mut field = field?;

        let disposition = field.content_disposition();
        if disposition.and_then(|cd| cd.get_name()) != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = disposition
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        let content_type = field.content_type().map(|mime| mime.essence_str().to_string());

        if !is_pdf_upload(&file_name, content_type.as_deref()) {
            return Err(AppError::BadRequest(format!(
                "Only PDF files are accepted, got '{}'",
                file_name
            )));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if bytes.len() + chunk.len() > limit {
                return Err(AppError::BadRequest(format!(
                    "Upload exceeds the {} byte limit",
                    limit
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        return Ok((file_name, bytes));
    }

    Err(AppError::BadRequest(format!(
        "Missing '{}' field in upload",
        UPLOAD_FIELD
    )))
}

fn is_pdf_upload(file_name: &str, content_type: Option<&str>) -> bool {
    let has_pdf_extension = file_name.to_ascii_lowercase().ends_with(".pdf");
    has_pdf_extension || content_type == Some(PDF_MIME)
}

#[get("/quiz.txt")]
async fn download_quiz(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let run = state
        .latest_run()
        .await
        .ok_or_else(|| AppError::NotFound("No quiz has been generated yet".to_string()))?;
    let quiz = run.results.parse().map_err(|e| {
        log::warn!("Cannot render quiz download: {}", e);
        AppError::SchemaError(PARSE_ERROR_MESSAGE.to_string())
    })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header(ContentDisposition::attachment("quiz.txt"))
        .body(quiz_text(&quiz.mcq, &quiz.true_false)))
}

#[get("/api/results")]
async fn latest_results(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let run = state
        .latest_run()
        .await
        .ok_or_else(|| AppError::NotFound("No quiz has been generated yet".to_string()))?;
    Ok(HttpResponse::Ok().json(run))
}

#[get("/health")]
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": state.config.run_mode.to_string(),
    }))
}
