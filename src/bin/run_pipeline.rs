//! Runs the quiz pipeline once on a PDF and prints the three JSON documents.
//!
//! Usage: `run_pipeline [PDF_PATH]`. Without an argument `DATA_PATH` is used.

use std::{path::PathBuf, sync::Arc};

use quiz_generator_server::{
    config::Config,
    errors::{AppError, AppResult},
    services::{
        crew_config::CrewConfig,
        model_service::ChatCompletionModel,
        pdf_service::{extract_text_from_path, PdfTextExtractor},
        quiz_pipeline_service::QuizPipeline,
    },
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let config = Config::from_env()?;
    config.warn_on_missing_secrets();

    let pdf_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_path.clone());
    log::info!("Generating quiz from {}", pdf_path.display());

    let crew_config = CrewConfig::load(&config.crew_config_dir)?;
    let llm = Arc::new(ChatCompletionModel::new(&config));
    let pipeline = QuizPipeline::new(&config, crew_config, llm, Arc::new(PdfTextExtractor));

    let text = tokio::task::spawn_blocking(move || extract_text_from_path(pdf_path))
        .await
        .map_err(|e| AppError::InternalError(format!("PDF extraction task failed: {}", e)))?;
    let results = pipeline.run_text(text).await?;

    println!("MCQ Output:\n{}\n", results.mcq_json);
    println!("True/False Output:\n{}\n", results.true_false_json);
    println!("Quiz Analysis Output:\n{}", results.analysis_json);
    Ok(())
}
