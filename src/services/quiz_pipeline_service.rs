use std::{collections::HashMap, path::PathBuf, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    config::{Config, RunMode},
    errors::{AppError, AppResult},
    models::dto::QuizResults,
    services::{
        agent_orchestrator_service::CrewOutput,
        crew_config::CrewConfig,
        model_service::LanguageModel,
        orchestrator_steps::quiz_steps::{
            build_quiz_crew, ANALYSIS_TASK_NAME, MCQ_TASK_NAME, TRUE_FALSE_TASK_NAME,
        },
        output_store::read_quiz_outputs,
        pdf_service::{is_extraction_error, TextExtractor},
    },
};

/// PDF in, three quiz documents out.
pub struct QuizPipeline {
    run_mode: RunMode,
    output_dir: PathBuf,
    crew_config: CrewConfig,
    llm: Arc<dyn LanguageModel>,
    extractor: Arc<dyn TextExtractor>,
    // held for a whole run: every run recreates the shared output directory
    run_lock: Mutex<()>,
}

impl QuizPipeline {
    pub fn new(
        config: &Config,
        crew_config: CrewConfig,
        llm: Arc<dyn LanguageModel>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            run_mode: config.run_mode,
            output_dir: config.output_path.clone(),
            crew_config,
            llm,
            extractor,
            run_lock: Mutex::new(()),
        }
    }

    pub async fn run_pdf(&self, pdf: Vec<u8>) -> AppResult<QuizResults> {
        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract_text(&pdf))
            .await
            .map_err(|e| AppError::InternalError(format!("PDF extraction task failed: {}", e)))?;

        self.run_text(text).await
    }

    /// Runs the crew on already extracted text, which may be an extraction sentinel.
    pub async fn run_text(&self, text: String) -> AppResult<QuizResults> {
        if is_extraction_error(&text) {
            log::error!("Pipeline failed: {}", text);
            return Err(AppError::ExtractionError(text));
        }
        if text.trim().is_empty() {
            return Err(AppError::ExtractionError(
                "the PDF contains no extractable text".to_string(),
            ));
        }
        log::info!(
            "PDF content extracted successfully ({} characters)",
            text.chars().count()
        );

        let _guard = self.run_lock.lock().await;

        let mut crew = build_quiz_crew(&self.crew_config, Arc::clone(&self.llm), &self.output_dir)
            .await
            .map_err(|e| {
                log::error!("Failed to initialize quiz crew: {}", e);
                e
            })?;
        let inputs = HashMap::from([("text".to_string(), text)]);
        let output = crew.kickoff(&inputs).await.map_err(|e| {
            log::error!("Pipeline failed: {}", e);
            e
        })?;

        log::info!("Collecting quiz results in {} mode", self.run_mode);
        match self.run_mode {
            RunMode::Server => collect_task_results(&output),
            RunMode::Local => read_quiz_outputs(&self.output_dir).await,
        }
    }
}

/// Maps crew task outputs to result slots by task name.
pub fn collect_task_results(output: &CrewOutput) -> AppResult<QuizResults> {
    let mut mcq_json = None;
    let mut true_false_json = None;
    let mut analysis_json = None;

    for task in &output.tasks_output {
        let slot = match task.name.as_str() {
            MCQ_TASK_NAME => &mut mcq_json,
            TRUE_FALSE_TASK_NAME => &mut true_false_json,
            ANALYSIS_TASK_NAME => &mut analysis_json,
            other => {
                return Err(AppError::ConfigError(format!(
                    "Unknown task name {}",
                    other
                )))
            }
        };
        *slot = Some(task.raw.clone());
    }

    let missing = |name: &str| AppError::PipelineError(format!("Task '{}' produced no output", name));
    Ok(QuizResults {
        mcq_json: mcq_json.ok_or_else(|| missing(MCQ_TASK_NAME))?,
        true_false_json: true_false_json.ok_or_else(|| missing(TRUE_FALSE_TASK_NAME))?,
        analysis_json: analysis_json.ok_or_else(|| missing(ANALYSIS_TASK_NAME))?,
    })
}
