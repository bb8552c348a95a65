use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::Config,
    errors::AppResult,
    models::dto::LatestRun,
    services::{
        crew_config::CrewConfig,
        model_service::{ChatCompletionModel, LanguageModel},
        pdf_service::{PdfTextExtractor, TextExtractor},
        quiz_pipeline_service::QuizPipeline,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QuizPipeline>,
    pub latest_run: Arc<RwLock<Option<LatestRun>>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let crew_config = CrewConfig::load(&config.crew_config_dir)?;
        let llm = Arc::new(ChatCompletionModel::new(&config));

        Ok(Self::with_components(
            config,
            crew_config,
            llm,
            Arc::new(PdfTextExtractor),
        ))
    }

    pub fn with_components(
        config: Config,
        crew_config: CrewConfig,
        llm: Arc<dyn LanguageModel>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        let pipeline = Arc::new(QuizPipeline::new(&config, crew_config, llm, extractor));

        Self {
            pipeline,
            latest_run: Arc::new(RwLock::new(None)),
            config: Arc::new(config),
        }
    }

    pub async fn latest_run(&self) -> Option<LatestRun> {
        self.latest_run.read().await.clone()
    }

    pub async fn store_run(&self, run: LatestRun) {
        *self.latest_run.write().await = Some(run);
    }
}
