use std::{env, fmt, path::PathBuf, str::FromStr};

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Where the pipeline driver reads finished task results from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Structured results straight from the completed crew run.
    Server,
    /// Re-read the JSON files the crew wrote to the output directory.
    Local,
}

impl FromStr for RunMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(RunMode::Server),
            "local" => Ok(RunMode::Local),
            other => Err(AppError::ConfigError(format!(
                "RUNNING must be 'server' or 'local', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Server => write!(f, "server"),
            RunMode::Local => write!(f, "local"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub model: String,
    pub temperature: f32,
    pub api_key: SecretString,
    pub llm_base_url: String,
    pub run_mode: RunMode,
    pub output_path: PathBuf,
    pub crew_config_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub data_path: PathBuf,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let run_mode = env::var("RUNNING")
            .unwrap_or_else(|_| "server".to_string())
            .parse()?;

        Ok(Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            model: env::var("MODEL").unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            temperature: env::var("TEMPERATURE")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(0.2),
            api_key: SecretString::from(env::var("GROQ_API_KEY").unwrap_or_default()),
            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            run_mode,
            output_path: env::var("OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output")),
            crew_config_dir: env::var("CREW_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("config")),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            data_path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/sample.pdf")),
        })
    }

    /// Logs a warning for settings that will make every model call fail.
    pub fn warn_on_missing_secrets(&self) {
        use secrecy::ExposeSecret;

        if self.api_key.expose_secret().is_empty() {
            log::warn!("GROQ_API_KEY is not set; language model requests will be rejected");
        }
    }

    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            model: "test-model".to_string(),
            temperature: 0.0,
            api_key: SecretString::from("test_api_key".to_string()),
            llm_base_url: "http://localhost:11434/v1".to_string(),
            run_mode: RunMode::Server,
            output_path: PathBuf::from("output-test"),
            crew_config_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            data_path: PathBuf::from("data/sample.pdf"),
        }
    }
}
