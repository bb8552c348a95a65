use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};

pub const AGENTS_FILE: &str = "agents.yaml";
pub const TASKS_FILE: &str = "tasks.yaml";

/// Persona of one agent, as written in `agents.yaml`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AgentConfig {
    #[validate(length(min = 1))]
    pub role: String,
    #[validate(length(min = 1))]
    pub goal: String,
    #[validate(length(min = 1))]
    pub backstory: String,
}

/// Prompt templates of one task, as written in `tasks.yaml`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskConfig {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub expected_output: String,
}

#[derive(Debug, Clone)]
pub struct CrewConfig {
    agents: HashMap<String, AgentConfig>,
    tasks: HashMap<String, TaskConfig>,
}

impl CrewConfig {
    /// Loads `agents.yaml` and `tasks.yaml` from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref();

        let agents = fs::read_to_string(dir.join(AGENTS_FILE))
            .map_err(|e| AppError::ConfigError(format!("Failed to load {}: {}", AGENTS_FILE, e)))?;
        let tasks = fs::read_to_string(dir.join(TASKS_FILE))
            .map_err(|e| AppError::ConfigError(format!("Failed to load {}: {}", TASKS_FILE, e)))?;

        let config = Self::from_yaml(&agents, &tasks)?;
        log::info!(
            "Loaded {} agents and {} tasks from {}",
            config.agents.len(),
            config.tasks.len(),
            dir.display()
        );
        Ok(config)
    }

    pub fn from_yaml(agents_yaml: &str, tasks_yaml: &str) -> AppResult<Self> {
        let agents: HashMap<String, AgentConfig> = serde_yaml::from_str(agents_yaml)
            .map_err(|e| AppError::ConfigError(format!("Failed to load {}: {}", AGENTS_FILE, e)))?;
        let tasks: HashMap<String, TaskConfig> = serde_yaml::from_str(tasks_yaml)
            .map_err(|e| AppError::ConfigError(format!("Failed to load {}: {}", TASKS_FILE, e)))?;

        for (key, agent) in &agents {
            agent
                .validate()
                .map_err(|e| AppError::ConfigError(format!("Agent '{}' is invalid: {}", key, e)))?;
        }
        for (key, task) in &tasks {
            task.validate()
                .map_err(|e| AppError::ConfigError(format!("Task '{}' is invalid: {}", key, e)))?;
        }

        Ok(Self { agents, tasks })
    }

    pub fn agent(&self, key: &str) -> AppResult<&AgentConfig> {
        self.agents
            .get(key)
            .ok_or_else(|| AppError::ConfigError(format!("Agent '{}' missing from {}", key, AGENTS_FILE)))
    }

    pub fn task(&self, key: &str) -> AppResult<&TaskConfig> {
        self.tasks
            .get(key)
            .ok_or_else(|| AppError::ConfigError(format!("Task '{}' missing from {}", key, TASKS_FILE)))
    }
}
