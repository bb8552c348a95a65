use std::{collections::HashMap, fmt, path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use schemars::schema_for;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    constants::prompts::AGENT_SYSTEM_PROMPT,
    errors::{AppError, AppResult},
    models::domain::{MCQQuiz, QuizAnalysisOutput, TrueFalseQuiz},
    services::{
        crew_config::AgentConfig,
        model_service::LanguageModel,
        step_executor::{interpolate, StepHandler},
    },
};

/// Lifecycle of one crew run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A role-scoped persona bound to a language model
#[derive(Clone)]
pub struct Agent {
    pub key: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    llm: Arc<dyn LanguageModel>,
}

impl Agent {
    pub fn new(key: impl Into<String>, config: &AgentConfig, llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            key: key.into(),
            role: config.role.trim().to_string(),
            goal: config.goal.trim().to_string(),
            backstory: config.backstory.trim().to_string(),
            llm,
        }
    }

    pub fn system_prompt(&self) -> String {
        interpolate(
            AGENT_SYSTEM_PROMPT,
            [
                ("role", self.role.as_str()),
                ("backstory", self.backstory.as_str()),
                ("goal", self.goal.as_str()),
            ],
        )
    }

    pub fn llm(&self) -> &dyn LanguageModel {
        self.llm.as_ref()
    }
}

/// Shape a task's final answer must conform to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSchema {
    McqQuiz,
    TrueFalseQuiz,
    QuizAnalysis,
}

impl OutputSchema {
    pub fn type_name(&self) -> &'static str {
        match self {
            OutputSchema::McqQuiz => "MCQQuiz",
            OutputSchema::TrueFalseQuiz => "TrueFalseQuiz",
            OutputSchema::QuizAnalysis => "QuizAnalysisOutput",
        }
    }

    /// JSON Schema document embedded in the task prompt
    pub fn json_schema(&self) -> String {
        let schema = match self {
            OutputSchema::McqQuiz => schema_for!(MCQQuiz),
            OutputSchema::TrueFalseQuiz => schema_for!(TrueFalseQuiz),
            OutputSchema::QuizAnalysis => schema_for!(QuizAnalysisOutput),
        };
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }
}

/// A validated task answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StructuredOutput {
    Mcq(MCQQuiz),
    TrueFalse(TrueFalseQuiz),
    Analysis(QuizAnalysisOutput),
}

impl StructuredOutput {
    pub fn question_count(&self) -> usize {
        match self {
            StructuredOutput::Mcq(quiz) => quiz.quiz.len(),
            StructuredOutput::TrueFalse(quiz) => quiz.quiz.len(),
            StructuredOutput::Analysis(analysis) => analysis.quiz.len(),
        }
    }

    pub fn to_json_pretty(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::InternalError(format!("Failed to serialize task output: {}", e)))
    }
}

/// One schema-validated generation step
#[derive(Debug, Clone)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub agent_index: usize,
    pub context: Vec<usize>,
    pub output_file: Option<PathBuf>,
    pub output_schema: Option<OutputSchema>,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            expected_output: String::new(),
            agent_index: 0,
            context: Vec::new(),
            output_file: None,
            output_schema: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = expected_output.into();
        self
    }

    pub fn with_agent(mut self, agent_index: usize) -> Self {
        self.agent_index = agent_index;
        self
    }

    /// Indices of earlier tasks whose output this task reads
    pub fn with_context(mut self, context: Vec<usize>) -> Self {
        self.context = context;
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    pub fn with_output_schema(mut self, schema: OutputSchema) -> Self {
        self.output_schema = Some(schema);
        self
    }
}

#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub name: String,
    pub agent_role: String,
    pub raw: String,
    pub structured: Option<StructuredOutput>,
}

#[derive(Debug, Clone)]
pub struct CrewRun {
    pub run_id: String,
    pub status: JobStatus,
    pub current_task_index: usize,
    pub error_message: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CrewRun {
    fn new() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            status: JobStatus::Pending,
            current_task_index: 0,
            error_message: None,
            started_at: None,
            completed_at: None,
        }
    }

    fn start(&mut self) {
        self.status = JobStatus::Running;
        self.started_at = Some(Utc::now());
        log::info!("Crew run {} is {}", self.run_id, self.status);
    }

    fn complete(&mut self) {
        self.status = JobStatus::Completed;
        self.completed_at = Some(Utc::now());
        log::info!("Crew run {} is {}", self.run_id, self.status);
    }

    fn fail(&mut self, error: &AppError) {
        self.status = JobStatus::Failed;
        self.error_message = Some(error.to_string());
        self.completed_at = Some(Utc::now());
        log::error!(
            "Crew run {} is {} at task {}: {}",
            self.run_id,
            self.status,
            self.current_task_index,
            error
        );
    }
}

#[derive(Debug, Clone)]
pub struct CrewOutput {
    pub run_id: String,
    pub tasks_output: Vec<TaskOutput>,
}

impl CrewOutput {
    pub fn task(&self, name: &str) -> Option<&TaskOutput> {
        self.tasks_output.iter().find(|output| output.name == name)
    }
}

/// Agents and tasks executed strictly in order, one model call at a time
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    run: CrewRun,
}

impl Crew {
    /// Every task must name an existing agent and may only depend on tasks before it.
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>) -> AppResult<Self> {
        for (index, task) in tasks.iter().enumerate() {
            if task.agent_index >= agents.len() {
                return Err(AppError::ConfigError(format!(
                    "Task '{}' refers to agent {} but only {} agents exist",
                    task.name,
                    task.agent_index,
                    agents.len()
                )));
            }
            if let Some(dependency) = task.context.iter().find(|&&dep| dep >= index) {
                return Err(AppError::ConfigError(format!(
                    "Task '{}' depends on task {} which does not run before it",
                    task.name, dependency
                )));
            }
        }

        log::info!(
            "Crew initialized with {} agents and {} tasks",
            agents.len(),
            tasks.len()
        );
        Ok(Self {
            agents,
            tasks,
            run: CrewRun::new(),
        })
    }

    pub fn run(&self) -> &CrewRun {
        &self.run
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub async fn kickoff(&mut self, inputs: &HashMap<String, String>) -> AppResult<CrewOutput> {
        if self.run.status != JobStatus::Pending {
            return Err(AppError::PipelineError(format!(
                "Crew run {} is already {}",
                self.run.run_id, self.run.status
            )));
        }
        self.run.start();

        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());
        for (index, task) in self.tasks.iter().enumerate() {
            self.run.current_task_index = index;
            let agent = &self.agents[task.agent_index];

            let result = {
                let context: Vec<&TaskOutput> =
                    task.context.iter().map(|&dep| &outputs[dep]).collect();
                StepHandler::execute(task, agent, &context, inputs).await
            };

            match result {
                Ok(output) => outputs.push(output),
                Err(e) => {
                    self.run.fail(&e);
                    return Err(AppError::PipelineError(format!(
                        "Failed to kickoff crew: task '{}' failed: {}",
                        task.name, e
                    )));
                }
            }
        }

        self.run.current_task_index = self.tasks.len();
        self.run.complete();

        Ok(CrewOutput {
            run_id: self.run.run_id.clone(),
            tasks_output: outputs,
        })
    }
}
