use std::{path::Path, sync::Arc};

use crate::{
    errors::AppResult,
    services::{
        agent_orchestrator_service::{Agent, Crew, OutputSchema, Task},
        crew_config::CrewConfig,
        model_service::LanguageModel,
        output_store::prepare_output_dir,
    },
};

pub const MCQ_TASK_NAME: &str = "MCQ Quiz Generate";
pub const TRUE_FALSE_TASK_NAME: &str = "True False Quiz Generate";
pub const ANALYSIS_TASK_NAME: &str = "Quiz Questions Analysis";

pub const MCQ_OUTPUT_FILE: &str = "mcq_quiz.json";
pub const TRUE_FALSE_OUTPUT_FILE: &str = "tf_quiz.json";
pub const ANALYSIS_OUTPUT_FILE: &str = "quiz_analysis.json";

const QUIZ_GENERATOR_AGENT: &str = "quiz_generator";
const QUIZ_ANALYZER_AGENT: &str = "quiz_analyzer";
const TRUE_FALSE_AGENT: &str = "tf_question_agent";

const MCQ_TASK: &str = "quiz_generate";
const TRUE_FALSE_TASK: &str = "tf_question_task";
const ANALYSIS_TASK: &str = "quiz_analysis";

// Positions in the agent list built by create_quiz_agents
const GENERATOR_INDEX: usize = 0;
const ANALYZER_INDEX: usize = 1;
const TRUE_FALSE_INDEX: usize = 2;

/// Clears `output_dir` and assembles the MCQ, true/false and analysis crew.
pub async fn build_quiz_crew(
    crew_config: &CrewConfig,
    llm: Arc<dyn LanguageModel>,
    output_dir: &Path,
) -> AppResult<Crew> {
    prepare_output_dir(output_dir).await?;

    let agents = create_quiz_agents(crew_config, llm)?;
    let tasks = create_quiz_generation_tasks(crew_config, output_dir)?;
    Crew::new(agents, tasks)
}

pub fn create_quiz_agents(
    crew_config: &CrewConfig,
    llm: Arc<dyn LanguageModel>,
) -> AppResult<Vec<Agent>> {
    Ok(vec![
        Agent::new(
            QUIZ_GENERATOR_AGENT,
            crew_config.agent(QUIZ_GENERATOR_AGENT)?,
            Arc::clone(&llm),
        ),
        Agent::new(
            QUIZ_ANALYZER_AGENT,
            crew_config.agent(QUIZ_ANALYZER_AGENT)?,
            Arc::clone(&llm),
        ),
        Agent::new(TRUE_FALSE_AGENT, crew_config.agent(TRUE_FALSE_AGENT)?, llm),
    ])
}

pub fn create_quiz_generation_tasks(
    crew_config: &CrewConfig,
    output_dir: &Path,
) -> AppResult<Vec<Task>> {
    let mcq = crew_config.task(MCQ_TASK)?;
    let true_false = crew_config.task(TRUE_FALSE_TASK)?;
    let analysis = crew_config.task(ANALYSIS_TASK)?;

    Ok(vec![
        Task::new(mcq.name.trim())
            .with_description(&mcq.description)
            .with_expected_output(&mcq.expected_output)
            .with_agent(GENERATOR_INDEX)
            .with_output_file(output_dir.join(MCQ_OUTPUT_FILE))
            .with_output_schema(OutputSchema::McqQuiz),
        Task::new(true_false.name.trim())
            .with_description(&true_false.description)
            .with_expected_output(&true_false.expected_output)
            .with_agent(TRUE_FALSE_INDEX)
            .with_output_file(output_dir.join(TRUE_FALSE_OUTPUT_FILE))
            .with_output_schema(OutputSchema::TrueFalseQuiz),
        Task::new(analysis.name.trim())
            .with_description(&analysis.description)
            .with_expected_output(&analysis.expected_output)
            .with_agent(ANALYZER_INDEX)
            .with_context(vec![0, 1])
            .with_output_file(output_dir.join(ANALYSIS_OUTPUT_FILE))
            .with_output_schema(OutputSchema::QuizAnalysis),
    ])
}
