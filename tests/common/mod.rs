#![allow(dead_code)]

use std::{
    collections::VecDeque,
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{json, Value};

use quiz_generator_server::{
    app_state::AppState,
    config::{Config, RunMode},
    errors::{AppError, AppResult},
    services::{
        crew_config::CrewConfig,
        model_service::{CompletionRequest, LanguageModel},
        pdf_service::TextExtractor,
        quiz_pipeline_service::QuizPipeline,
    },
};

pub const STUDY_TEXT: &str = "A binary search tree keeps smaller keys in the left subtree.\n\
Larger keys go to the right subtree.\n";

/// Replays canned replies in call order and records every request.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: impl IntoIterator<Item = String>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::ModelError("no scripted reply left".to_string()))
    }
}

/// Returns the same text for any PDF bytes.
pub struct FixedTextExtractor(pub String);

impl TextExtractor for FixedTextExtractor {
    fn extract_text(&self, _bytes: &[u8]) -> String {
        self.0.clone()
    }
}

pub fn mcq_json(topic: &str) -> Value {
    let quiz: Vec<Value> = (1..=5)
        .map(|n| {
            json!({
                "question": format!("{} question {}?", topic, n),
                "options": [format!("Answer {}", n), "Distractor A", "Distractor B", "Distractor C"],
                "correct_index": 0
            })
        })
        .collect();
    json!({ "quiz": quiz, "topic": topic })
}

pub fn true_false_json() -> Value {
    let quiz: Vec<Value> = (1..=5)
        .map(|n| {
            json!({
                "question": format!("Statement {} holds.", n),
                "options": ["True", "False"],
                "correct_index": n % 2
            })
        })
        .collect();
    json!({ "quiz": quiz })
}

pub fn analysis_json(entries: usize) -> Value {
    let quiz: Vec<Value> = (1..=entries)
        .map(|n| {
            json!({
                "Question_Explanation": format!("Question {} checks the ordering rule.", n),
                "Answer_Feedback": "a is correct; the others break the ordering.",
                "Correct_Answer": "a",
                "Related_Topics": "Tree traversal"
            })
        })
        .collect();
    json!({ "quiz": quiz })
}

/// Replies for one successful run: MCQ, true/false, then analysis.
pub fn happy_replies(topic: &str) -> Vec<String> {
    vec![
        mcq_json(topic).to_string(),
        format!("Here is the quiz:\n```json\n{}\n```", true_false_json()),
        analysis_json(10).to_string(),
    ]
}

pub fn test_config(output_dir: &Path, run_mode: RunMode) -> Config {
    let mut config = Config::test_config();
    config.output_path = output_dir.to_path_buf();
    config.run_mode = run_mode;
    config
}

pub fn pipeline(config: &Config, llm: Arc<ScriptedModel>) -> QuizPipeline {
    let crew_config = CrewConfig::load(&config.crew_config_dir).unwrap();
    QuizPipeline::new(
        config,
        crew_config,
        llm,
        Arc::new(FixedTextExtractor(STUDY_TEXT.to_string())),
    )
}

pub fn app_state(config: Config, llm: Arc<ScriptedModel>) -> AppState {
    let crew_config = CrewConfig::load(&config.crew_config_dir).unwrap();
    AppState::with_components(
        config,
        crew_config,
        llm,
        Arc::new(FixedTextExtractor(STUDY_TEXT.to_string())),
    )
}
