use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{MCQQuiz, QuizAnalysisOutput, TrueFalseQuiz};

/// Raw JSON documents produced by one pipeline run, in task order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResults {
    pub mcq_json: String,
    pub true_false_json: String,
    pub analysis_json: String,
}

/// The three quiz documents after the UI has parsed them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedQuiz {
    pub mcq: MCQQuiz,
    pub true_false: TrueFalseQuiz,
    pub analysis: QuizAnalysisOutput,
}

impl QuizResults {
    pub fn parse(&self) -> Result<ParsedQuiz, serde_json::Error> {
        Ok(ParsedQuiz {
            mcq: serde_json::from_str(&self.mcq_json)?,
            true_false: serde_json::from_str(&self.true_false_json)?,
            analysis: serde_json::from_str(&self.analysis_json)?,
        })
    }
}

/// The most recent successful upload, kept for re-display and download.
#[derive(Clone, Debug, Serialize)]
pub struct LatestRun {
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub results: QuizResults,
}
