use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::quiz_question::{MCQQuestion, TrueFalseQuestion};

/// The complete multiple-choice quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
pub struct MCQQuiz {
    /// Exactly 5 high-quality questions
    #[validate(length(equal = 5), nested)]
    pub quiz: Vec<MCQQuestion>,
    /// Main topic of the quiz derived from content
    #[validate(length(min = 1))]
    pub topic: String,
}

/// The complete true/false quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
pub struct TrueFalseQuiz {
    /// Exactly 5 high-quality true/false questions
    #[validate(length(equal = 5), nested)]
    pub quiz: Vec<TrueFalseQuestion>,
}
