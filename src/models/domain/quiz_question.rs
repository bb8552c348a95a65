use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single multiple-choice question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
pub struct MCQQuestion {
    /// Clear, unambiguous question text
    #[validate(length(min = 1))]
    pub question: String,
    /// List of answer options with exactly 4 items (1 correct, 3 distractors)
    #[validate(length(equal = 4))]
    pub options: Vec<String>,
    /// Zero-based index of the correct answer (0-3)
    #[validate(range(max = 3))]
    pub correct_index: u8,
}

/// A single true/false question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
pub struct TrueFalseQuestion {
    /// The generated True/False question
    #[validate(length(min = 1))]
    pub question: String,
    /// List of answer options with exactly 2 items (1 correct, 1 distractor)
    #[validate(length(equal = 2))]
    pub options: Vec<String>,
    /// Zero-based index of the correct answer (0-1)
    #[validate(range(max = 1))]
    pub correct_index: u8,
}

impl MCQQuestion {
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_index as usize)
            .map(String::as_str)
    }
}

impl TrueFalseQuestion {
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_index as usize)
            .map(String::as_str)
    }
}
