use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Analysis of a single generated quiz question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
pub struct QuestionAnalysis {
    /// A brief summary of the question's focus and context, providing an overview of what the
    /// question is testing and its relevance to the source material.
    #[serde(rename = "Question_Explanation")]
    #[validate(length(min = 1))]
    pub question_explanation: String,
    /// Detailed explanations for each answer option, specifying whether it is correct or
    /// incorrect, with reasons and precise references to the source document.
    #[serde(rename = "Answer_Feedback")]
    #[validate(length(min = 1))]
    pub answer_feedback: String,
    /// Identification of the correct answer with a clear justification, including a reference
    /// to the relevant section of the source document.
    #[serde(rename = "Correct_Answer")]
    #[validate(length(min = 1))]
    pub correct_answer: String,
    /// Suggested topics for further study, tied to the content of the source document or
    /// broader related concepts.
    #[serde(rename = "Related_Topics")]
    #[validate(length(min = 1))]
    pub related_topics: String,
}

/// The complete analysis of a quiz, one entry per question in generation order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
pub struct QuizAnalysisOutput {
    /// One analysis per generated question: all multiple-choice questions first, then all
    /// true/false questions.
    #[validate(length(min = 1), nested)]
    pub quiz: Vec<QuestionAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn analysis_uses_capitalised_field_names() {
        let json = serde_json::to_value(fixtures::question_analysis(1)).unwrap();
        let object = json.as_object().unwrap();

        for key in [
            "Question_Explanation",
            "Answer_Feedback",
            "Correct_Answer",
            "Related_Topics",
        ] {
            assert!(object.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn analysis_missing_field_fails_to_parse() {
        let raw = r#"{"quiz": [{"Question_Explanation": "x", "Answer_Feedback": "y", "Correct_Answer": "z"}]}"#;
        assert!(serde_json::from_str::<QuizAnalysisOutput>(raw).is_err());
    }

    #[test]
    fn empty_analysis_is_invalid() {
        let output = QuizAnalysisOutput { quiz: vec![] };
        assert!(output.validate().is_err());
    }
}
