#[cfg(test)]
pub mod fixtures {
    use crate::models::{
        domain::{
            MCQQuestion, MCQQuiz, QuestionAnalysis, QuizAnalysisOutput, TrueFalseQuestion,
            TrueFalseQuiz,
        },
        dto::QuizResults,
    };

    /// A valid five-question multiple-choice quiz on `topic`
    pub fn mcq_quiz(topic: &str) -> MCQQuiz {
        MCQQuiz {
            topic: topic.to_string(),
            quiz: (1..=5)
                .map(|n| MCQQuestion {
                    question: format!("{} question {}?", topic, n),
                    options: vec![
                        format!("Answer {}", n),
                        "Distractor A".to_string(),
                        "Distractor B".to_string(),
                        "Distractor C".to_string(),
                    ],
                    correct_index: 0,
                })
                .collect(),
        }
    }

    /// A valid five-question true/false quiz
    pub fn true_false_quiz() -> TrueFalseQuiz {
        TrueFalseQuiz {
            quiz: (1..=5)
                .map(|n| TrueFalseQuestion {
                    question: format!("Statement {} holds.", n),
                    options: vec!["True".to_string(), "False".to_string()],
                    correct_index: (n % 2) as u8,
                })
                .collect(),
        }
    }

    pub fn question_analysis(n: usize) -> QuestionAnalysis {
        QuestionAnalysis {
            question_explanation: format!("Question {} checks the core definition.", n),
            answer_feedback: "a. correct; b, c, d are distractors.".to_string(),
            correct_answer: "a, see Section 1".to_string(),
            related_topics: "Tree rotations, AVL trees".to_string(),
        }
    }

    pub fn analysis_output(entries: usize) -> QuizAnalysisOutput {
        QuizAnalysisOutput {
            quiz: (1..=entries).map(question_analysis).collect(),
        }
    }

    pub fn quiz_results(topic: &str) -> QuizResults {
        QuizResults {
            mcq_json: serde_json::to_string(&mcq_quiz(topic)).unwrap(),
            true_false_json: serde_json::to_string(&true_false_quiz()).unwrap(),
            analysis_json: serde_json::to_string(&analysis_output(10)).unwrap(),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_mcq_quiz() {
        let quiz = mcq_quiz("Heaps");
        assert_eq!(quiz.topic, "Heaps");
        assert_eq!(quiz.quiz.len(), 5);
        assert!(quiz.quiz.iter().all(|q| q.options.len() == 4));
    }

    #[test]
    fn test_fixtures_analysis_output() {
        assert_eq!(analysis_output(10).quiz.len(), 10);
    }
}
