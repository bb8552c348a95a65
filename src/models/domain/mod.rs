pub mod quiz;
pub mod quiz_analysis;
pub mod quiz_question;
pub use quiz::{MCQQuiz, TrueFalseQuiz};
pub use quiz_analysis::{QuestionAnalysis, QuizAnalysisOutput};
pub use quiz_question::{MCQQuestion, TrueFalseQuestion};
