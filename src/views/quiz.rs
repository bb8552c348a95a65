use std::fmt::Write as _;

use maud::{html, Markup};

use crate::{
    models::{
        domain::{MCQQuiz, QuizAnalysisOutput, TrueFalseQuiz},
        dto::{LatestRun, ParsedQuiz},
    },
    views::layout,
};

pub const UPLOAD_PROMPT: &str = "Please upload a PDF file to begin processing.";
pub const PARSE_ERROR_MESSAGE: &str =
    "Error: Unable to parse quiz data. The extracted content is not valid JSON.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    fn class(&self) -> &'static str {
        match self {
            NoticeKind::Info => "notice notice-info",
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

pub fn notice(kind: NoticeKind, message: &str) -> Markup {
    html! {
        div class=(kind.class()) role=(if kind == NoticeKind::Error { "alert" } else { "status" }) {
            (message)
        }
    }
}

fn upload_form() -> Markup {
    html! {
        h2 { "Upload Your PDF" }
        form.file-uploader action="/upload" method="post" enctype="multipart/form-data" {
            label for="file" { "Choose a PDF file" }
            br;
            input #file type="file" name="file" accept=".pdf,application/pdf" required;
            br;
            br;
            button type="submit" { "Generate Quiz" }
        }
    }
}

/// The single application page with `content` below the introduction.
pub fn index_page(content: Markup) -> Markup {
    layout::page(
        "Quiz Generator",
        upload_form(),
        html! {
            h1 { "📄 Quiz Generator" }
            p {
                "Welcome to Quiz Generator! Upload your PDF file, and our app will generate a quiz based on the file."
            }
            (content)
        },
    )
}

fn option_label(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

fn question_block<'a>(
    topic: &str,
    questions: impl Iterator<Item = (&'a str, &'a [String])>,
) -> Markup {
    html! {
        div.quiz-title { "Quiz on " (topic) }
        @for (number, (question, options)) in questions.enumerate() {
            div.quiz-container {
                div.quiz-question { "Q" ((number + 1).to_string()) ": " (question) }
                @for (index, option) in options.iter().enumerate() {
                    div.quiz-option { (option_label(index).to_string()) ". " (option) }
                }
            }
        }
    }
}

pub fn mcq_block(quiz: &MCQQuiz) -> Markup {
    question_block(
        &quiz.topic,
        quiz.quiz
            .iter()
            .map(|q| (q.question.as_str(), q.options.as_slice())),
    )
}

/// True/false quizzes carry no topic of their own; the MCQ topic is shown.
pub fn true_false_block(topic: &str, quiz: &TrueFalseQuiz) -> Markup {
    question_block(
        topic,
        quiz.quiz
            .iter()
            .map(|q| (q.question.as_str(), q.options.as_slice())),
    )
}

pub fn analysis_block(topic: &str, analysis: &QuizAnalysisOutput) -> Markup {
    html! {
        div.quiz-title { "Quiz on " (topic) }
        @for item in &analysis.quiz {
            div.quiz-container {
                div.quiz-question { "Question Explanation: " (item.question_explanation) }
                div.quiz-question { "Answer Feedback: " (item.answer_feedback) }
                div.quiz-question { "Correct Answer: " (item.correct_answer) }
                div.quiz-question { "Related Topics: " (item.related_topics) }
            }
        }
    }
}

pub fn quiz_sections(quiz: &ParsedQuiz) -> Markup {
    html! {
        h3 { "Generated MCQ Quiz Content" }
        (mcq_block(&quiz.mcq))
        h3 { "Generated T/F Quiz Content" }
        (true_false_block(&quiz.mcq.topic, &quiz.true_false))
        h3 { "Generated Quiz Analysis Content" }
        (analysis_block(&quiz.mcq.topic, &quiz.analysis))
    }
}

pub fn results_section(run: &LatestRun) -> Markup {
    let body = match run.results.parse() {
        Ok(quiz) => html! {
            (quiz_sections(&quiz))
            p { a href="/quiz.txt" download="quiz.txt" { "Download Quiz" } }
        },
        Err(e) => {
            log::warn!("Quiz results for {} are not valid JSON: {}", run.file_name, e);
            notice(NoticeKind::Error, PARSE_ERROR_MESSAGE)
        }
    };

    html! {
        h2 { "Processing Results" }
        (notice(NoticeKind::Success, "PDF processed successfully!"))
        p {
            "Source: " (run.file_name) " ("
            (run.uploaded_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()) ")"
        }
        (body)
    }
}

/// Plain-text rendering of the questions, used for the download.
pub fn quiz_text(mcq: &MCQQuiz, true_false: &TrueFalseQuiz) -> String {
    let mut output = format!("Quiz on {}\n\nMCQ Questions\n\n", mcq.topic);
    for item in &mcq.quiz {
        push_question(&mut output, &item.question, &item.options);
    }

    output.push_str("T/F Questions\n\n");
    for item in &true_false.quiz {
        push_question(&mut output, &item.question, &item.options);
    }
    output
}

fn push_question(output: &mut String, question: &str, options: &[String]) {
    let _ = writeln!(output, "Question: {}", question);
    for option in options {
        let _ = writeln!(output, "{}", option);
    }
    output.push('\n');
}
