mod common;

use std::sync::Arc;

use common::{
    analysis_json, happy_replies, mcq_json, pipeline, test_config, true_false_json, ScriptedModel,
    STUDY_TEXT,
};
use quiz_generator_server::{
    config::RunMode,
    errors::AppError,
    models::domain::{MCQQuiz, QuizAnalysisOutput, TrueFalseQuiz},
    services::orchestrator_steps::quiz_steps::{
        ANALYSIS_OUTPUT_FILE, MCQ_OUTPUT_FILE, TRUE_FALSE_OUTPUT_FILE,
    },
};

#[tokio::test]
async fn server_mode_returns_schema_shaped_documents() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(ScriptedModel::new(happy_replies("Binary Search Trees")));
    let pipeline = pipeline(&test_config(dir.path(), RunMode::Server), Arc::clone(&llm));

    let results = pipeline.run_pdf(b"%PDF".to_vec()).await.unwrap();

    let mcq: MCQQuiz = serde_json::from_str(&results.mcq_json).unwrap();
    assert_eq!(mcq.topic, "Binary Search Trees");
    assert_eq!(mcq.quiz.len(), 5);
    assert!(mcq.quiz.iter().all(|q| q.options.len() == 4 && q.correct_index <= 3));

    let true_false: TrueFalseQuiz = serde_json::from_str(&results.true_false_json).unwrap();
    assert_eq!(true_false.quiz.len(), 5);
    assert!(true_false.quiz.iter().all(|q| q.options.len() == 2 && q.correct_index <= 1));

    let analysis: QuizAnalysisOutput = serde_json::from_str(&results.analysis_json).unwrap();
    assert_eq!(analysis.quiz.len(), 10);
    assert_eq!(llm.remaining(), 0);
}

#[tokio::test]
async fn extracted_text_and_context_reach_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(ScriptedModel::new(happy_replies("Binary Search Trees")));
    let pipeline = pipeline(&test_config(dir.path(), RunMode::Server), Arc::clone(&llm));

    pipeline.run_pdf(b"%PDF".to_vec()).await.unwrap();

    let requests = llm.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.json_output));
    assert!(requests.iter().all(|r| r.user_prompt.contains(STUDY_TEXT.trim_end())));
    assert!(!requests[0].user_prompt.contains("This is the context you're working with:"));
    assert!(requests[2].user_prompt.contains("Binary Search Trees question 5?"));
    assert!(requests[2].user_prompt.contains("Statement 5 holds."));
}

#[tokio::test]
async fn local_mode_matches_server_mode() {
    let server_dir = tempfile::tempdir().unwrap();
    let local_dir = tempfile::tempdir().unwrap();

    let server = pipeline(
        &test_config(server_dir.path(), RunMode::Server),
        Arc::new(ScriptedModel::new(happy_replies("Graphs"))),
    );
    let local = pipeline(
        &test_config(local_dir.path(), RunMode::Local),
        Arc::new(ScriptedModel::new(happy_replies("Graphs"))),
    );

    let from_memory = server.run_text(STUDY_TEXT.to_string()).await.unwrap();
    let from_files = local.run_text(STUDY_TEXT.to_string()).await.unwrap();

    assert_eq!(from_memory, from_files);
    for (file, expected) in [
        (MCQ_OUTPUT_FILE, &from_files.mcq_json),
        (TRUE_FALSE_OUTPUT_FILE, &from_files.true_false_json),
        (ANALYSIS_OUTPUT_FILE, &from_files.analysis_json),
    ] {
        let written = std::fs::read_to_string(local_dir.path().join(file)).unwrap();
        assert_eq!(&written, expected);
    }
}

#[tokio::test]
async fn malformed_output_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut missing_topic = mcq_json("Heaps");
    missing_topic.as_object_mut().unwrap().remove("topic");
    let llm = Arc::new(ScriptedModel::new([missing_topic.to_string()]));
    let pipeline = pipeline(&test_config(dir.path(), RunMode::Local), Arc::clone(&llm));

    let err = pipeline.run_text(STUDY_TEXT.to_string()).await.unwrap_err();

    assert!(matches!(&err, AppError::PipelineError(msg) if msg.contains("MCQ Quiz Generate")));
    assert_eq!(llm.requests().len(), 1);
    assert!(!dir.path().join(MCQ_OUTPUT_FILE).exists());
}

#[tokio::test]
async fn wrong_option_count_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let mut three_options = mcq_json("Heaps");
    three_options["quiz"][2]["options"] = serde_json::json!(["a", "b", "c"]);
    let pipeline = pipeline(
        &test_config(dir.path(), RunMode::Server),
        Arc::new(ScriptedModel::new([three_options.to_string()])),
    );

    let err = pipeline.run_text(STUDY_TEXT.to_string()).await.unwrap_err();
    assert!(matches!(err, AppError::PipelineError(_)));
}

#[tokio::test]
async fn analysis_must_cover_every_question() {
    let dir = tempfile::tempdir().unwrap();
    let replies = vec![
        mcq_json("Heaps").to_string(),
        true_false_json().to_string(),
        analysis_json(9).to_string(),
    ];
    let pipeline = pipeline(
        &test_config(dir.path(), RunMode::Server),
        Arc::new(ScriptedModel::new(replies)),
    );

    let err = pipeline.run_text(STUDY_TEXT.to_string()).await.unwrap_err();
    assert!(
        matches!(&err, AppError::PipelineError(msg) if msg.contains("analysis has 9 entries but 10 questions were generated"))
    );
}

#[tokio::test]
async fn rerun_clears_stale_output_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = pipeline(
        &test_config(dir.path(), RunMode::Local),
        Arc::new(ScriptedModel::new(happy_replies("Heaps"))),
    );
    first.run_text(STUDY_TEXT.to_string()).await.unwrap();
    assert!(dir.path().join(ANALYSIS_OUTPUT_FILE).exists());

    let second = pipeline(
        &test_config(dir.path(), RunMode::Local),
        Arc::new(ScriptedModel::new([mcq_json("Tries").to_string()])),
    );
    let err = second.run_text(STUDY_TEXT.to_string()).await.unwrap_err();

    assert!(matches!(err, AppError::PipelineError(_)));
    let mcq = std::fs::read_to_string(dir.path().join(MCQ_OUTPUT_FILE)).unwrap();
    assert!(mcq.contains("Tries"));
    assert!(!dir.path().join(TRUE_FALSE_OUTPUT_FILE).exists());
    assert!(!dir.path().join(ANALYSIS_OUTPUT_FILE).exists());
}

#[tokio::test]
async fn extraction_sentinel_skips_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(ScriptedModel::default());
    let pipeline = pipeline(&test_config(dir.path(), RunMode::Server), Arc::clone(&llm));

    let err = pipeline
        .run_text("Error reading PDF: invalid file header".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ExtractionError(_)));
    assert!(llm.requests().is_empty());
}

#[tokio::test]
async fn model_failure_is_reported_with_task_name() {
    let dir = tempfile::tempdir().unwrap();
    let replies = vec![mcq_json("Heaps").to_string()];
    let pipeline = pipeline(
        &test_config(dir.path(), RunMode::Server),
        Arc::new(ScriptedModel::new(replies)),
    );

    let err = pipeline.run_text(STUDY_TEXT.to_string()).await.unwrap_err();
    assert!(matches!(&err, AppError::PipelineError(msg) if msg.contains("True False Quiz Generate")));
}
