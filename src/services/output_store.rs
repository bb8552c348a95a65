use std::{io::ErrorKind, path::Path};

use crate::{
    errors::{AppError, AppResult},
    models::dto::QuizResults,
    services::orchestrator_steps::quiz_steps::{
        ANALYSIS_OUTPUT_FILE, MCQ_OUTPUT_FILE, TRUE_FALSE_OUTPUT_FILE,
    },
};

/// Removes `dir` with everything in it and creates it again empty.
pub async fn prepare_output_dir(dir: &Path) -> AppResult<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => log::debug!("Removed previous output directory {}", dir.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(AppError::IoError(format!(
                "Failed to clear output directory {}: {}",
                dir.display(),
                e
            )))
        }
    }

    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create output directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    log::info!("Output directory {} created", dir.display());
    Ok(())
}

/// Reads back the three documents a quiz crew run wrote to `dir`.
pub async fn read_quiz_outputs(dir: &Path) -> AppResult<QuizResults> {
    Ok(QuizResults {
        mcq_json: read_output(dir, MCQ_OUTPUT_FILE).await?,
        true_false_json: read_output(dir, TRUE_FALSE_OUTPUT_FILE).await?,
        analysis_json: read_output(dir, ANALYSIS_OUTPUT_FILE).await?,
    })
}

async fn read_output(dir: &Path, name: &str) -> AppResult<String> {
    tokio::fs::read_to_string(dir.join(name)).await.map_err(|e| {
        AppError::IoError(format!("Failed to read quiz output files: {}: {}", name, e))
    })
}
