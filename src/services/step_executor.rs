use std::{collections::HashMap, path::Path};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::de::{DeserializeOwned, IgnoredAny};
use validator::Validate;

use crate::{
    constants::prompts::{CONTEXT_PROMPT, CONTEXT_SEPARATOR, EXPECTED_OUTPUT_PROMPT, JSON_SCHEMA_PROMPT},
    errors::{AppError, AppResult},
    services::{
        agent_orchestrator_service::{Agent, OutputSchema, StructuredOutput, Task, TaskOutput},
        model_service::CompletionRequest,
    },
};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("PLACEHOLDER is a valid regex pattern")
});

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[A-Za-z]*\s*(.*?)\s*```").expect("CODE_FENCE is a valid regex pattern")
});

/// Replaces `{name}` markers in a single pass; unknown markers are left as written.
pub fn interpolate<'a, I>(template: &str, values: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let values: HashMap<&str, &str> = values.into_iter().collect();

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => (*value).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Narrows a model reply to the JSON object it carries.
///
/// Models like to wrap answers in markdown fences or a sentence of prose.
pub fn extract_json_payload(raw: &str) -> &str {
    let candidate = CODE_FENCE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw)
        .trim();

    // first `{` that starts a complete JSON value; braces in prose are skipped
    for (start, _) in candidate.match_indices('{') {
        let mut values =
            serde_json::Deserializer::from_str(&candidate[start..]).into_iter::<IgnoredAny>();
        if let Some(Ok(_)) = values.next() {
            return &candidate[start..start + values.byte_offset()];
        }
    }
    candidate
}

fn parse_validated<T>(payload: &str, schema: OutputSchema) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_str(payload).map_err(|e| {
        AppError::SchemaError(format!("output is not a valid {}: {}", schema.type_name(), e))
    })?;
    value
        .validate()
        .map_err(|e| AppError::SchemaError(format!("{} failed validation: {}", schema.type_name(), e)))?;
    Ok(value)
}

impl OutputSchema {
    pub fn parse(&self, raw: &str) -> AppResult<StructuredOutput> {
        let payload = extract_json_payload(raw);
        match self {
            OutputSchema::McqQuiz => parse_validated(payload, *self).map(StructuredOutput::Mcq),
            OutputSchema::TrueFalseQuiz => parse_validated(payload, *self).map(StructuredOutput::TrueFalse),
            OutputSchema::QuizAnalysis => parse_validated(payload, *self).map(StructuredOutput::Analysis),
        }
    }
}

pub struct StepHandler;

impl StepHandler {
    pub fn build_prompt(
        task: &Task,
        context: &[&TaskOutput],
        inputs: &HashMap<String, String>,
    ) -> String {
        let input_pairs = || inputs.iter().map(|(k, v)| (k.as_str(), v.as_str()));

        let mut sections = vec![
            interpolate(task.description.trim(), input_pairs()),
            interpolate(
                EXPECTED_OUTPUT_PROMPT,
                [("expected_output", interpolate(task.expected_output.trim(), input_pairs()).as_str())],
            ),
        ];

        if !context.is_empty() {
            let joined = context
                .iter()
                .map(|output| output.raw.as_str())
                .collect::<Vec<_>>()
                .join(CONTEXT_SEPARATOR);
            sections.push(interpolate(CONTEXT_PROMPT, [("context", joined.as_str())]));
        }

        if let Some(schema) = task.output_schema {
            sections.push(interpolate(
                JSON_SCHEMA_PROMPT,
                [("schema", schema.json_schema().as_str())],
            ));
        }

        sections.join("\n\n")
    }

    pub async fn execute(
        task: &Task,
        agent: &Agent,
        context: &[&TaskOutput],
        inputs: &HashMap<String, String>,
    ) -> AppResult<TaskOutput> {
        log::info!("Executing task '{}' with agent '{}'", task.name, agent.role);

        let request = CompletionRequest {
            system_prompt: agent.system_prompt(),
            user_prompt: Self::build_prompt(task, context, inputs),
            json_output: task.output_schema.is_some(),
        };
        let reply = agent.llm().complete(request).await?;

        let (raw, structured) = match task.output_schema {
            Some(schema) => {
                let structured = schema.parse(&reply)?;
                Self::check_alignment(&structured, context)?;
                (structured.to_json_pretty()?, Some(structured))
            }
            None => (reply.trim().to_string(), None),
        };

        if let Some(path) = &task.output_file {
            Self::write_output(path, &raw).await?;
        }

        log::info!("Task '{}' finished", task.name);
        Ok(TaskOutput {
            name: task.name.clone(),
            agent_role: agent.role.clone(),
            raw,
            structured,
        })
    }

    /// An analysis must hold one entry per question produced by its context tasks.
    fn check_alignment(structured: &StructuredOutput, context: &[&TaskOutput]) -> AppResult<()> {
        let StructuredOutput::Analysis(analysis) = structured else {
            return Ok(());
        };

        let expected: usize = context
            .iter()
            .filter_map(|output| output.structured.as_ref())
            .filter(|output| !matches!(output, StructuredOutput::Analysis(_)))
            .map(StructuredOutput::question_count)
            .sum();

        if expected > 0 && analysis.quiz.len() != expected {
            return Err(AppError::SchemaError(format!(
                "analysis has {} entries but {} questions were generated",
                analysis.quiz.len(),
                expected
            )));
        }
        Ok(())
    }

    async fn write_output(path: &Path, contents: &str) -> AppResult<()> {
        tokio::fs::write(path, contents).await.map_err(|e| {
            AppError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}
