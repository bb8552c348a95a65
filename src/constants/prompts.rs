//! Scaffolding wrapped around the agent and task text from `config/`.
//!
//! `{name}` markers are replaced by [`crate::services::step_executor::interpolate`].

pub const AGENT_SYSTEM_PROMPT: &str = "You are {role}. {backstory}
Your personal goal is: {goal}
You work alone: do not ask questions and do not delegate. Give your best complete final answer.";

pub const EXPECTED_OUTPUT_PROMPT: &str = "This is the expected criteria for your final answer: {expected_output}
You MUST return the actual complete content as the final answer, not a summary.";

pub const CONTEXT_PROMPT: &str = "This is the context you're working with:
{context}";

pub const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

pub const JSON_SCHEMA_PROMPT: &str = "Ensure your final answer contains only the content in the following JSON schema format, with no markdown and no commentary:
{schema}";
