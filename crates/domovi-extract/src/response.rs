//! Turning completion text into JSON.
//!
//! Models frequently wrap their answer in a Markdown code fence, sometimes
//! with a sentence of preamble. Only the first fenced block is considered.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ExtractError;

const FENCE: &str = "```";

/// Content of a successful chat completion.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The usual case: the model's answer as text.
    Text(String),
    /// Some providers return schema-constrained output as a JSON value
    /// rather than a string.
    Structured(Value),
}

impl Completion {
    /// Parse the completion into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MalformedResponse`] if the text is not valid
    /// JSON after fence stripping.
    pub fn into_json(self) -> Result<Value, ExtractError> {
        match self {
            Completion::Text(text) => parse_completion(&text),
            Completion::Structured(value) => Ok(value),
        }
    }
}

/// Select the part of `text` that should hold JSON: the trimmed interior of
/// the first fenced block (optionally tagged `json`), or the whole text when
/// there is no complete fence.
#[must_use]
pub fn select_json_payload(text: &str) -> &str {
    let Some(open) = text.find(FENCE) else {
        return text;
    };
    let after_open = &text[open + FENCE.len()..];
    let body = after_open.strip_prefix("json").unwrap_or(after_open);

    match body.find(FENCE) {
        Some(close) => body[..close].trim(),
        None => text,
    }
}

/// Parse completion text as JSON, honouring a fenced code block.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedResponse`] carrying the parser message
/// and the full original text.
pub fn parse_completion(text: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(select_json_payload(text)).map_err(|e| {
        ExtractError::MalformedResponse {
            message: e.to_string(),
            raw: text.to_owned(),
        }
    })
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<Value>,
}

/// Error object OpenRouter embeds in an otherwise successful response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<Value>,
    pub message: String,
}

impl ChatResponse {
    /// First choice's content, or `None` when it is absent, null or an
    /// empty string.
    pub(crate) fn into_completion(self) -> Option<Completion> {
        let content = self.choices.into_iter().next()?.message?.content?;
        match content {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Completion::Text(s)),
            other => Some(Completion::Structured(other)),
        }
    }
}

#[cfg(test)]
#[path = "response_test.rs"]
mod tests;
