//! Extraction requests and their chat-completion wire format.
//!
//! A request always carries one text part and one file part pointing at the
//! PDF URL; the remote service fetches and parses the PDF itself.

use serde::Serialize;
use serde_json::Value;

use crate::schema::{pricing_schema, PRICING_SCHEMA_NAME};

const PDF_ENGINE: &str = "pdf-text";
const PRICING_USER_TEXT: &str = "Extract the pricing data from this PDF.";

/// A strict JSON schema the completion must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: Value,
}

/// Everything needed to ask the model for one document's data.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub source_url: String,
    /// File name announced to the API alongside the URL.
    pub filename: String,
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub schema: Option<ResponseSchema>,
    pub model: String,
}

impl ExtractionRequest {
    /// Free-form extraction of the availability report. The prompt goes in
    /// the user message; no schema and no temperature are sent.
    #[must_use]
    pub fn availability(source_url: &str, prompt: &str, model: &str) -> Self {
        Self {
            source_url: source_url.to_owned(),
            filename: "porocilo.pdf".to_owned(),
            prompt: prompt.to_owned(),
            system_prompt: None,
            schema: None,
            model: model.to_owned(),
        }
    }

    /// Schema-constrained extraction of a facility price list. The prompt
    /// becomes the system message.
    #[must_use]
    pub fn pricing(source_url: &str, system_prompt: &str, model: &str) -> Self {
        Self {
            source_url: source_url.to_owned(),
            filename: "cenik.pdf".to_owned(),
            prompt: PRICING_USER_TEXT.to_owned(),
            system_prompt: Some(system_prompt.to_owned()),
            schema: Some(ResponseSchema {
                name: PRICING_SCHEMA_NAME.to_owned(),
                schema: pricing_schema(),
            }),
            model: model.to_owned(),
        }
    }

    pub(crate) fn to_body(&self) -> ChatRequest<'_> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(Message {
                role: "system",
                content: MessageContent::Text(system),
            });
        }
        messages.push(Message {
            role: "user",
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: &self.prompt },
                ContentPart::File {
                    file: FileRef {
                        filename: &self.filename,
                        file_data: &self.source_url,
                    },
                },
            ]),
        });

        // Schema-constrained calls are pinned to temperature 0.
        let (temperature, response_format) = match &self.schema {
            Some(schema) => (
                Some(0),
                Some(ResponseFormat {
                    kind: "json_schema",
                    json_schema: JsonSchemaSpec {
                        name: &schema.name,
                        schema: &schema.schema,
                        strict: true,
                    },
                }),
            ),
            None => (None, None),
        };

        ChatRequest {
            model: &self.model,
            temperature,
            response_format,
            messages,
            plugins: [Plugin {
                id: "file-parser",
                pdf: PdfPlugin { engine: PDF_ENGINE },
            }],
            stream: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat<'a>>,
    messages: Vec<Message<'a>>,
    plugins: [Plugin; 1],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    File { file: FileRef<'a> },
}

#[derive(Debug, Serialize)]
struct FileRef<'a> {
    filename: &'a str,
    file_data: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaSpec<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaSpec<'a> {
    name: &'a str,
    schema: &'a Value,
    strict: bool,
}

#[derive(Debug, Serialize)]
struct Plugin {
    id: &'static str,
    pdf: PdfPlugin,
}

#[derive(Debug, Serialize)]
struct PdfPlugin {
    engine: &'static str,
}
