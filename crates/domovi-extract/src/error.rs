use thiserror::Error;

/// Errors returned while extracting structured data from a PDF.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status, an error envelope, or a
    /// success body that is not a completion.
    #[error("OpenRouter API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// The completion carried no content.
    #[error("No content in OpenRouter response")]
    EmptyResponse,

    /// The completion text did not parse as JSON, even after stripping a
    /// fenced code block. `raw` is the untouched completion text.
    #[error("Failed to parse JSON from OpenRouter response: {message}\n--- raw response ---\n{raw}")]
    MalformedResponse { message: String, raw: String },

    /// The parsed JSON did not match the expected shape.
    #[error("unexpected shape for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}
