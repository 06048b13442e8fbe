//! PDF-to-JSON extraction through a hosted chat-completion model.
//!
//! The model is an opaque oracle: given a prompt, an optional schema and a
//! document URL, it returns text. This crate builds the request, sends it,
//! and turns the answer into JSON.

pub mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod schema;

pub use client::{CompletionBackend, OpenRouterClient};
pub use error::ExtractError;
pub use request::{ExtractionRequest, ResponseSchema};
pub use response::{parse_completion, select_json_payload, Completion};
pub use schema::{pricing_schema, PRICING_SCHEMA_NAME};

use domovi_core::PricingSheet;
use serde::Deserialize as _;
use serde_json::Value;

/// Run one extraction and parse the answer as JSON.
///
/// # Errors
///
/// Propagates any [`ExtractError`] from the backend or the parser.
pub async fn extract_json<B>(backend: &B, request: &ExtractionRequest) -> Result<Value, ExtractError>
where
    B: CompletionBackend,
{
    let completion = backend.complete(request).await?;
    let result = completion.into_json();
    if let Err(ExtractError::MalformedResponse { message, raw }) = &result {
        tracing::error!(url = %request.source_url, %message, raw = %raw, "completion is not valid JSON");
    }
    result
}

/// Run a pricing extraction and check the answer against [`PricingSheet`].
///
/// Returns both the raw value (written to disk as-is) and the typed view.
///
/// # Errors
///
/// Returns [`ExtractError::Deserialize`] if the JSON lacks a required field,
/// or any error from [`extract_json`].
pub async fn extract_pricing<B>(
    backend: &B,
    request: &ExtractionRequest,
) -> Result<(Value, PricingSheet), ExtractError>
where
    B: CompletionBackend,
{
    let value = extract_json(backend, request).await?;
    let sheet = PricingSheet::deserialize(&value).map_err(|e| ExtractError::Deserialize {
        context: format!("pricing sheet from {}", request.source_url),
        source: e,
    })?;
    Ok((value, sheet))
}
