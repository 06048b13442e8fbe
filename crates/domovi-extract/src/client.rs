//! HTTP client for the `OpenRouter` chat-completions API.
//!
//! One POST per document, no retries. The PDF is referenced by URL and
//! fetched by the remote service, never downloaded locally.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ExtractError;
use crate::request::ExtractionRequest;
use crate::response::{ChatResponse, Completion};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Anything that can answer an [`ExtractionRequest`] with a completion.
pub trait CompletionBackend {
    /// Send one request and return the model's answer.
    fn complete(
        &self,
        request: &ExtractionRequest,
    ) -> impl Future<Output = Result<Completion, ExtractError>> + Send;
}

/// Client for the `OpenRouter` chat-completions endpoint.
///
/// Use [`OpenRouterClient::new`] for production or
/// [`OpenRouterClient::with_base_url`] to point at a mock server in tests.
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl OpenRouterClient {
    /// Creates a new client pointed at the production `OpenRouter` API.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: Option<u64>) -> Result<Self, ExtractError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// See [`OpenRouterClient::with_base_url`].
    pub fn from_config(config: &domovi_core::AppConfig) -> Result<Self, ExtractError> {
        Self::with_base_url(
            &config.api_key,
            config.request_timeout_secs,
            &config.api_base_url,
        )
    }

    /// Creates a new client with a custom base URL. Requests go to
    /// `{base_url}/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ExtractError::InvalidConfig`] if the key
    /// is blank or `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: Option<u64>,
        base_url: &str,
    ) -> Result<Self, ExtractError> {
        if api_key.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "API key must not be empty".to_string(),
            ));
        }

        let mut builder = Client::builder().user_agent("domovi/0.1 (pdf-extraction)");
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let raw = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&raw).map_err(|e| {
            ExtractError::InvalidConfig(format!("invalid base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// The full chat-completions URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl CompletionBackend for OpenRouterClient {
    /// Posts the request and unwraps the first choice's content.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Http`] on network failure.
    /// - [`ExtractError::Upstream`] on a non-2xx status, an `error` object in
    ///   a 2xx response, or a 2xx body that is not a completion envelope.
    ///   Each carries the response body.
    /// - [`ExtractError::EmptyResponse`] if there is no content.
    async fn complete(&self, request: &ExtractionRequest) -> Result<Completion, ExtractError> {
        tracing::debug!(
            url = %request.source_url,
            model = %request.model,
            constrained = request.schema.is_some(),
            "sending extraction request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request.to_body())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ExtractError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        // A 2xx body that is not a completion envelope (e.g. a gateway page)
        // is an API-level failure; keep the body for diagnosis.
        let envelope: ChatResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!(url = %request.source_url, error = %e, "response is not a completion envelope");
                return Err(ExtractError::Upstream {
                    status: status.as_u16(),
                    body,
                });
            }
        };

        if let Some(error) = envelope.error {
            let body = match error.code {
                Some(code) => format!("{code}: {}", error.message),
                None => error.message,
            };
            return Err(ExtractError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        envelope
            .into_completion()
            .ok_or(ExtractError::EmptyResponse)
    }
}
