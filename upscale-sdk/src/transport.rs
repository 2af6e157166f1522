// ABOUTME: Transport abstraction for sending one generateContent request to the image service
// ABOUTME: HttpTransport implements it over reqwest and maps failures to typed errors

use async_trait::async_trait;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use http::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::constants::urls;
use crate::error::UpscaleError;
use crate::wire::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Sends a single generate-content request and returns the decoded reply
#[async_trait]
pub trait ImageGenerationTransport: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &SecretString,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpscaleError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        proxy: Option<reqwest::Proxy>,
    ) -> Result<Self, UpscaleError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| UpscaleError::Configuration(format!("Invalid API base URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UpscaleError::Configuration(format!(
                "Invalid API base URL scheme: {}",
                parsed.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("upscale-sdk/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| UpscaleError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url,
            urls::GEMINI_API_VERSION,
            model
        )
    }
}

#[async_trait]
impl ImageGenerationTransport for HttpTransport {
    async fn generate_content(
        &self,
        api_key: &SecretString,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpscaleError> {
        let mut key = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
            UpscaleError::Configuration("API key contains invalid header characters".to_string())
        })?;
        key.set_sensitive(true);

        let endpoint = self.endpoint(model);
        tracing::debug!(%endpoint, "sending generateContent request");

        let response = self
            .client
            .post(&endpoint)
            .header(HeaderName::from_static(urls::API_KEY_HEADER), key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "generateContent rejected");
            return Err(error_from_body(status, &body));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            UpscaleError::transport(
                Some(status.as_u16()),
                format!("Unreadable response body: {}", e),
            )
        })
    }
}

fn error_from_body(status: StatusCode, body: &str) -> UpscaleError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.to_string());

    UpscaleError::Transport {
        status: Some(status.as_u16()),
        message,
    }
}
