// ABOUTME: Builder pattern implementation for UpscaleClient configuration
// ABOUTME: The API key is optional at build time and validated when an upscale is requested

use crate::UpscaleClient;
use crate::constants::{limits, models, urls};
use crate::error::UpscaleError;
use secrecy::SecretString;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<UpscaleClient, UpscaleError>))]
pub struct UpscaleClientConfig {
    #[builder(default = None)]
    pub api_key: Option<SecretString>,

    #[builder(default = false)]
    pub verbose: bool,

    /// No timeout unless set; the transport default applies
    #[builder(default = None)]
    pub timeout: Option<Duration>,

    #[builder(default = None)]
    pub proxy: Option<reqwest::Proxy>,

    #[builder(default = None)]
    pub base_url: Option<String>,

    #[builder(default = None)]
    pub model: Option<String>,

    #[builder(default = limits::DEFAULT_MAX_IMAGE_BYTES)]
    pub max_image_bytes: u64,
}

impl Default for UpscaleClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            verbose: false,
            timeout: None,
            proxy: None,
            base_url: None,
            model: None,
            max_image_bytes: limits::DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl UpscaleClientConfig {
    pub fn base_url_or_default(&self) -> &str {
        self.base_url.as_deref().unwrap_or(urls::GEMINI_API_BASE)
    }

    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(models::DEFAULT_MODEL)
    }
}

impl From<UpscaleClientConfig> for Result<UpscaleClient, UpscaleError> {
    fn from(config: UpscaleClientConfig) -> Self {
        UpscaleClient::from_config(config)
    }
}

impl UpscaleClient {
    pub fn builder() -> UpscaleClientConfigBuilder<((), (), (), (), (), (), ())> {
        UpscaleClientConfig::builder()
    }

    pub fn create_proxy(url: &str) -> Result<reqwest::Proxy, UpscaleError> {
        let parsed_url = Url::parse(url)
            .map_err(|e| UpscaleError::Configuration(format!("Invalid proxy URL: {}", e)))?;

        reqwest::Proxy::all(parsed_url.as_str())
            .map_err(|e| UpscaleError::Configuration(format!("Invalid proxy configuration: {}", e)))
    }
}
