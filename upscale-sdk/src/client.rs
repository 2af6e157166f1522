// ABOUTME: UpscaleClient orchestrates one upscale: credential check, encode, request, decode
// ABOUTME: Stateless across calls; concurrent invocations share nothing but the transport

use secrecy::SecretString;

use crate::builder::UpscaleClientConfig;
use crate::encoder::Encoder;
use crate::error::UpscaleError;
use crate::image::{ImageSource, ScaleFactor, UpscaleResult};
use crate::transport::{HttpTransport, ImageGenerationTransport};
use crate::wire::build_upscale_request;

pub struct UpscaleClient<T = HttpTransport> {
    transport: T,
    api_key: Option<SecretString>,
    model: String,
    encoder: Encoder,
    verbose: bool,
}

impl UpscaleClient<HttpTransport> {
    pub fn from_config(config: UpscaleClientConfig) -> Result<Self, UpscaleError> {
        let transport = HttpTransport::new(
            config.base_url_or_default(),
            config.timeout,
            config.proxy.clone(),
        )?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: ImageGenerationTransport> UpscaleClient<T> {
    /// Build a client over a caller-supplied transport; base_url, timeout and proxy are ignored
    pub fn with_transport(config: UpscaleClientConfig, transport: T) -> Self {
        Self {
            model: config.model_or_default().to_string(),
            encoder: Encoder::new(config.max_image_bytes),
            api_key: config.api_key,
            verbose: config.verbose,
            transport,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_image_bytes(&self) -> u64 {
        self.encoder.max_bytes()
    }

    /// Upscale one image by the given factor.
    ///
    /// Fails with [`UpscaleError::MissingApiKey`] before any I/O when no key is
    /// configured. Issues exactly one request; nothing is retried or cached.
    pub async fn upscale(
        &self,
        source: &dyn ImageSource,
        scale: ScaleFactor,
    ) -> Result<UpscaleResult, UpscaleError> {
        let api_key = self.api_key.as_ref().ok_or(UpscaleError::MissingApiKey)?;

        let encoded = self.encoder.encode(source).await?;
        let request = build_upscale_request(&encoded, scale);

        if self.verbose {
            tracing::info!(
                image = source.name(),
                %scale,
                model = %self.model,
                "requesting upscale"
            );
        }

        let response = self
            .transport
            .generate_content(api_key, &self.model, &request)
            .await?;

        let inline = response
            .first_inline_image()
            .ok_or(UpscaleError::ResponseShape)?;

        tracing::debug!(
            mime_type = %inline.mime_type,
            encoded_len = inline.data.len(),
            "received upscaled image"
        );

        Ok(UpscaleResult {
            mime_type: inline.mime_type.clone(),
            data: inline.data.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::image::{ImageResource, MimeType};
    use crate::test_helpers::*;
    use crate::wire::GenerateContentResponse;
    use std::sync::atomic::Ordering;

    fn config() -> UpscaleClientConfig {
        UpscaleClientConfig {
            api_key: Some(test_api_key()),
            ..Default::default()
        }
    }

    fn png(bytes: &[u8]) -> ImageResource {
        ImageResource::new("input.png", bytes.to_vec(), MimeType::Png)
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_transport() {
        let transport = FakeTransport::replying(mock_image_response("image/png", "AAAA"));
        let calls = transport.calls();
        let client = UpscaleClient::with_transport(UpscaleClientConfig::default(), transport);

        let err = client.upscale(&png(b"img"), ScaleFactor::X2).await.unwrap_err();

        assert!(matches!(err, UpscaleError::MissingApiKey));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_result_is_data_uri_of_returned_payload() {
        for mime in MimeType::ALL {
            for scale in [ScaleFactor::X2, ScaleFactor::X4] {
                let payload = format!("UPSCALED+{}/{}==", mime.as_str(), scale.factor());
                let transport =
                    FakeTransport::replying(mock_image_response(mime.as_str(), &payload));
                let client = UpscaleClient::with_transport(config(), transport);

                let source = ImageResource::new("input", b"raw".to_vec(), mime);
                let result = client.upscale(&source, scale).await.unwrap();

                assert_eq!(
                    result.to_data_uri(),
                    format!("data:{};base64,{}", mime.as_str(), payload)
                );
            }
        }
    }

    #[tokio::test]
    async fn test_request_carries_image_prompt_and_modality() {
        let transport = FakeTransport::replying(mock_image_response("image/png", "AAAA"));
        let seen = transport.requests();
        let client = UpscaleClient::with_transport(config(), transport);

        client
            .upscale(&png(b"hello"), ScaleFactor::X4)
            .await
            .unwrap();

        let requests = seen.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (model, request) = &requests[0];
        assert_eq!(model, "gemini-2.5-flash-image");

        let parts = &request.contents[0].parts;
        let inline = parts[0].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "aGVsbG8=");
        assert!(
            parts[1]
                .text
                .as_deref()
                .unwrap()
                .contains("factor of 4")
        );
        assert_eq!(request.generation_config.response_modalities, vec!["IMAGE"]);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_message() {
        let transport = FakeTransport::failing(|| UpscaleError::Transport {
            status: Some(503),
            message: "The model is overloaded".to_string(),
        });
        let client = UpscaleClient::with_transport(config(), transport);

        let err = client.upscale(&png(b"img"), ScaleFactor::X2).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("The model is overloaded"));
        assert!(message.contains("Gemini API"));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_missing_image_data_is_shape_error() {
        let shapes = [
            mock_empty_candidates_response(),
            mock_no_parts_response(),
            mock_text_only_response(),
        ];

        for shape in shapes {
            let response: GenerateContentResponse = serde_json::from_value(shape).unwrap();
            let client = UpscaleClient::with_transport(config(), FakeTransport::with(response));

            let err = client.upscale(&png(b"img"), ScaleFactor::X2).await.unwrap_err();

            assert!(matches!(err, UpscaleError::ResponseShape));
            assert_eq!(err.to_string(), "Upscaled image data not found in API response.");
        }
    }

    #[tokio::test]
    async fn test_oversize_image_never_reaches_transport() {
        let transport = FakeTransport::replying(mock_image_response("image/png", "AAAA"));
        let calls = transport.calls();
        let config = UpscaleClientConfig {
            max_image_bytes: 4,
            ..config()
        };
        let client = UpscaleClient::with_transport(config, transport);

        let err = client
            .upscale(&png(b"too big"), ScaleFactor::X2)
            .await
            .unwrap_err();

        assert!(matches!(err, UpscaleError::PayloadTooLarge { size: 7, max: 4 }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let client = UpscaleClient::with_transport(config(), EchoTransport::default());

        let first = png(b"first image");
        let second = ImageResource::new("second.webp", b"second image".to_vec(), MimeType::Webp);

        let (a, b) = tokio::join!(
            client.upscale(&first, ScaleFactor::X2),
            client.upscale(&second, ScaleFactor::X4)
        );

        let a = a.unwrap();
        let b = b.unwrap();
        assert_eq!(a.mime_type, "image/png");
        assert_eq!(a.decode().unwrap(), b"first image");
        assert_eq!(b.mime_type, "image/webp");
        assert_eq!(b.decode().unwrap(), b"second image");
    }
}
