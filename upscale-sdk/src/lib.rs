// ABOUTME: Upscale SDK library providing a typed client for Gemini image upscaling
// ABOUTME: Includes image sources, base64 encoding, request building, and transport abstraction

pub mod builder;
pub mod client;
pub mod constants;
pub mod encoder;
pub mod error;
pub mod image;
pub mod transport;
pub mod wire;

mod test_helpers;

pub use builder::UpscaleClientConfig;
pub use client::UpscaleClient;
pub use encoder::{EncodedImage, Encoder};
pub use error::{ErrorKind, UpscaleError};
pub use image::{ImageFile, ImageResource, ImageSource, MimeType, ScaleFactor, UpscaleResult};
pub use transport::{HttpTransport, ImageGenerationTransport};

pub type Result<T> = std::result::Result<T, UpscaleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use mockito::Matcher;
    use secrecy::SecretString;

    #[test]
    fn test_upscale_client_creation() {
        let client = UpscaleClient::builder()
            .api_key(Some(SecretString::new(
                "test_api_key".to_string().into_boxed_str(),
            )))
            .build();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_upscale_against_mock_server() {
        let mut server = mock_gemini_server().await;
        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.5-flash-image:generateContent",
            )
            .match_header("x-goog-api-key", "test-api-key")
            .match_body(Matcher::Regex("factor of 4".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(mock_image_response("image/png", "UE5H").to_string())
            .expect(1)
            .create_async()
            .await;

        let client = UpscaleClient::builder()
            .api_key(Some(test_api_key()))
            .base_url(Some(server.url()))
            .build()
            .unwrap();

        let image = ImageResource::new("cat.png", b"cat".to_vec(), MimeType::Png);
        let result = client.upscale(&image, ScaleFactor::X4).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.to_data_uri(), "data:image/png;base64,UE5H");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_http_request() {
        let mut server = mock_gemini_server().await;
        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.5-flash-image:generateContent",
            )
            .expect(0)
            .create_async()
            .await;

        let client = UpscaleClient::builder()
            .base_url(Some(server.url()))
            .build()
            .unwrap();

        let image = ImageResource::new("cat.png", b"cat".to_vec(), MimeType::Png);
        let err = client.upscale(&image, ScaleFactor::X2).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api() {
        let api_key = std::env::var("GEMINI_API_KEY")
            .expect("GEMINI_API_KEY must be set for integration tests");

        let client = UpscaleClient::builder()
            .api_key(Some(SecretString::new(api_key.into_boxed_str())))
            .build()
            .expect("Failed to create client");

        // 1x1 transparent PNG
        let png = vec![
            0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
            0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78,
            0x9c, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00,
            0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
        ];
        let image = ImageResource::new("pixel.png", png, MimeType::Png);
        let result = client.upscale(&image, ScaleFactor::X2).await;

        assert!(result.is_ok(), "Upscale should succeed with valid API key");
        assert!(result.unwrap().to_data_uri().starts_with("data:image/"));
    }
}
