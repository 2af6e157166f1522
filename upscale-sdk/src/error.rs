// ABOUTME: Custom error types for the upscale SDK with user-friendly messages
// ABOUTME: Tags every failure with its kind where it is raised, plus remediation hints

use crate::constants::errors;
use thiserror::Error;

/// Broad failure class, fixed at the point the error is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Input,
    Io,
    Transport,
    ResponseShape,
    Unknown,
}

#[derive(Debug, Error)]
pub enum UpscaleError {
    #[error("{}", errors::MISSING_API_KEY)]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{text} (got '{0}')", text = errors::UNSUPPORTED_FILE_TYPE)]
    UnsupportedMimeType(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: u64, max: u64 },

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to upscale image with {service}: {message}", service = errors::SERVICE_NAME)]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("{}", errors::IMAGE_DATA_NOT_FOUND)]
    ResponseShape,

    #[error("{text} ({detail})", text = errors::UNKNOWN_FAILURE)]
    Unknown { detail: String },
}

impl UpscaleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UpscaleError::MissingApiKey | UpscaleError::Configuration(_) => {
                ErrorKind::Configuration
            }
            UpscaleError::UnsupportedMimeType(_) | UpscaleError::PayloadTooLarge { .. } => {
                ErrorKind::Input
            }
            UpscaleError::Io(_) => ErrorKind::Io,
            UpscaleError::Transport { .. } => ErrorKind::Transport,
            UpscaleError::ResponseShape => ErrorKind::ResponseShape,
            UpscaleError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            UpscaleError::MissingApiKey => Some(
                "Get an API key from: https://aistudio.google.com/apikey\nThen set GEMINI_API_KEY or add api_key to your config file",
            ),
            UpscaleError::UnsupportedMimeType(_) => {
                Some("Supported formats: .png, .jpg, .jpeg, .webp")
            }
            UpscaleError::PayloadTooLarge { .. } => {
                Some("Resize or recompress the image, or raise max_image_mb in your config")
            }
            UpscaleError::Transport {
                status: Some(401 | 403),
                ..
            } => Some("Check that your API key is valid and has access to the image model"),
            UpscaleError::Transport {
                status: Some(429), ..
            } => Some("Quota exceeded. Wait a moment before trying again"),
            UpscaleError::Transport { status: None, .. } => {
                Some("Check your internet connection and try again")
            }
            UpscaleError::ResponseShape => {
                Some("The model returned no image. Try again or use a different image")
            }
            _ => None,
        }
    }

    pub(crate) fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        UpscaleError::Transport {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for UpscaleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout()
            || err.is_connect()
            || err.is_request()
            || err.is_redirect()
            || err.is_body()
            || err.is_decode()
        {
            UpscaleError::transport(None, err.to_string())
        } else if err.is_status() {
            UpscaleError::transport(err.status().map(|s| s.as_u16()), err.to_string())
        } else if err.is_builder() {
            UpscaleError::Configuration(err.to_string())
        } else {
            UpscaleError::Unknown {
                detail: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UpscaleError::MissingApiKey.to_string(),
            "API key not set. Please ensure it's configured correctly."
        );
        assert_eq!(
            UpscaleError::transport(Some(500), "Internal error").to_string(),
            "Failed to upscale image with Gemini API: Internal error"
        );
        assert_eq!(
            UpscaleError::ResponseShape.to_string(),
            "Upscaled image data not found in API response."
        );
        assert_eq!(
            UpscaleError::Unknown {
                detail: "weird".to_string()
            }
            .to_string(),
            "An unknown error occurred during image upscaling. (weird)"
        );
        assert_eq!(
            UpscaleError::PayloadTooLarge { size: 10, max: 5 }.to_string(),
            "Image too large: 10 bytes (max: 5 bytes)"
        );
        assert!(
            UpscaleError::UnsupportedMimeType("image/gif".to_string())
                .to_string()
                .contains("image/gif")
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(UpscaleError::MissingApiKey.kind(), ErrorKind::Configuration);
        assert_eq!(
            UpscaleError::Configuration("bad url".to_string()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            UpscaleError::PayloadTooLarge { size: 2, max: 1 }.kind(),
            ErrorKind::Input
        );
        assert_eq!(
            UpscaleError::Io(std::io::Error::other("gone")).kind(),
            ErrorKind::Io
        );
        assert_eq!(
            UpscaleError::transport(None, "down").kind(),
            ErrorKind::Transport
        );
        assert_eq!(UpscaleError::ResponseShape.kind(), ErrorKind::ResponseShape);
        assert_eq!(
            UpscaleError::Unknown {
                detail: String::new()
            }
            .kind(),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn test_help_text() {
        assert!(
            UpscaleError::MissingApiKey
                .help_text()
                .unwrap()
                .contains("GEMINI_API_KEY")
        );
        assert_eq!(
            UpscaleError::transport(Some(429), "quota").help_text(),
            Some("Quota exceeded. Wait a moment before trying again")
        );
        assert_eq!(
            UpscaleError::transport(None, "dns").help_text(),
            Some("Check your internet connection and try again")
        );
        assert_eq!(UpscaleError::transport(Some(400), "bad").help_text(), None);
        assert!(UpscaleError::ResponseShape.help_text().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: UpscaleError = io.into();
        assert!(matches!(err, UpscaleError::Io(_)));
        assert!(err.to_string().contains("no such file"));
    }
}
