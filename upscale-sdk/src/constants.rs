// ABOUTME: Centralized constants for the upscale SDK
// ABOUTME: Contains API endpoints, model defaults, payload limits, and error message text

/// Gemini API URLs
pub mod urls {
    /// Base URL for the Gemini generative language API
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

    /// API version path segment used for generateContent
    pub const GEMINI_API_VERSION: &str = "v1beta";

    /// Header carrying the API key
    pub const API_KEY_HEADER: &str = "x-goog-api-key";
}

/// Model selection
pub mod models {
    /// Image-capable model used for upscaling
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

    /// Response modality requested from the model
    pub const IMAGE_MODALITY: &str = "IMAGE";
}

/// Payload limits
pub mod limits {
    /// Largest raw image accepted before encoding (15 MiB, ~20 MiB once base64-encoded)
    pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 15 * 1024 * 1024;
}

/// Error handling constants
pub mod errors {
    /// Source named in transport error messages
    pub const SERVICE_NAME: &str = "Gemini API";

    pub const MISSING_API_KEY: &str =
        "API key not set. Please ensure it's configured correctly.";

    pub const IMAGE_DATA_NOT_FOUND: &str = "Upscaled image data not found in API response.";

    pub const UNSUPPORTED_FILE_TYPE: &str =
        "Invalid file type. Please upload a PNG, JPEG, or WEBP image.";

    pub const UNKNOWN_FAILURE: &str = "An unknown error occurred during image upscaling.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_constants() {
        assert!(urls::GEMINI_API_BASE.starts_with("https://"));
        assert_eq!(urls::GEMINI_API_VERSION, "v1beta");
        assert_eq!(urls::API_KEY_HEADER, "x-goog-api-key");
    }

    #[test]
    fn test_model_constants() {
        assert_eq!(models::DEFAULT_MODEL, "gemini-2.5-flash-image");
        assert_eq!(models::IMAGE_MODALITY, "IMAGE");
    }

    #[test]
    fn test_limit_constants() {
        assert_eq!(limits::DEFAULT_MAX_IMAGE_BYTES, 15_728_640);
        // Base64 output of the limit stays within the 20 MiB inline request ceiling
        assert!(limits::DEFAULT_MAX_IMAGE_BYTES.div_ceil(3) * 4 <= 20 * 1024 * 1024);
    }

    #[test]
    fn test_error_constants() {
        assert!(errors::IMAGE_DATA_NOT_FOUND.contains("not found"));
        assert!(errors::UNSUPPORTED_FILE_TYPE.contains("PNG, JPEG, or WEBP"));
        assert_eq!(errors::SERVICE_NAME, "Gemini API");
    }
}
