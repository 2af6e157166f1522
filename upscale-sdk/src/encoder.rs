// ABOUTME: Reads an image source and encodes its bytes as standard base64 text
// ABOUTME: Enforces the maximum accepted payload size before and after reading

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::constants::limits;
use crate::error::UpscaleError;
use crate::image::{ImageSource, MimeType};

/// Base64 text of an image plus the type it was read as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: MimeType,
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct Encoder {
    max_bytes: u64,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(limits::DEFAULT_MAX_IMAGE_BYTES)
    }
}

impl Encoder {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub async fn encode(&self, source: &dyn ImageSource) -> Result<EncodedImage, UpscaleError> {
        if let Some(size) = source.size_hint().await? {
            self.check_size(size)?;
        }

        // One byte past the limit is enough to detect oversize input
        let bytes = source.read(self.max_bytes.saturating_add(1)).await?;
        self.check_size(bytes.len() as u64)?;

        tracing::debug!(
            name = source.name(),
            mime_type = %source.mime_type(),
            bytes = bytes.len(),
            "encoding image"
        );

        Ok(EncodedImage {
            mime_type: source.mime_type(),
            data: encode_bytes(&bytes),
        })
    }

    fn check_size(&self, size: u64) -> Result<(), UpscaleError> {
        if size > self.max_bytes {
            return Err(UpscaleError::PayloadTooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
