// ABOUTME: Image data model: accepted MIME types, scale factors, image sources, and results
// ABOUTME: Sources are read asynchronously through the ImageSource trait; results are data-URIs

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::io::AsyncReadExt;

use crate::error::UpscaleError;

/// Image formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Png,
    Jpeg,
    Webp,
}

impl MimeType {
    pub const ALL: [MimeType; 3] = [MimeType::Png, MimeType::Jpeg, MimeType::Webp];

    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Png => "image/png",
            MimeType::Jpeg => "image/jpeg",
            MimeType::Webp => "image/webp",
        }
    }

    /// Resolve a MIME type from a file extension (case-insensitive, no leading dot)
    pub fn from_extension(ext: &str) -> Result<Self, UpscaleError> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(MimeType::Png),
            "jpg" | "jpeg" => Ok(MimeType::Jpeg),
            "webp" => Ok(MimeType::Webp),
            _ => Err(UpscaleError::UnsupportedMimeType(ext.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, UpscaleError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| UpscaleError::UnsupportedMimeType(path.display().to_string()))?;
        Self::from_extension(ext)
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MimeType {
    type Err = UpscaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(MimeType::Png),
            "image/jpeg" | "image/jpg" => Ok(MimeType::Jpeg),
            "image/webp" => Ok(MimeType::Webp),
            _ => Err(UpscaleError::UnsupportedMimeType(s.to_string())),
        }
    }
}

/// Requested output resolution multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleFactor {
    #[default]
    X2,
    X4,
}

impl ScaleFactor {
    pub fn factor(&self) -> u8 {
        match self {
            ScaleFactor::X2 => 2,
            ScaleFactor::X4 => 4,
        }
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

/// Anything that can hand the encoder an image's bytes
#[async_trait]
pub trait ImageSource: Send + Sync {
    fn mime_type(&self) -> MimeType;

    /// Display name, used for default output file names
    fn name(&self) -> &str;

    /// Byte length if it can be known without reading the payload
    async fn size_hint(&self) -> std::io::Result<Option<u64>> {
        Ok(None)
    }

    /// Read the payload, stopping after `limit` bytes
    async fn read(&self, limit: u64) -> std::io::Result<Vec<u8>>;
}

/// An image already held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResource {
    name: String,
    bytes: Vec<u8>,
    mime_type: MimeType,
}

impl ImageResource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, mime_type: MimeType) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime_type,
        }
    }
}

#[async_trait]
impl ImageSource for ImageResource {
    fn mime_type(&self) -> MimeType {
        self.mime_type
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn size_hint(&self) -> std::io::Result<Option<u64>> {
        Ok(Some(self.bytes.len() as u64))
    }

    async fn read(&self, limit: u64) -> std::io::Result<Vec<u8>> {
        let end = usize::try_from(limit).map_or(self.bytes.len(), |l| l.min(self.bytes.len()));
        Ok(self.bytes[..end].to_vec())
    }
}

/// An image on disk, read lazily when the request is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
    name: String,
    mime_type: MimeType,
}

impl ImageFile {
    /// Accepts the path only if its extension names a supported format
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, UpscaleError> {
        let path = path.into();
        let mime_type = MimeType::from_path(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self {
            path,
            name,
            mime_type,
        })
    }
}

#[async_trait]
impl ImageSource for ImageFile {
    fn mime_type(&self) -> MimeType {
        self.mime_type
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn size_hint(&self) -> std::io::Result<Option<u64>> {
        let metadata = tokio::fs::metadata(&self.path).await?;
        Ok(Some(metadata.len()))
    }

    // Metadata length is 0 for pipes and devices, so the read itself is bounded
    async fn read(&self, limit: u64) -> std::io::Result<Vec<u8>> {
        let file = tokio::fs::File::open(&self.path).await?;
        let mut bytes = Vec::new();
        file.take(limit).read_to_end(&mut bytes).await?;
        Ok(bytes)
    }
}

/// Enhanced image returned by the service, kept exactly as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpscaleResult {
    pub mime_type: String,
    pub data: String,
}

impl UpscaleResult {
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the base64 payload into raw image bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.data.as_bytes())
    }

    pub fn file_extension(&self) -> Option<&'static str> {
        match self.mime_type.to_ascii_lowercase().as_str() {
            "image/png" => Some("png"),
            "image/jpeg" | "image/jpg" => Some("jpg"),
            "image/webp" => Some("webp"),
            _ => None,
        }
    }
}

impl fmt::Display for UpscaleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}
