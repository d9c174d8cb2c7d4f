//! Image handles produced by the media picker and consumed by uploads.

use std::fmt;
use std::path::PathBuf;

/// Where the image bytes live.
#[derive(Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// An image chosen by the user, plus the name shown in the conversation.
#[derive(Clone)]
pub struct ImageHandle {
    source: ImageSource,
    display_name: String,
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            ImageSource::Path(path) => format!("path({})", path.display()),
            ImageSource::Bytes(bytes) => format!("bytes({})", bytes.len()),
        };
        f.debug_struct("ImageHandle")
            .field("source", &source)
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl ImageHandle {
    /// Handle to an image on disk. The display name is the file name, or a
    /// timestamped fallback when the path has none.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .map(String::from)
            .unwrap_or_else(fallback_name);
        Self {
            source: ImageSource::Path(path),
            display_name,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            source: ImageSource::Bytes(bytes),
            display_name: if display_name.trim().is_empty() {
                fallback_name()
            } else {
                display_name
            },
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.display_name = name;
        }
        self
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// MIME type guessed from the display name's extension.
    pub fn mime_type(&self) -> &'static str {
        mime_for(&self.display_name)
    }

    /// Load the image bytes.
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            ImageSource::Path(path) => tokio::fs::read(path).await,
            ImageSource::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

fn fallback_name() -> String {
    format!("image_{}.jpg", chrono::Utc::now().timestamp_millis())
}

pub(crate) fn mime_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "image/jpeg",
    }
}
