//! Image decoding: turning a user-selected file into a displayable handle.
//!
//! DESIGN
//! ======
//! Decoding is the platform's job; the engine only sees the async
//! [`ImageDecoder`] trait. [`DataUrlDecoder`] is the bundled implementation:
//! it reads the file and embeds it as a `data:` URL, the same kind of source a
//! browser file reader hands back.
//!
//! ERROR HANDLING
//! ==============
//! Decode errors never escape to the session. Callers log them and leave the
//! affected face empty.

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::tile::ImageHandle;

/// A file offered to the editor, either for one face or as part of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name as presented by the picker, used for pairing.
    pub name: String,
    /// Where the content can be read from.
    pub path: PathBuf,
}

impl FileEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into() }
    }

    /// Entry named after the last component of `path`.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path: path.to_path_buf() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file is empty: {0}")]
    Empty(PathBuf),
    #[error("unsupported image type: {0}")]
    Unsupported(String),
}

/// Platform capability that turns a raw file into an embeddable image source.
#[async_trait::async_trait]
pub trait ImageDecoder: Send + Sync {
    /// Decode `file` into a displayable image handle.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the file cannot be read or is not an image.
    async fn decode(&self, file: &FileEntry) -> Result<ImageHandle, DecodeError>;
}

/// Reads files from disk and embeds them as base64 `data:` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlDecoder;

#[async_trait::async_trait]
impl ImageDecoder for DataUrlDecoder {
    async fn decode(&self, file: &FileEntry) -> Result<ImageHandle, DecodeError> {
        let mime = mime_for(&file.name).ok_or_else(|| DecodeError::Unsupported(file.name.clone()))?;
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|source| DecodeError::Io { path: file.path.clone(), source })?;
        if bytes.is_empty() {
            return Err(DecodeError::Empty(file.path.clone()));
        }
        Ok(ImageHandle::new(format!("data:{mime};base64,{}", STANDARD.encode(&bytes))))
    }
}

/// MIME type for an image file name, by extension.
#[must_use]
pub fn mime_for(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
