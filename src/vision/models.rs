// Vision models and format sniffing
// Author: kelexine (https://github.com/kelexine)

use crate::error::{AppError, Result};
use std::path::Path;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// File extensions offered by the upload control.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Try to detect format from MIME type
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Try to detect format from a file name's extension
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Detect format from magic bytes at start of image data
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\xFF\xD8\xFF") {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else {
            None
        }
    }

    /// Decide the declared format of an upload.
    ///
    /// Magic bytes win, then the file extension, then the content type the
    /// browser sent. Content validation beyond that is left to the model API.
    pub fn resolve(file_name: &str, content_type: Option<&str>, data: &[u8]) -> Result<Self> {
        Self::sniff(data)
            .or_else(|| Self::from_file_name(file_name))
            .or_else(|| content_type.and_then(Self::from_mime_type))
            .ok_or_else(|| {
                AppError::UnsupportedFormat(format!(
                    "{} (accepted: {})",
                    if file_name.is_empty() { "upload" } else { file_name },
                    ACCEPTED_EXTENSIONS.join(", ")
                ))
            })
    }
}
