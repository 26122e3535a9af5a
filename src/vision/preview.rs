// Inline image preview
// Author: kelexine (https://github.com/kelexine)

use super::models::ImageFormat;
use base64::Engine;

/// Width of the rendered preview, in CSS pixels.
pub const PREVIEW_WIDTH: u32 = 300;

pub const PREVIEW_CAPTION: &str = "Uploaded Image Preview";

/// A bounded-size preview of the uploaded image, embedded as a data URI.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub src: String,
    pub caption: &'static str,
    pub width: u32,
}

impl Preview {
    /// Building a preview never decodes the image, so it cannot fail.
    pub fn new(format: ImageFormat, data: &[u8]) -> Self {
        Self {
            src: data_uri(format, data),
            caption: PREVIEW_CAPTION,
            width: PREVIEW_WIDTH,
        }
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_uri(format: ImageFormat, data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        format.mime_type(),
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}
