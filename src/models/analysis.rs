// Analysis domain types
// Author: kelexine (https://github.com/kelexine)

use crate::error::Result;
use crate::models::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
    SafetySetting,
};
use crate::vision::{ImageFormat, Preview};
use base64::Engine;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// An image received from the upload control, held for one interaction.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    file_name: String,
    format: ImageFormat,
    data: Bytes,
}

impl UploadedImage {
    /// Accept an upload if its format is one of the supported ones.
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, data: Bytes) -> Result<Self> {
        let file_name = file_name.into();
        let format = ImageFormat::resolve(&file_name, content_type, &data)?;
        Ok(Self {
            file_name,
            format,
            data,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Short SHA-256 prefix that identifies the upload in logs.
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(&self.data);
        hex::encode(&hash[..8])
    }

    pub fn preview(&self) -> Preview {
        Preview::new(self.format, &self.data)
    }
}

/// One image paired with the instruction and the fixed parameter set.
///
/// Built by [`crate::prompt::PromptAssembler`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    image: UploadedImage,
    instruction: Arc<str>,
    generation: GenerationConfig,
    safety: Arc<[SafetySetting]>,
}

impl AnalysisRequest {
    pub(crate) fn new(
        image: UploadedImage,
        instruction: Arc<str>,
        generation: GenerationConfig,
        safety: Arc<[SafetySetting]>,
    ) -> Self {
        Self {
            image,
            instruction,
            generation,
            safety,
        }
    }

    pub fn image(&self) -> &UploadedImage {
        &self.image
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }

    pub fn safety(&self) -> &[SafetySetting] {
        &self.safety
    }

    /// Wire payload: the image segment first, then the instruction block.
    pub fn to_gemini(&self) -> GenerateContentRequest {
        let image_part = Part::InlineData {
            inline_data: InlineData {
                mime_type: self.image.mime_type().to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(self.image.data()),
            },
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![image_part, Part::text(self.instruction.as_ref())],
            }],
            generation_config: Some(self.generation.clone()),
            safety_settings: self.safety.to_vec(),
        }
    }
}

/// Opaque report text, absent when the call produced nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResponse {
    text: Option<String>,
}

impl AnalysisResponse {
    pub fn new(text: Option<String>) -> Self {
        Self {
            text: text.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Non-empty report text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn into_text(self) -> Option<String> {
        self.text
    }
}

impl From<GenerateContentResponse> for AnalysisResponse {
    fn from(response: GenerateContentResponse) -> Self {
        Self::new(response.text())
    }
}
