//! Prompt assembly.
//!
//! Pairs an uploaded image with the instruction block and the fixed
//! generation/safety parameter set. The assembler is built once at startup,
//! so every request it produces carries identical parameters.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::models::analysis::{AnalysisRequest, UploadedImage};
use crate::models::gemini::{GenerationConfig, SafetySetting};
use std::sync::Arc;
use tracing::info;

/// Section headings the report is asked to use, in order.
pub const REPORT_HEADINGS: [&str; 4] = [
    "Detailed Analysis",
    "Findings Report",
    "Recommendations and Next Steps",
    "Treatment Suggestions",
];

pub const DISCLAIMER: &str = "Consult with a Doctor before making any decisions.";

/// Default instruction block sent after the image.
pub const DEFAULT_INSTRUCTION: &str = r#"As a highly skilled medical practitioner specializing in image analysis, you are tasked with the following:

Your Responsibilities include:

1. Detailed Analysis: Thoroughly analyze each image, focusing on identifying any abnormal features.
2. Findings Report: Document all observed anomalies or signs of disease. Clearly articulate them.
3. Recommendations and Next Steps: Based on your analysis, suggest potential next steps, including further testing or referrals.
4. Treatment Suggestions: If appropriate, recommend possible treatment options or interventions.

Important Notes:

1. Scope of Response: Only respond if the image pertains to human health issues.
2. Clarity of Image: In cases where the image quality impedes clear analysis, note that carefully.
3. Disclaimer: Accompany your analysis with the disclaimer: "Consult with a Doctor before making any decisions."
4. Your insights are invaluable in guiding clinical decisions. Please proceed with the analysis thoughtfully.

Please provide me an output response with these 4 headings:

1. Detailed Analysis
2. Findings Report
3. Recommendations and Next Steps
4. Treatment Suggestions
"#;

/// Builds [`AnalysisRequest`]s with a shared, fixed parameter set.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    instruction: Arc<str>,
    generation: GenerationConfig,
    safety: Arc<[SafetySetting]>,
}

impl PromptAssembler {
    pub fn new(
        instruction: impl Into<Arc<str>>,
        generation: GenerationConfig,
        safety: Vec<SafetySetting>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            generation,
            safety: safety.into(),
        }
    }

    /// Build from configuration, reading `prompt.instruction_path` if set.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let instruction = match &config.prompt.instruction_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                info!("Loaded instruction from {}", path);
                text
            }
            None => config.prompt.instruction.clone(),
        };

        if instruction.trim().is_empty() {
            return Err(AppError::Config("instruction text is empty".to_string()));
        }

        Ok(Self::new(
            instruction,
            config.generation.into(),
            config.safety.settings.clone(),
        ))
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn assemble(&self, image: UploadedImage) -> AnalysisRequest {
        AnalysisRequest::new(
            image,
            Arc::clone(&self.instruction),
            self.generation.clone(),
            Arc::clone(&self.safety),
        )
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        let config = AppConfig::default();
        Self::new(
            DEFAULT_INSTRUCTION,
            config.generation.into(),
            config.safety.settings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gemini::Part;
    use bytes::Bytes;
    use std::io::Write;

    fn png(tail: &'static [u8]) -> UploadedImage {
        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        data.extend_from_slice(tail);
        UploadedImage::new("scan.png", Some("image/png"), Bytes::from(data)).unwrap()
    }

    #[test]
    fn test_default_instruction_names_headings_and_disclaimer() {
        for heading in REPORT_HEADINGS {
            assert!(DEFAULT_INSTRUCTION.contains(heading), "missing heading {}", heading);
        }
        assert!(DEFAULT_INSTRUCTION.contains(DISCLAIMER));
    }

    #[test]
    fn test_payload_is_image_then_instruction() {
        let request = PromptAssembler::default().assemble(png(b"abc")).to_gemini();

        assert_eq!(request.contents.len(), 1);
        let parts = &request.contents[0].parts;
        assert_eq!(parts.len(), 2);
        match &parts[0] {
            Part::InlineData { inline_data } => assert_eq!(inline_data.mime_type, "image/png"),
            other => panic!("expected inline data first, got {:?}", other),
        }
        assert_eq!(parts[1].as_text(), Some(DEFAULT_INSTRUCTION));
    }

    #[test]
    fn test_wire_parameters_match_defaults() {
        let request = PromptAssembler::default().assemble(png(b"")).to_gemini();
        let json = serde_json::to_value(&request).unwrap();

        let generation = &json["generationConfig"];
        assert_eq!(generation["topK"], 32);
        assert_eq!(generation["topP"], 1.0);
        assert_eq!(generation["maxOutputTokens"], 4096);
        assert!((generation["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);

        let safety = json["safetySettings"].as_array().unwrap();
        assert_eq!(safety.len(), 4);
        assert!(safety.iter().all(|s| s["threshold"] == "BLOCK_MEDIUM_AND_ABOVE"));
    }

    #[test]
    fn test_instruction_can_come_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Describe the image.").unwrap();

        let mut config = AppConfig::default();
        config.prompt.instruction_path = Some(file.path().to_string_lossy().to_string());

        let assembler = PromptAssembler::from_config(&config).unwrap();
        assert_eq!(assembler.instruction(), "Describe the image.");
    }

    #[test]
    fn test_blank_instruction_is_rejected() {
        let mut config = AppConfig::default();
        config.prompt.instruction = "   ".to_string();
        assert!(PromptAssembler::from_config(&config).is_err());
    }
}
