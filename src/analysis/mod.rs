//! The submit flow: guard checks, one model call, outcome classification.
//!
//! Each submit is independent. Nothing from a previous submit, failed or
//! not, is kept by the [`Analyzer`].
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::error::AppError;
use crate::gemini::ModelClient;
use crate::metrics;
use crate::models::analysis::UploadedImage;
use crate::prompt::PromptAssembler;
use crate::vision::Preview;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// A file field as received from the upload form.
#[derive(Debug, Clone)]
pub struct RawUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl RawUpload {
    /// Browsers submit an empty, nameless part when no file was chosen.
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() && self.data.is_empty()
    }
}

/// What the page shows after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Trigger pressed with no file; no call was made.
    MissingImage,
    /// The file is not one of the accepted formats; no call was made.
    UnsupportedFormat(String),
    /// The model returned non-empty text.
    Report(String),
    /// The call failed or returned nothing.
    NoAnalysis,
    /// The request body could not be read as a form upload; no call was made.
    UnreadableUpload,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::MissingImage => "missing_image",
            Outcome::UnsupportedFormat(_) => "unsupported_format",
            Outcome::Report(_) => "report",
            Outcome::NoAnalysis => "no_analysis",
            Outcome::UnreadableUpload => "unreadable_upload",
        }
    }
}

/// Result of one submit: the preview of the accepted image, if any, and the outcome.
#[derive(Debug, Clone)]
pub struct Submission {
    pub preview: Option<Preview>,
    pub outcome: Outcome,
}

pub struct Analyzer {
    assembler: PromptAssembler,
    client: Arc<dyn ModelClient>,
}

impl Analyzer {
    pub fn new(assembler: PromptAssembler, client: Arc<dyn ModelClient>) -> Self {
        Self { assembler, client }
    }

    pub fn client(&self) -> &dyn ModelClient {
        self.client.as_ref()
    }

    /// Run one submit. At most one outbound call is made.
    pub async fn submit(&self, upload: Option<RawUpload>, surface: &str) -> Submission {
        let submission = self.run(upload).await;
        metrics::record_submission(surface, submission.outcome.label());
        submission
    }

    /// Record a submit whose body could not be read. No call is made.
    pub fn reject(&self, error: &AppError, surface: &str) -> Submission {
        warn!(error_type = error.kind(), "Unreadable upload: {}", error);
        metrics::record_submission(surface, Outcome::UnreadableUpload.label());
        Submission {
            preview: None,
            outcome: Outcome::UnreadableUpload,
        }
    }

    async fn run(&self, upload: Option<RawUpload>) -> Submission {
        let upload = match upload.filter(|u| !u.is_empty()) {
            Some(upload) => upload,
            None => {
                info!("Submit without an image; no analysis requested");
                return Submission {
                    preview: None,
                    outcome: Outcome::MissingImage,
                };
            }
        };

        let image = match UploadedImage::new(
            upload.file_name,
            upload.content_type.as_deref(),
            upload.data,
        ) {
            Ok(image) => image,
            Err(e) => {
                let detail = match e {
                    AppError::UnsupportedFormat(detail) => detail,
                    other => other.to_string(),
                };
                warn!("Rejected upload: {}", detail);
                return Submission {
                    preview: None,
                    outcome: Outcome::UnsupportedFormat(detail),
                };
            }
        };

        let preview = image.preview();
        let digest = image.digest();
        info!(
            image = %digest,
            mime_type = image.mime_type(),
            size_bytes = image.data().len(),
            model = self.client.model(),
            "Running image diagnostics"
        );

        let request = self.assembler.assemble(image);
        let start = Instant::now();
        let outcome = match self.client.analyze(&request).await {
            Ok(response) => match response.into_text() {
                Some(text) => Outcome::Report(text),
                None => {
                    warn!(image = %digest, "Model returned no text");
                    Outcome::NoAnalysis
                }
            },
            Err(e) => {
                warn!(image = %digest, error_type = e.kind(), "Analysis failed: {}", e);
                Outcome::NoAnalysis
            }
        };

        info!(
            image = %digest,
            outcome = outcome.label(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Analysis finished"
        );

        Submission {
            preview: Some(preview),
            outcome,
        }
    }
}
