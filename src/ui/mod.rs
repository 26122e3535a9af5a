//! Server-rendered single page: upload control, preview, trigger, result.
//!
//! # Submodules
//!
//! - `page`: The page shell and the result region.
//! - `report`: Markdown rendering of the model's report.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod page;
pub mod report;

pub use page::{render_index, render_submission};

pub const TITLE: &str = "Visionary Insights";
pub const SUBTITLE: &str = "AI-Powered Medical Imaging Assistant";
pub const INTRO: &str = "Upload a medical image and receive detailed clinical insights in seconds. \
This tool is powered by Gemini and trained to assist in diagnostics. \
Please consult a physician before making any decisions.";
pub const UPLOAD_LABEL: &str = "Upload your medical image";
pub const SUBMIT_LABEL: &str = "Generate the Analysis";
pub const BUSY_TEXT: &str = "Running image diagnostics...";
pub const REPORT_HEADING: &str = "Here is the analysis based on your image:";
pub const FAILURE_MESSAGE: &str = "No response was generated. Please try again.";
pub const MISSING_IMAGE_WARNING: &str = "Please upload a medical image before generating the analysis.";
pub const UNREADABLE_UPLOAD_WARNING: &str = "The upload could not be read. Please choose the image again.";
