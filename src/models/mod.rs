//! Data models for the analysis flow and the Gemini API.
//!
//! - `analysis`: uploaded images, assembled requests and report text.
//! - `gemini`: request/response bodies of the Generative Language API.

// Author: kelexine (https://github.com/kelexine)

pub mod analysis;
pub mod gemini;

pub use analysis::{AnalysisRequest, AnalysisResponse, UploadedImage};
pub use gemini::{GenerateContentRequest, GenerateContentResponse, Content, Part, SafetySetting};
