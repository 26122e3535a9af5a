// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::GeminiClient;

use crate::error::Result;
use crate::models::analysis::{AnalysisRequest, AnalysisResponse};
use async_trait::async_trait;

/// The single outbound call behind an analysis.
///
/// Implemented by [`GeminiClient`]; tests substitute stubs.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Perform one call. Any failure is returned, never retried.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse>;

    /// Name of the model that serves the call.
    fn model(&self) -> &str;

    /// Whether a credential is available to the client.
    fn has_credential(&self) -> bool {
        true
    }
}
