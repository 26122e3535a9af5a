// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use super::ModelClient;
use crate::config::GeminiConfig;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::analysis::{AnalysisRequest, AnalysisResponse};
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::logging::sanitize;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};
use zeroize::Zeroizing;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini Generative Language API.
///
/// Sends exactly one `generateContent` request per call. There is no retry
/// or backoff: a failure is returned to the caller as-is.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    api_key: Option<Zeroizing<String>>,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A missing API key is not an error here; every call fails instead.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let api_key = config
            .api_key
            .as_ref()
            .filter(|key| !key.trim().is_empty())
            .map(|key| Zeroizing::new(key.trim().to_string()));

        if api_key.is_none() {
            warn!("No Gemini API key configured; analyses will fail until one is set");
        }

        let mut config = config.clone();
        config.api_key = None;

        Ok(Self {
            http_client,
            config,
            api_key,
        })
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Call Gemini `generateContent` API (blocking).
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self.api_key.as_ref().ok_or(AppError::MissingCredential)?;
        let url = self.endpoint();
        let model = self.config.model.as_str();
        debug!("Calling generateContent API for model: {}", model);

        let start = Instant::now();
        let sent = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, api_key.as_str())
            .json(request)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                metrics::record_gemini_call(model, 0, start.elapsed().as_secs_f64());
                return Err(AppError::GeminiApi(format!("HTTP error: {}", sanitize(&e.to_string()))));
            }
        };

        let status = response.status();
        metrics::record_gemini_call(model, status.as_u16(), start.elapsed().as_secs_f64());

        if !status.is_success() {
            let error_text = sanitize(&response.text().await.unwrap_or_default());
            let message = extract_error_message(&error_text).unwrap_or(error_text);
            error!("Gemini API error: HTTP {} - {}", status, message);
            return Err(match status.as_u16() {
                429 => AppError::TooManyRequests(format!("Gemini API quota exceeded: {}", message)),
                503 | 504 => AppError::ServiceUnavailable(format!("Upstream unavailable: {}", message)),
                _ => AppError::GeminiApi(format!("HTTP {}: {}", status, message)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::GeminiApi(format!("Failed to read response body: {}", e)))?;

        let gemini_response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!("Failed to parse Gemini response: {}", e);
                AppError::GeminiApi(format!("Response parsing error: {}", e))
            })?;

        if let Some(reason) = gemini_response.block_reason() {
            warn!("Gemini blocked the prompt: {}", reason);
        }

        debug!(
            finish_reason = gemini_response.finish_reason().unwrap_or("none"),
            "Received Gemini response"
        );
        Ok(gemini_response)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let response = self.generate_content(&request.to_gemini()).await?;
        Ok(AnalysisResponse::from(response))
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Extract error message from API response JSON
fn extract_error_message(response_text: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        error: Option<ErrorDetail>,
    }

    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
        status: Option<String>,
    }

    let error = serde_json::from_str::<ErrorResponse>(response_text).ok()?.error?;
    error.message.or(error.status)
}
