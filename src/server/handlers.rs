// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::analysis::{Outcome, RawUpload};
use crate::error::{AppError, Result};
use crate::ui::{
    self, FAILURE_MESSAGE, MISSING_IMAGE_WARNING, REPORT_HEADING, UNREADABLE_UPLOAD_WARNING,
};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Name of the file field in the upload form.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// JSON rendition of one submit.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisReply {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Outcome> for AnalysisReply {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Report(text) => Self {
                status: "report".to_string(),
                heading: Some(REPORT_HEADING.to_string()),
                text: Some(text),
                message: None,
            },
            Outcome::NoAnalysis => Self::notice("failure", FAILURE_MESSAGE.to_string()),
            Outcome::MissingImage => Self::notice("warning", MISSING_IMAGE_WARNING.to_string()),
            Outcome::UnreadableUpload => {
                Self::notice("warning", UNREADABLE_UPLOAD_WARNING.to_string())
            }
            Outcome::UnsupportedFormat(detail) => {
                Self::notice("warning", format!("Unsupported file type: {}", detail))
            }
        }
    }
}

impl AnalysisReply {
    fn notice(status: &str, message: String) -> Self {
        Self {
            status: status.to_string(),
            heading: None,
            text: None,
            message: Some(message),
        }
    }
}

pub async fn index_handler() -> Html<String> {
    Html(ui::render_index())
}

/// Handler for the page form submit. An unreadable body still renders the
/// page, with a warning in the result region.
pub async fn analyze_page_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Html<String> {
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await,
        Err(rejection) => Err(AppError::InvalidRequest(rejection.body_text())),
    };

    let submission = match upload {
        Ok(upload) => state.analyzer.submit(upload, "page").await,
        Err(e) => state.analyzer.reject(&e, "page"),
    };
    Html(ui::render_submission(&submission))
}

/// Handler for /api/analyze, the scriptable twin of the page submit
pub async fn analyze_api_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReply>> {
    let upload = read_upload(multipart).await?;
    let submission = state.analyzer.submit(upload, "api").await;
    Ok(Json(AnalysisReply::from(submission.outcome)))
}

/// Pull the `image` field out of a multipart body. Other fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<Option<RawUpload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            debug!("Ignoring form field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Failed to read upload: {}", e)))?;

        return Ok(Some(RawUpload {
            file_name,
            content_type,
            data,
        }));
    }

    Ok(None)
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;
    let client = state.analyzer.client();

    let credential_check = if client.has_credential() {
        HealthCheck {
            status: "ok".to_string(),
            message: "API key configured".to_string(),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: "No API key configured; analyses will fail".to_string(),
        }
    };
    checks.insert("credential".to_string(), credential_check);

    checks.insert(
        "model".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: client.model().to_string(),
        },
    );

    checks.insert(
        "configuration".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("API base: {}", state.config.gemini.api_base_url),
        },
    );

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}
