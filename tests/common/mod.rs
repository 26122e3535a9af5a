// Shared test helpers
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use visionary_insights::error::{AppError, Result};
use visionary_insights::gemini::ModelClient;
use visionary_insights::models::{AnalysisRequest, AnalysisResponse};

pub const BOUNDARY: &str = "visionary-test-boundary";

/// Model client that replays canned replies and records every request.
pub struct StubClient {
    replies: Mutex<VecDeque<Result<AnalysisResponse>>>,
    requests: Mutex<Vec<AnalysisRequest>>,
    credential: bool,
}

impl StubClient {
    pub fn new(replies: Vec<Result<AnalysisResponse>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            credential: true,
        })
    }

    /// A client that reports no API key, like a server started without one.
    pub fn without_credential() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from([Err(AppError::MissingCredential)])),
            requests: Mutex::new(Vec::new()),
            credential: false,
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(AnalysisResponse::new(Some(text.to_string())))])
    }

    pub fn empty() -> Arc<Self> {
        Self::new(vec![Ok(AnalysisResponse::empty())])
    }

    pub fn failing() -> Arc<Self> {
        Self::new(vec![Err(AppError::GeminiApi("HTTP 500: boom".to_string()))])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for StubClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AnalysisResponse::empty()))
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    fn has_credential(&self) -> bool {
        self.credential
    }
}

pub fn png_bytes(tail: &[u8]) -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec();
    data.extend_from_slice(tail);
    data
}

pub fn jpeg_bytes(tail: &[u8]) -> Vec<u8> {
    let mut data = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0".to_vec();
    data.extend_from_slice(tail);
    data
}

/// A `multipart/form-data` body with one `image` file field.
pub fn multipart_body(file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{f}\"\r\nContent-Type: {c}\r\n\r\n",
        b = BOUNDARY,
        f = file_name,
        c = content_type,
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// What a browser sends when the trigger is pressed with no file chosen.
pub fn no_file_body() -> Vec<u8> {
    multipart_body("", "application/octet-stream", b"")
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
