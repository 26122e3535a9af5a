//! Axum-based HTTP server for Visionary Insights.
//!
//! Serves the single page, accepts uploads, and exposes health and metrics.
//!
//! # Components
//!
//! - `handlers`: Page, JSON analysis, health, and metrics endpoints.
//! - `middleware`: Request ID tracking.
//! - `routes`: The router that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{AnalysisReply, HealthResponse, HealthStatus, IMAGE_FIELD};
pub use routes::{create_router, AppState};
