// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    analyze_api_handler, analyze_page_handler, health_handler, index_handler, metrics_handler,
};
use super::middleware::{request_id_layers, trace_layer};
use crate::analysis::Analyzer;
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::ModelClient;
use crate::prompt::PromptAssembler;
use axum::extract::DefaultBodyLimit;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analyzer: Arc<Analyzer>,
}

pub fn create_router(config: AppConfig, client: Arc<dyn ModelClient>) -> Result<Router> {
    let assembler = PromptAssembler::from_config(&config)?;
    let max_body_bytes = config.server.max_body_bytes;

    let state = AppState {
        config: Arc::new(config),
        analyzer: Arc::new(Analyzer::new(assembler, client)),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/analyze", get(index_handler).post(analyze_page_handler))
        .route("/api/analyze", post(analyze_api_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        // The hosting layer, not the analysis flow, caps upload size
        .layer(DefaultBodyLimit::disable())
        .layer(tower_http::limit::RequestBodyLimitLayer::new(max_body_bytes))
        .layer(trace_layer())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
