// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{gather_metrics, GEMINI_API_CALLS, GEMINI_API_DURATION, SUBMISSIONS_TOTAL};

/// Helper to record the outcome of one submit
pub fn record_submission(surface: &str, outcome: &str) {
    SUBMISSIONS_TOTAL.with_label_values(&[surface, outcome]).inc();
}

/// Helper to record Gemini API call metrics
pub fn record_gemini_call(model: &str, status_code: u16, duration_secs: f64) {
    GEMINI_API_CALLS
        .with_label_values(&[model, &status_code.to_string()])
        .inc();

    GEMINI_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}
