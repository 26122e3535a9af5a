// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use visionary_insights::error::AppError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        AppError::Config("bad file".to_string()),
        AppError::MissingCredential,
        AppError::GeminiApi("API error".to_string()),
        AppError::TooManyRequests("Rate limited".to_string()),
        AppError::ServiceUnavailable("Service down".to_string()),
        AppError::UnsupportedFormat("scan.gif".to_string()),
        AppError::InvalidRequest("Bad request".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_missing_credential_message() {
    let error = AppError::MissingCredential;
    assert!(error.to_string().contains("API key"));
    assert_eq!(error.kind(), "authentication_error");
}

#[test]
fn test_unsupported_format_error() {
    let error = AppError::UnsupportedFormat("scan.bmp".to_string());
    assert!(format!("{}", error).contains("scan.bmp"));
    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_upstream_errors_map_to_gateway_statuses() {
    assert_eq!(
        AppError::GeminiApi("HTTP 500".to_string()).into_response().status(),
        StatusCode::BAD_GATEWAY
    );
    assert_eq!(
        AppError::TooManyRequests("quota".to_string()).into_response().status(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        AppError::ServiceUnavailable("down".to_string()).into_response().status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[test]
fn test_config_error_is_internal() {
    let error = AppError::Config("instruction text is empty".to_string());
    assert!(error.to_string().contains("instruction text is empty"));
    assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}
