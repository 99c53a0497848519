// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for the extraction pipeline

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every failure the extraction pipeline can surface to a caller.
/// Each variant maps to an HTTP status code and a `{ "error": ... }` body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// Required configuration (the Maps API key) is missing
    #[error("{0}")]
    Configuration(String),

    /// Caller supplied an unusable request
    #[error("{0}")]
    Validation(String),

    /// Geocoding, search or detail lookup failed upstream.
    /// The message is passed through from Google when one is supplied.
    #[error("{0}")]
    Upstream(String),

    #[error("Failed to build workbook: {0}")]
    Workbook(String),
}

/// Convert ExtractorError to HTTP response
/// DOCUMENTATION: Client-caused errors are 4xx, everything else is 5xx
impl ResponseError for ExtractorError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": self.to_string(),
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ExtractorError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExtractorError::Validation(_) => StatusCode::BAD_REQUEST,
            ExtractorError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ExtractorError::Workbook(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
