// src/models/extraction.rs
// DOCUMENTATION: Inbound extraction request and its normalized form
// PURPOSE: Validate and clamp caller input before any upstream call is made

use crate::errors::ExtractorError;
use serde::Deserialize;
use validator::Validate;

/// Default result cap when the caller does not send maxResults
pub const DEFAULT_MAX_RESULTS: usize = 40;

/// Hard upper bound on results per extraction
pub const MAX_RESULTS_LIMIT: usize = 120;

/// Smallest radius Google accepts, in meters
pub const MIN_RADIUS_M: f64 = 1.0;

/// Largest radius Google accepts for text search, in meters
pub const MAX_RADIUS_M: f64 = 50_000.0;

/// Request body for POST /api/extract
/// DOCUMENTATION: JSON field names are camelCase, matching the browser form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    /// Free-text search, e.g. "restaurants in New York"
    #[serde(default)]
    #[validate(length(max = 512))]
    pub query: String,

    /// Optional location used to bias results (geocoded first)
    #[validate(length(max = 512))]
    pub location_bias: Option<String>,

    /// Bias radius in meters, only used when the bias resolves
    pub radius: Option<f64>,

    /// Result cap (1-120), defaults to 40. Any number is accepted and clamped.
    pub max_results: Option<f64>,
}

/// Validated, trimmed and clamped request
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionParams {
    pub query: String,
    pub location_bias: Option<String>,
    pub radius: Option<f64>,
    pub max_results: usize,
}

impl ExtractionRequest {
    /// Validate the request and normalize it into ExtractionParams
    /// DOCUMENTATION: Rejects blank queries, trims text fields, and clamps
    /// maxResults into [1, 120] using `default_max` when it is absent
    pub fn into_params(self, default_max: usize) -> Result<ExtractionParams, ExtractorError> {
        if let Err(e) = self.validate() {
            return Err(ExtractorError::Validation(e.to_string()));
        }

        let query = self.query.trim();
        if query.is_empty() {
            return Err(ExtractorError::Validation("Query is required".to_string()));
        }

        let location_bias = self
            .location_bias
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(ExtractionParams {
            query: query.to_string(),
            location_bias,
            radius: self.radius.filter(|r| r.is_finite()),
            max_results: clamp_max_results(self.max_results, default_max),
        })
    }
}

/// Round and clamp a requested result cap into [1, MAX_RESULTS_LIMIT]
pub fn clamp_max_results(requested: Option<f64>, default_max: usize) -> usize {
    match requested.filter(|n| n.is_finite()) {
        Some(n) => n.round().clamp(1.0, MAX_RESULTS_LIMIT as f64) as usize,
        None => default_max.clamp(1, MAX_RESULTS_LIMIT),
    }
}

/// Clamp a radius into the range Google accepts
pub fn clamp_radius(radius: f64) -> u32 {
    radius.clamp(MIN_RADIUS_M, MAX_RADIUS_M).round() as u32
}
