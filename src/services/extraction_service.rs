// src/services/extraction_service.rs
// DOCUMENTATION: Extraction pipeline orchestration
// PURPOSE: Geocode -> paginated search -> enrichment -> workbook, in strict sequence

use crate::errors::ExtractorError;
use crate::models::{Coordinates, ExtractionParams, PlaceDetail};
use crate::services::{
    generate_filename, EnrichmentService, GoogleMapsClient, SearchParams, SearchService,
    WorkbookBuilder,
};
use chrono::Utc;
use std::time::{Duration, Instant};

/// Finished extraction, ready to be sent as a download
#[derive(Debug)]
pub struct ExtractionResult {
    pub records: Vec<PlaceDetail>,
    pub workbook: Vec<u8>,
    pub filename: String,
}

impl ExtractionResult {
    pub fn total_records(&self) -> usize {
        self.records.len()
    }
}

pub struct ExtractionService;

impl ExtractionService {
    /// Run the full pipeline for one request
    /// DOCUMENTATION: Geocoding and search failures abort the request.
    /// Enrichment failures only drop the affected place.
    ///
    /// # Arguments
    /// * `client` - Google Maps client
    /// * `params` - Validated request
    /// * `page_delay` - Pause before each continuation search call
    pub async fn run(
        client: &GoogleMapsClient,
        params: &ExtractionParams,
        page_delay: Duration,
    ) -> Result<ExtractionResult, ExtractorError> {
        let start_time = Instant::now();

        log::info!(
            "Starting extraction: query='{}', bias={:?}, max_results={}",
            params.query,
            params.location_bias,
            params.max_results
        );

        let bias = Self::resolve_bias(client, params.location_bias.as_deref()).await?;

        let search = SearchParams {
            query: &params.query,
            bias,
            radius: params.radius,
            max_results: params.max_results,
            page_delay,
        };
        let summaries = SearchService::collect_places(client, &search).await?;

        let outcome = EnrichmentService::enrich_all(client, &summaries).await;

        let workbook = WorkbookBuilder::build(&outcome.records)?;
        let filename = generate_filename(Utc::now());

        log::info!(
            "Extraction for '{}' finished in {:.1}s: {} records -> {}",
            params.query,
            start_time.elapsed().as_secs_f64(),
            outcome.records.len(),
            filename
        );

        Ok(ExtractionResult {
            records: outcome.records,
            workbook,
            filename,
        })
    }

    /// Geocode the optional location bias
    async fn resolve_bias(
        client: &GoogleMapsClient,
        location: Option<&str>,
    ) -> Result<Option<Coordinates>, ExtractorError> {
        let Some(location) = location else {
            return Ok(None);
        };

        let bias = client.geocode(location).await?;
        match bias {
            Some(coords) => log::info!(
                "Location bias '{}' resolved to {},{}",
                location,
                coords.lat,
                coords.lng
            ),
            None => log::info!("Location bias '{}' did not resolve, searching unbiased", location),
        }

        Ok(bias)
    }
}
