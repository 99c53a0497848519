// src/services/search_service.rs
// DOCUMENTATION: Paginated text search
// PURPOSE: Follow Google continuation tokens until the result cap is reached

use crate::errors::ExtractorError;
use crate::models::{clamp_radius, Coordinates, PlaceSummary};
use crate::services::GoogleMapsClient;
use std::time::Duration;

/// Parameters for one paginated search
#[derive(Debug, Clone)]
pub struct SearchParams<'a> {
    pub query: &'a str,
    /// Optional bias coordinates from the geocoder
    pub bias: Option<Coordinates>,
    /// Requested radius in meters, clamped before sending
    pub radius: Option<f64>,
    /// Result cap (1-120)
    pub max_results: usize,
    /// Pause before each continuation request
    pub page_delay: Duration,
}

impl SearchParams<'_> {
    /// Radius actually sent upstream: clamped, and only when a bias exists
    pub fn effective_radius(&self) -> Option<u32> {
        self.bias.and(self.radius).map(clamp_radius)
    }
}

/// Loop state for pagination
#[derive(Debug, Default)]
struct PageCursor {
    accumulated: Vec<PlaceSummary>,
    next_page_token: Option<String>,
}

pub struct SearchService;

impl SearchService {
    /// Collect text search results across pages
    /// DOCUMENTATION: Requests the first page without a token, then keeps
    /// requesting while Google returns a token and the cap is not reached.
    /// Waits `page_delay` before every continuation request. Results keep
    /// upstream order and are not de-duplicated.
    ///
    /// # Returns
    /// At most `max_results` summaries
    pub async fn collect_places(
        client: &GoogleMapsClient,
        params: &SearchParams<'_>,
    ) -> Result<Vec<PlaceSummary>, ExtractorError> {
        let radius = params.effective_radius();
        let mut cursor = PageCursor::default();
        let mut page_number = 1;

        loop {
            let page = client
                .text_search(
                    params.query,
                    params.bias,
                    radius,
                    cursor.next_page_token.as_deref(),
                )
                .await?;

            log::info!(
                "Search page {} for '{}' returned {} results",
                page_number,
                params.query,
                page.places.len()
            );

            cursor.accumulated.extend(page.places);
            cursor.accumulated.truncate(params.max_results);
            cursor.next_page_token = page.next_page_token;

            if cursor.next_page_token.is_none() || cursor.accumulated.len() >= params.max_results {
                break;
            }

            tokio::time::sleep(params.page_delay).await;
            page_number += 1;
        }

        log::info!(
            "Search for '{}' collected {} places over {} page(s)",
            params.query,
            cursor.accumulated.len(),
            page_number
        );

        Ok(cursor.accumulated)
    }
}
