// src/services/google_maps_client.rs
// DOCUMENTATION: Google Maps Platform client
// PURPOSE: Geocoding, Places Text Search and Place Details calls

use crate::errors::ExtractorError;
use crate::models::{Coordinates, GeocodeResult, PlaceDetail, PlaceSummary};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// Field mask for Place Details. Only these fields are billed and returned.
pub const DETAIL_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,international_phone_number,website,rating,user_ratings_total,types,geometry/location,opening_hours/open_now,business_status";

/// Google Maps API client
/// DOCUMENTATION: Holds the shared HTTP client, API key and service root.
/// The base URL is injectable so tests can point it at a mock server.
pub struct GoogleMapsClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Maps API key
    api_key: String,
    /// Root URL, e.g. https://maps.googleapis.com/maps/api
    base_url: String,
}

/// Response from the Geocoding API
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeEntry>,
    pub status: String,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeEntry {
    pub geometry: GoogleGeometry,
}

/// Response from Places Text Search
/// DOCUMENTATION: One page of results plus an optional continuation token
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    #[serde(default)]
    pub results: Vec<GoogleSearchResult>,
    pub status: String,
    /// Present when more results can be requested
    pub next_page_token: Option<String>,
    /// Error message (if status is not OK)
    pub error_message: Option<String>,
}

/// Individual text search hit
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSearchResult {
    /// Empty when Google omits it; such hits are dropped from the page
    #[serde(default)]
    pub place_id: String,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    /// Short address, returned instead of formatted_address for some queries
    pub vicinity: Option<String>,
}

/// Response from Place Details
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub result: Option<GooglePlaceDetail>,
    pub status: String,
    pub error_message: Option<String>,
}

/// Place Details payload restricted to DETAIL_FIELDS
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GooglePlaceDetail {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    /// Phone number (formatted for local use)
    pub formatted_phone_number: Option<String>,
    /// Phone number (international format)
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub types: Vec<String>,
    pub geometry: Option<GoogleGeometry>,
    pub opening_hours: Option<GoogleOpeningHours>,
    /// OPERATIONAL, CLOSED_TEMPORARILY, CLOSED_PERMANENTLY
    pub business_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleGeometry {
    pub location: Option<GoogleLocation>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GoogleLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleOpeningHours {
    pub open_now: Option<bool>,
}

/// One normalized page of text search results
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub places: Vec<PlaceSummary>,
    pub next_page_token: Option<String>,
}

impl GoogleLocation {
    fn to_coordinates(self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

impl GoogleSearchResult {
    /// Normalize a search hit into a PlaceSummary
    pub fn to_summary(&self) -> PlaceSummary {
        PlaceSummary {
            id: self.place_id.clone(),
            name: self.name.clone().unwrap_or_default(),
            address: self
                .formatted_address
                .clone()
                .or_else(|| self.vicinity.clone())
                .unwrap_or_default(),
        }
    }
}

impl GooglePlaceDetail {
    /// Merge a details payload with the summary it was requested for
    /// DOCUMENTATION: The record keeps the summary's identifier; name and
    /// address fall back to the summary when details omit them
    pub fn into_place_detail(self, summary: &PlaceSummary) -> PlaceDetail {
        PlaceDetail {
            id: summary.id.clone(),
            name: self.name.unwrap_or_else(|| summary.name.clone()),
            address: self
                .formatted_address
                .unwrap_or_else(|| summary.address.clone()),
            phone: self.formatted_phone_number,
            international_phone: self.international_phone_number,
            website: self.website,
            rating: self.rating,
            review_count: self.user_ratings_total,
            types: self.types,
            coordinates: self
                .geometry
                .and_then(|g| g.location)
                .map(GoogleLocation::to_coordinates),
            open_now: self.opening_hours.and_then(|h| h.open_now),
            status: self.business_status,
        }
    }
}

impl GoogleMapsClient {
    /// Create new Google Maps API client
    /// DOCUMENTATION: `timeout` bounds every individual outbound call
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, ExtractorError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("places-extractor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ExtractorError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a free-text location to coordinates
    /// DOCUMENTATION: Returns the first match, or None when Google finds nothing
    /// or answers with something unparseable. Only transport failures and
    /// non-2xx responses are errors.
    pub async fn geocode(&self, address: &str) -> Result<Option<GeocodeResult>, ExtractorError> {
        let response = self
            .get("geocode/json", &[("address", address.to_string())])
            .await?;

        let body = response.text().await.map_err(|e| {
            log::error!("Failed to read geocoding response: {}", e);
            ExtractorError::Upstream(format!("Geocoding request failed: {}", e))
        })?;

        let api_response: GeocodeResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("Unparseable geocoding response for '{}': {}", address, e);
                return Ok(None);
            }
        };

        if api_response.status != "OK" {
            log::info!(
                "Geocoding '{}' returned status {}{}",
                address,
                api_response.status,
                api_response
                    .error_message
                    .as_deref()
                    .map(|m| format!(": {}", m))
                    .unwrap_or_default()
            );
            return Ok(None);
        }

        Ok(api_response
            .results
            .into_iter()
            .next()
            .and_then(|entry| entry.geometry.location)
            .map(GoogleLocation::to_coordinates))
    }

    /// Fetch one page of text search results
    /// DOCUMENTATION: `radius` is only sent together with `bias`.
    /// ZERO_RESULTS is an empty page; every other non-OK status is fatal.
    ///
    /// # Arguments
    /// * `query` - Free-text search
    /// * `bias` - Optional coordinates to weight results towards
    /// * `radius` - Bias radius in meters, already clamped
    /// * `page_token` - Continuation token from the previous page
    pub async fn text_search(
        &self,
        query: &str,
        bias: Option<Coordinates>,
        radius: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<SearchPage, ExtractorError> {
        let mut params = vec![("query", query.to_string())];

        if let Some(coords) = bias {
            params.push(("location", format!("{},{}", coords.lat, coords.lng)));
            if let Some(r) = radius {
                params.push(("radius", r.to_string()));
            }
        }

        if let Some(token) = page_token {
            params.push(("pagetoken", token.to_string()));
        }

        let response = self.get("place/textsearch/json", &params).await?;

        let api_response: TextSearchResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse text search response: {}", e);
            ExtractorError::Upstream(format!("Parse error: {}", e))
        })?;

        match api_response.status.as_str() {
            "OK" | "ZERO_RESULTS" => {
                let places = api_response
                    .results
                    .iter()
                    .filter(|hit| {
                        if hit.place_id.is_empty() {
                            log::warn!(
                                "Skipping search hit without place_id: {}",
                                hit.name.as_deref().unwrap_or("<unnamed>")
                            );
                            return false;
                        }
                        true
                    })
                    .map(GoogleSearchResult::to_summary)
                    .collect();

                Ok(SearchPage {
                    places,
                    next_page_token: api_response.next_page_token.filter(|t| !t.is_empty()),
                })
            }
            other => {
                let msg = api_response
                    .error_message
                    .unwrap_or_else(|| format!("Places search failed with status {}", other));
                log::error!("Text search status {}: {}", other, msg);
                Err(ExtractorError::Upstream(msg))
            }
        }
    }

    /// Get detail fields for a single place
    /// DOCUMENTATION: Ok(None) when Google reports ZERO_RESULTS or NOT_FOUND
    pub async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<Option<GooglePlaceDetail>, ExtractorError> {
        let params = [
            ("place_id", place_id.to_string()),
            ("fields", DETAIL_FIELDS.to_string()),
        ];

        let response = self.get("place/details/json", &params).await?;

        let api_response: DetailsResponse = response
            .json()
            .await
            .map_err(|e| ExtractorError::Upstream(format!("Parse error: {}", e)))?;

        match api_response.status.as_str() {
            "OK" => Ok(api_response.result),
            "ZERO_RESULTS" | "NOT_FOUND" => Ok(None),
            other => Err(ExtractorError::Upstream(
                api_response
                    .error_message
                    .unwrap_or_else(|| format!("Details status: {}", other)),
            )),
        }
    }

    /// Issue a GET against `{base_url}/{endpoint}` with the API key appended
    /// DOCUMENTATION: Maps transport failures and non-2xx statuses to Upstream
    async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Response, ExtractorError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        log::debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                log::error!("Google Maps request to {} failed: {}", endpoint, e);
                ExtractorError::Upstream(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google Maps API error {} on {}: {}", status, endpoint, body);
            return Err(ExtractorError::Upstream(format!(
                "API error {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}
