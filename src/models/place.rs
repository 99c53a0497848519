// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Request-scoped records produced by search and enrichment

/// Latitude/longitude pair
/// DOCUMENTATION: Used both as the geocoded search bias and as a place's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Result of resolving a free-text location. Absent when nothing matched.
pub type GeocodeResult = Coordinates;

/// Minimal place record produced by the text search stage
/// DOCUMENTATION: One entry per upstream search hit, duplicates included
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSummary {
    /// Google's place_id
    pub id: String,
    pub name: String,
    pub address: String,
}

/// Enriched place record
/// DOCUMENTATION: Built from a Place Details response for one PlaceSummary.
/// Optional fields stay None when Google does not report them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceDetail {
    /// Identifier of the summary this record was enriched from
    pub id: String,

    pub name: String,

    pub address: String,

    /// Phone number in local format
    pub phone: Option<String>,

    /// Phone number in international format
    pub international_phone: Option<String>,

    pub website: Option<String>,

    /// Average rating (1.0 - 5.0)
    pub rating: Option<f64>,

    /// Number of user ratings behind `rating`
    pub review_count: Option<u32>,

    /// Google place types (e.g., ["restaurant", "food"])
    pub types: Vec<String>,

    pub coordinates: Option<Coordinates>,

    /// Whether the place was open at lookup time
    pub open_now: Option<bool>,

    /// Business status (OPERATIONAL, CLOSED_TEMPORARILY, CLOSED_PERMANENTLY)
    pub status: Option<String>,
}

impl PlaceDetail {
    /// Phone number to display: local format first, then international, else empty
    pub fn display_phone(&self) -> &str {
        self.phone
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.international_phone.as_deref())
            .unwrap_or("")
    }
}
