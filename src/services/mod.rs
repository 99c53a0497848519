// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod enrichment_service;
pub mod extraction_service;
pub mod google_maps_client;
pub mod search_service;
pub mod workbook;

pub use enrichment_service::*;
pub use extraction_service::*;
pub use google_maps_client::*;
pub use search_service::*;
pub use workbook::*;
