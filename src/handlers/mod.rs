// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod extract;
pub mod health;

pub use extract::config as extract_config;
pub use health::config as health_config;
