// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod extraction;
pub mod place;

pub use extraction::*;
pub use place::*;
