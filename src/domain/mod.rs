//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - listing categories (`Category`)
//! - normalized records (`CanonicalListing`, `ModelTypeRecord`)
//! - query filters and per-category outcomes

pub mod types;

pub use types::*;
