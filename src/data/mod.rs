//! Listing service integration.
//!
//! - `transport`: HTTP seam (`reqwest` blocking client + scripted mock)
//! - `executor`: query building, bounded retry, envelope validation
//! - `normalize`: raw item -> canonical record
//! - `aggregate`: multi-category fetch, connectivity probe, date filters

pub mod aggregate;
pub mod executor;
pub mod normalize;
pub mod transport;

pub use aggregate::{Aggregator, build_date_filter};
pub use executor::{ListingApi, RetryPolicy};
pub use transport::{HttpTransport, Transport};

#[cfg(any(test, feature = "test-util"))]
pub use transport::MockTransport;
