//! Input/output helpers.
//!
//! - CSV export of a fetched listing set (`export`)
//! - JSON snapshot read/write (`snapshot`)

pub mod export;
pub mod snapshot;

pub use export::*;
pub use snapshot::*;
