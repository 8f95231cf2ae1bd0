//! Reporting: per-category counts and the most recent listings.
//!
//! Formatting lives in `format` so the summary itself stays testable.

pub mod format;

pub use format::*;

use crate::domain::{CanonicalListing, Category, ListingSet};

pub const DEFAULT_RECENT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
    /// Share of the total in percent; 0 when the total is 0.
    pub share: f64,
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub counts: Vec<CategoryCount>,
    pub total: usize,
    /// Newest first by announcement date.
    pub recent: Vec<(Category, CanonicalListing)>,
}

/// Summarize a fetched listing set.
///
/// Categories appear in their fixed order. Listings with an empty
/// announcement date sort after dated ones; ties keep category order.
pub fn summarize(listings: &ListingSet, recent_n: usize) -> Summary {
    let total: usize = listings.values().map(Vec::len).sum();

    let counts = listings
        .iter()
        .map(|(&category, rows)| CategoryCount {
            category,
            count: rows.len(),
            share: if total == 0 {
                0.0
            } else {
                rows.len() as f64 * 100.0 / total as f64
            },
        })
        .collect();

    let mut all: Vec<(Category, &CanonicalListing)> = listings
        .iter()
        .flat_map(|(&category, rows)| rows.iter().map(move |l| (category, l)))
        .collect();
    all.sort_by(|a, b| b.1.announcement_date.cmp(&a.1.announcement_date));

    let recent = all
        .into_iter()
        .take(recent_n)
        .map(|(category, listing)| (category, listing.clone()))
        .collect();

    Summary { counts, total, recent }
}
