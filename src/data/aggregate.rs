//! Multi-category aggregation and the connectivity self-test.
//!
//! A category's failure (exhausted retries, malformed envelope) is logged and
//! turned into an empty result for that category; it never stops the others
//! and never escapes `fetch_comprehensive`.

use chrono::NaiveDate;
use tracing::{error, info};

use crate::data::executor::{ListingApi, parse_envelope};
use crate::data::normalize::{normalize_listings, normalize_models};
use crate::data::transport::Transport;
use crate::domain::{
    Category, CategoryFilter, ConnectivityProbe, FetchResult, FilterOp, ListingSet, ModelTypeRecord,
};
use crate::error::{FetchError, TransportError};
use crate::registry::{self, ANNOUNCEMENT_DATE_FIELD, ANNOUNCEMENT_NO_FIELD, HOUSE_MANAGE_NO_FIELD};

/// Category whose detail endpoint answers the connectivity probe.
pub const PROBE_CATEGORY: Category = Category::Apt;

pub struct Aggregator<T> {
    api: ListingApi<T>,
}

impl<T: Transport> Aggregator<T> {
    pub fn new(api: ListingApi<T>) -> Self {
        Self { api }
    }

    /// Fetch every registered category.
    pub fn fetch_comprehensive(&self, max_rows: u32, filters: &CategoryFilter) -> ListingSet {
        self.fetch_categories(&Category::ALL, max_rows, filters)
    }

    /// Fetch the given categories in order; failed categories come back empty.
    pub fn fetch_categories(&self, categories: &[Category], max_rows: u32, filters: &CategoryFilter) -> ListingSet {
        let mut out = ListingSet::new();
        for &category in categories {
            let listings = match self.fetch_category(category, max_rows, filters) {
                Ok(listings) => {
                    info!(category = category.id(), count = listings.len(), "Category fetched");
                    listings
                }
                Err(e) => {
                    error!(category = category.id(), error = %e, "Category fetch failed; continuing with empty result");
                    Vec::new()
                }
            };
            out.insert(category, listings);
        }

        let total: usize = out.values().map(Vec::len).sum();
        info!(categories = out.len(), total, "Comprehensive fetch finished");
        out
    }

    /// Fetch and normalize one category, surfacing its failure to the caller.
    pub fn fetch_category(&self, category: Category, max_rows: u32, filters: &CategoryFilter) -> FetchResult {
        let spec = registry::spec(category);
        let rows = self.api.fetch_rows(&spec.detail, max_rows, filters)?;
        Ok(normalize_listings(category, &rows))
    }

    /// Per-model-type rows of one listing.
    pub fn fetch_model_types(
        &self,
        category_id: &str,
        house_manage_no: &str,
        announcement_no: Option<&str>,
    ) -> Result<Vec<ModelTypeRecord>, FetchError> {
        let spec = registry::lookup(category_id)?;
        if house_manage_no.trim().is_empty() {
            return Err(FetchError::InvalidRequest {
                reason: "house management number is required".to_string(),
            });
        }

        let mut filters = CategoryFilter::new().with(HOUSE_MANAGE_NO_FIELD, FilterOp::Eq, house_manage_no.trim());
        if let Some(no) = announcement_no.map(str::trim).filter(|s| !s.is_empty()) {
            filters.insert(ANNOUNCEMENT_NO_FIELD, FilterOp::Eq, no);
        }

        let rows = self
            .api
            .fetch_rows(&spec.models, spec.models.max_page_size, &filters)?;
        Ok(normalize_models(spec.category, &rows))
    }

    /// One page-1/size-1 request, no retry.
    pub fn test_connection(&self) -> ConnectivityProbe {
        let endpoint = &registry::spec(PROBE_CATEGORY).detail;
        let query = self.api.build_query(1, 1, &CategoryFilter::new());

        let resp = match self.api.send_once(endpoint.path, &query) {
            Ok(resp) => resp,
            Err(TransportError::Timeout(detail)) => {
                return ConnectivityProbe::failure(format!("Connection timed out: {detail}"));
            }
            Err(TransportError::Connect(detail)) => {
                return ConnectivityProbe::failure(format!("Connection error: {detail}"));
            }
            Err(other) => return ConnectivityProbe::failure(format!("Request error: {other}")),
        };

        if resp.status != 200 {
            return ConnectivityProbe::failure(format!("HTTP error: status {}", resp.status));
        }

        match parse_envelope(endpoint.path, &resp) {
            Ok(envelope) if envelope.current_count.is_some() => ConnectivityProbe::success(),
            Ok(_) => ConnectivityProbe::failure("Unexpected response: missing `currentCount`"),
            Err(e) => ConnectivityProbe::failure(format!("Response parse error: {e}")),
        }
    }
}

/// `GTE`/`LTE` conditions on the announcement date for the dates given.
pub fn build_date_filter(start: Option<NaiveDate>, end: Option<NaiveDate>) -> CategoryFilter {
    let mut filter = CategoryFilter::new();
    if let Some(start) = start {
        filter.insert(ANNOUNCEMENT_DATE_FIELD, FilterOp::Gte, start.format("%Y-%m-%d").to_string());
    }
    if let Some(end) = end {
        filter.insert(ANNOUNCEMENT_DATE_FIELD, FilterOp::Lte, end.format("%Y-%m-%d").to_string());
    }
    filter
}
