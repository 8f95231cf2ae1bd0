//! Shared fetch pipeline: filters -> comprehensive fetch -> summary.
//!
//! Generic over the transport so the whole workflow runs against a mock.

use chrono::NaiveDate;

use crate::data::{Aggregator, Transport, build_date_filter};
use crate::domain::ListingSet;
use crate::error::AppError;
use crate::report::Summary;

/// Inputs of one `cheongyak fetch` run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub max_rows: u32,
    pub recent: usize,
}

impl FetchConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_rows == 0 {
            return Err(AppError::new(2, "max rows must be positive"));
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(AppError::new(
                2,
                format!("start date {start} is after end date {end}"),
            )),
            _ => Ok(()),
        }
    }
}

/// All computed outputs of a single fetch run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub listings: ListingSet,
    pub summary: Summary,
}

/// Execute the comprehensive fetch and summarize it.
pub fn run_fetch<T: Transport>(aggregator: &Aggregator<T>, config: &FetchConfig) -> Result<RunOutput, AppError> {
    config.validate()?;

    let filters = build_date_filter(config.start, config.end);
    let listings = aggregator.fetch_comprehensive(config.max_rows, &filters);
    let summary = crate::report::summarize(&listings, config.recent);

    Ok(RunOutput { listings, summary })
}
