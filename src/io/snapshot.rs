//! Read/write listing snapshot JSON files.
//!
//! A snapshot is the portable form of one run: the category -> listings
//! mapping plus when it was generated, so a run can be consumed offline.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

use crate::domain::ListingSet;
use crate::error::AppError;

pub const SNAPSHOT_TOOL: &str = "cheongyak";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub tool: String,
    pub generated_at: DateTime<FixedOffset>,
    pub listings: ListingSet,
}

impl ListingSnapshot {
    /// Snapshot stamped with the current local time.
    pub fn now(listings: ListingSet) -> Self {
        Self::at(Local::now().fixed_offset(), listings)
    }

    pub fn at(generated_at: DateTime<FixedOffset>, listings: ListingSet) -> Self {
        Self {
            tool: SNAPSHOT_TOOL.to_string(),
            generated_at,
            listings,
        }
    }

    pub fn total(&self) -> usize {
        self.listings.values().map(Vec::len).sum()
    }
}

/// Write a snapshot JSON file.
pub fn write_snapshot_json(path: &Path, snapshot: &ListingSnapshot) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create snapshot JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, snapshot)
        .map_err(|e| AppError::new(2, format!("Failed to write snapshot JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write snapshot JSON: {e}")))?;

    Ok(())
}

/// Read a snapshot JSON file.
pub fn read_snapshot_json(path: &Path) -> Result<ListingSnapshot, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open snapshot JSON '{}': {e}", path.display())))?;
    let snapshot: ListingSnapshot = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid snapshot JSON: {e}")))?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CanonicalListing, Category};

    #[test]
    fn snapshot_survives_a_file_round_trip() {
        let mut listings = ListingSet::new();
        listings.insert(
            Category::Apt,
            vec![CanonicalListing {
                house_name: "개포 아파트".to_string(),
                rent_type: Some("분양주택".to_string()),
                ..CanonicalListing::default()
            }],
        );
        listings.insert(Category::OptionalSupply, Vec::new());
        let generated_at = DateTime::parse_from_rfc3339("2024-06-01T09:30:00+09:00").unwrap();
        let snapshot = ListingSnapshot::at(generated_at, listings);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        write_snapshot_json(&path, &snapshot).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back = read_snapshot_json(&path).unwrap();

        assert_eq!(back, snapshot);
        assert_eq!(back.total(), 1);
        // Category keys use their ids, listing fields their Korean labels.
        assert!(text.contains("\"apt\""));
        assert!(text.contains("\"optional_supply\""));
        assert!(text.contains("\"주택명\": \"개포 아파트\""));
        assert!(!text.contains("건설업체"));
    }

    #[test]
    fn missing_snapshot_file_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_snapshot_json(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Failed to open snapshot JSON"));
    }

    #[test]
    fn invalid_snapshot_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "{ \"tool\": 1 }").unwrap();
        let err = read_snapshot_json(&path).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Invalid snapshot JSON"));
    }
}
