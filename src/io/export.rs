//! Export a listing set to CSV.
//!
//! The export is meant to be easy to open in spreadsheets: one row per
//! listing, a running sequence number, the category's display name, then
//! every canonical field under its Korean label.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{ListingField, ListingSet};
use crate::error::AppError;

pub const SEQUENCE_COLUMN: &str = "순번";
pub const CATEGORY_COLUMN: &str = "분양유형";

/// Write the listing set to a CSV file.
pub fn write_listings_csv(path: &Path, listings: &ListingSet) -> Result<usize, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_listings(file, listings)
}

/// Write the listing set as CSV to any writer. Returns the number of rows written.
///
/// Fields a category does not carry are left blank.
pub fn write_listings<W: Write>(writer: W, listings: &ListingSet) -> Result<usize, AppError> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec![SEQUENCE_COLUMN, CATEGORY_COLUMN];
    header.extend(ListingField::ALL.iter().map(|f| f.label()));
    out.write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let mut seq = 0usize;
    for (category, rows) in listings {
        for listing in rows {
            seq += 1;
            let mut record = Vec::with_capacity(header.len());
            record.push(seq.to_string());
            record.push(category.display_name().to_string());
            record.extend(
                ListingField::ALL
                    .iter()
                    .map(|&f| listing.get(f).unwrap_or_default().to_string()),
            );
            out.write_record(&record)
                .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CanonicalListing, Category};

    fn listing(name: &str, date: &str) -> CanonicalListing {
        CanonicalListing {
            house_name: name.to_string(),
            announcement_date: date.to_string(),
            ..CanonicalListing::default()
        }
    }

    #[test]
    fn writes_sequence_category_and_labels() {
        let mut set = ListingSet::new();
        let mut apt = listing("개포 아파트", "2024-01-15");
        apt.builder = Some("테스트건설".to_string());
        set.insert(Category::Apt, vec![apt]);
        set.insert(Category::Remainder, vec![listing("잔여, 단지", "2024-01-20")]);
        set.insert(Category::Officetel, Vec::new());

        let mut buf = Vec::new();
        let rows = write_listings(&mut buf, &set).unwrap();
        assert_eq!(rows, 2);

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "순번");
        assert_eq!(&headers[1], "분양유형");
        assert_eq!(&headers[2], "주택관리번호");
        assert_eq!(headers.len(), 2 + ListingField::ALL.len());

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&records[0][0], "1");
        assert_eq!(&records[0][1], "APT분양");
        assert_eq!(&records[0][4], "개포 아파트");
        assert_eq!(&records[1][0], "2");
        assert_eq!(&records[1][1], "무순위/잔여세대");
        // Embedded comma survives quoting.
        assert_eq!(&records[1][4], "잔여, 단지");

        let builder_col = headers.iter().position(|h| h == "건설업체").unwrap();
        assert_eq!(&records[0][builder_col], "테스트건설");
        assert_eq!(&records[1][builder_col], "");
    }

    #[test]
    fn empty_set_writes_header_only() {
        let mut buf = Vec::new();
        assert_eq!(write_listings(&mut buf, &ListingSet::new()).unwrap(), 0);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("순번,분양유형,"));
    }

    #[test]
    fn unwritable_path_maps_to_exit_code_2() {
        let err = write_listings_csv(Path::new("/nonexistent-dir/out.csv"), &ListingSet::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
