//! Raw item -> canonical record normalization.
//!
//! Rules, applied per entry of the endpoint's field table:
//! - absent or `null` -> empty string
//! - strings are trimmed; numbers and booleans are stringified
//! - arrays/objects are a malformed item (the item is skipped, siblings continue)
//!
//! Listings without a house name and model rows without a model number are
//! dropped with a warning. That is expected filtering, not an error.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::domain::{CanonicalListing, Category, ModelTypeRecord};
use crate::registry::{self, FieldMapping};

/// Why a single raw item could not be mapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("item is not a JSON object (found {found})")]
    NotAnObject { found: &'static str },

    #[error("field `{field}` has unexpected type {found}")]
    UnexpectedType { field: &'static str, found: &'static str },
}

/// Map one raw listing item. `Ok(None)` means the item has no house name.
pub fn normalize_listing(category: Category, raw: &Value) -> Result<Option<CanonicalListing>, ItemError> {
    let mut listing = CanonicalListing::default();
    map_fields(raw, registry::spec(category).detail.fields, |field, value| {
        listing.set(field, value)
    })?;

    if listing.house_name.is_empty() {
        warn!(
            category = category.id(),
            house_manage_no = %listing.house_manage_no,
            "Dropping listing without house name"
        );
        return Ok(None);
    }
    Ok(Some(listing))
}

/// Map a batch of raw listing items, skipping malformed and nameless ones.
pub fn normalize_listings(category: Category, items: &[Value]) -> Vec<CanonicalListing> {
    let mut out = Vec::with_capacity(items.len());
    for (idx, raw) in items.iter().enumerate() {
        match normalize_listing(category, raw) {
            Ok(Some(listing)) => out.push(listing),
            Ok(None) => {}
            Err(e) => warn!(category = category.id(), index = idx, error = %e, "Skipping malformed listing item"),
        }
    }
    out
}

/// Map one raw per-model-type row. `Ok(None)` means no model number or house type.
pub fn normalize_model(category: Category, raw: &Value) -> Result<Option<ModelTypeRecord>, ItemError> {
    let mut record = ModelTypeRecord::default();
    map_fields(raw, registry::spec(category).models.fields, |field, value| {
        record.set(field, value)
    })?;

    if record.model_no.is_empty() || record.house_type.is_empty() {
        warn!(
            category = category.id(),
            house_manage_no = %record.house_manage_no,
            "Dropping model row without model number or house type"
        );
        return Ok(None);
    }
    Ok(Some(record))
}

pub fn normalize_models(category: Category, items: &[Value]) -> Vec<ModelTypeRecord> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| match normalize_model(category, raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(category = category.id(), index = idx, error = %e, "Skipping malformed model item");
                None
            }
        })
        .collect()
}

fn map_fields<F: Copy>(
    raw: &Value,
    table: &[FieldMapping<F>],
    mut set: impl FnMut(F, String),
) -> Result<(), ItemError> {
    let object = raw.as_object().ok_or(ItemError::NotAnObject {
        found: kind(raw),
    })?;

    for mapping in table {
        let value = match object.get(mapping.raw) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => {
                return Err(ItemError::UnexpectedType {
                    field: mapping.raw,
                    found: kind(other),
                });
            }
        };
        set(mapping.field, value);
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
