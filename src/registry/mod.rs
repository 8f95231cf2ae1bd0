//! Category registry: endpoint paths and field-mapping tables.
//!
//! Every category has two endpoints on the listing service:
//! - a listing "detail" endpoint (one row per announcement)
//! - a "per-model-type detail" endpoint (one row per housing model of an announcement)
//!
//! Each endpoint carries an ordered table of `raw key -> canonical field`. The
//! tables are plain constants so lookups are free and side-effect free.

mod tables;

use crate::domain::{Category, ListingField, ModelField};
use crate::error::FetchError;

/// Provider page-size cap for listing detail endpoints.
pub const DETAIL_PAGE_CAP: u32 = 150;
/// Provider page-size cap for per-model-type endpoints.
pub const MODEL_PAGE_CAP: u32 = 100;

/// Raw field holding the announcement date, used for date-range filters.
pub const ANNOUNCEMENT_DATE_FIELD: &str = "RCRIT_PBLANC_DE";
/// Raw field holding the house management number.
pub const HOUSE_MANAGE_NO_FIELD: &str = "HOUSE_MANAGE_NO";
/// Raw field holding the announcement number.
pub const ANNOUNCEMENT_NO_FIELD: &str = "PBLANC_NO";

/// One `raw key -> canonical field` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping<F> {
    pub raw: &'static str,
    pub field: F,
}

pub(crate) const fn map<F>(raw: &'static str, field: F) -> FieldMapping<F> {
    FieldMapping { raw, field }
}

/// Path, page cap and field table of one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct EndpointSpec<F: 'static> {
    pub path: &'static str,
    pub max_page_size: u32,
    pub fields: &'static [FieldMapping<F>],
}

impl<F: 'static> EndpointSpec<F> {
    /// Raw key mapped to `field`, if the table has one.
    pub fn raw_key(&self, field: F) -> Option<&'static str>
    where
        F: PartialEq + Copy,
    {
        self.fields.iter().find(|m| m.field == field).map(|m| m.raw)
    }
}

/// Schema descriptor of one listing category.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub detail: EndpointSpec<ListingField>,
    pub models: EndpointSpec<ModelField>,
}

static REGISTRY: [CategorySpec; 5] = [
    CategorySpec {
        category: Category::Apt,
        detail: EndpointSpec {
            path: "getAPTLttotPblancDetail",
            max_page_size: DETAIL_PAGE_CAP,
            fields: tables::APT_DETAIL,
        },
        models: EndpointSpec {
            path: "getAPTLttotPblancMdl",
            max_page_size: MODEL_PAGE_CAP,
            fields: tables::APT_MODEL,
        },
    },
    CategorySpec {
        category: Category::Officetel,
        detail: EndpointSpec {
            path: "getUrbtyOfctlLttotPblancDetail",
            max_page_size: DETAIL_PAGE_CAP,
            fields: tables::OFFICETEL_DETAIL,
        },
        models: EndpointSpec {
            path: "getUrbtyOfctlLttotPblancMdl",
            max_page_size: MODEL_PAGE_CAP,
            fields: tables::OFFICETEL_MODEL,
        },
    },
    CategorySpec {
        category: Category::Remainder,
        detail: EndpointSpec {
            path: "getRemndrLttotPblancDetail",
            max_page_size: DETAIL_PAGE_CAP,
            fields: tables::REMAINDER_DETAIL,
        },
        models: EndpointSpec {
            path: "getRemndrLttotPblancMdl",
            max_page_size: MODEL_PAGE_CAP,
            fields: tables::REMAINDER_MODEL,
        },
    },
    CategorySpec {
        category: Category::PublicRental,
        detail: EndpointSpec {
            path: "getPblPvtRentLttotPblancDetail",
            max_page_size: DETAIL_PAGE_CAP,
            fields: tables::PUBLIC_RENTAL_DETAIL,
        },
        models: EndpointSpec {
            path: "getPblPvtRentLttotPblancMdl",
            max_page_size: MODEL_PAGE_CAP,
            fields: tables::PUBLIC_RENTAL_MODEL,
        },
    },
    CategorySpec {
        category: Category::OptionalSupply,
        detail: EndpointSpec {
            path: "getOPTLttotPblancDetail",
            max_page_size: DETAIL_PAGE_CAP,
            fields: tables::OPTIONAL_SUPPLY_DETAIL,
        },
        models: EndpointSpec {
            path: "getOPTLttotPblancMdl",
            max_page_size: MODEL_PAGE_CAP,
            fields: tables::OPTIONAL_SUPPLY_MODEL,
        },
    },
];

/// Schema descriptor for a known category.
pub fn spec(category: Category) -> &'static CategorySpec {
    // REGISTRY is laid out in `Category::ALL` order.
    &REGISTRY[category as usize]
}

/// Look up a category by its identifier (`apt`, `officetel`, ...).
pub fn lookup(id: &str) -> Result<&'static CategorySpec, FetchError> {
    Category::from_id(id).map(spec)
}

/// All registered categories, in iteration order.
pub fn all() -> &'static [CategorySpec] {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_matches_category_order() {
        for (idx, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(REGISTRY[idx].category, category);
            assert_eq!(spec(category).category, category);
        }
    }

    #[test]
    fn lookup_resolves_known_ids() {
        let apt = lookup("apt").unwrap();
        assert_eq!(apt.detail.path, "getAPTLttotPblancDetail");
        assert_eq!(apt.models.path, "getAPTLttotPblancMdl");

        let rental = lookup("public_rental").unwrap();
        assert_eq!(rental.category, Category::PublicRental);
    }

    #[test]
    fn lookup_rejects_unregistered_ids() {
        for id in ["", "villa", "apt_detail", "public-rental"] {
            assert!(
                matches!(lookup(id), Err(FetchError::UnknownCategory { .. })),
                "{id:?} should be unknown"
            );
        }
    }

    #[test]
    fn every_detail_table_maps_the_shared_core_fields() {
        let core = [
            ListingField::HouseManageNo,
            ListingField::AnnouncementNo,
            ListingField::HouseName,
            ListingField::AnnouncementDate,
            ListingField::ApplicationStart,
            ListingField::ApplicationEnd,
            ListingField::DetailUrl,
        ];
        for spec in all() {
            for field in core {
                assert!(
                    spec.detail.raw_key(field).is_some(),
                    "{} lacks {:?}",
                    spec.category,
                    field
                );
            }
            assert_eq!(spec.detail.raw_key(ListingField::HouseName), Some("HOUSE_NM"));
            assert_eq!(
                spec.detail.raw_key(ListingField::AnnouncementDate),
                Some(ANNOUNCEMENT_DATE_FIELD)
            );
        }
    }

    #[test]
    fn category_specific_fields_differ() {
        let apt = spec(Category::Apt);
        let officetel = spec(Category::Officetel);
        assert!(apt.detail.raw_key(ListingField::RentType).is_some());
        assert!(apt.detail.raw_key(ListingField::Builder).is_some());
        assert!(officetel.detail.raw_key(ListingField::RentType).is_none());
    }

    #[test]
    fn page_caps_follow_endpoint_kind() {
        for spec in all() {
            assert_eq!(spec.detail.max_page_size, DETAIL_PAGE_CAP);
            assert_eq!(spec.models.max_page_size, MODEL_PAGE_CAP);
        }
    }
}
