//! Shared domain types.
//!
//! These are the records every other layer speaks:
//!
//! - listing categories and their display names (`Category`)
//! - the normalized output records (`CanonicalListing`, `ModelTypeRecord`)
//! - query narrowing (`CategoryFilter`, `FilterOp`)
//! - per-category outcomes and the connectivity self-test result

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// The five subscription-housing classes published by the listing service.
///
/// Declaration order is the fixed iteration order used by the aggregator and
/// by every report/export (the derived `Ord` keeps `ListingSet` in this order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Apt,
    Officetel,
    Remainder,
    PublicRental,
    OptionalSupply,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Apt,
        Category::Officetel,
        Category::Remainder,
        Category::PublicRental,
        Category::OptionalSupply,
    ];

    /// Identifier used on the command line and in snapshot files.
    pub fn id(self) -> &'static str {
        match self {
            Category::Apt => "apt",
            Category::Officetel => "officetel",
            Category::Remainder => "remainder",
            Category::PublicRental => "public_rental",
            Category::OptionalSupply => "optional_supply",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Apt => "APT분양",
            Category::Officetel => "오피스텔/도시형/민간임대",
            Category::Remainder => "무순위/잔여세대",
            Category::PublicRental => "공공지원민간임대",
            Category::OptionalSupply => "임의공급",
        }
    }

    /// Resolve a category id. Lookup ignores ASCII case and surrounding
    /// whitespace, so `" APT "` resolves to `Category::Apt`.
    pub fn from_id(id: &str) -> Result<Self, FetchError> {
        let wanted = id.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FetchError::UnknownCategory { id: id.to_string() })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Canonical fields of a listing, in export column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    HouseManageNo,
    AnnouncementNo,
    HouseName,
    HouseType,
    HouseDetailType,
    RentType,
    SupplyRegion,
    SupplyAddress,
    TotalUnits,
    AnnouncementDate,
    ApplicationStart,
    ApplicationEnd,
    WinnerDate,
    ContractStart,
    ContractEnd,
    MoveInMonth,
    Homepage,
    Builder,
    BusinessEntity,
    Contact,
    DetailUrl,
}

impl ListingField {
    pub const ALL: [ListingField; 21] = [
        ListingField::HouseManageNo,
        ListingField::AnnouncementNo,
        ListingField::HouseName,
        ListingField::HouseType,
        ListingField::HouseDetailType,
        ListingField::RentType,
        ListingField::SupplyRegion,
        ListingField::SupplyAddress,
        ListingField::TotalUnits,
        ListingField::AnnouncementDate,
        ListingField::ApplicationStart,
        ListingField::ApplicationEnd,
        ListingField::WinnerDate,
        ListingField::ContractStart,
        ListingField::ContractEnd,
        ListingField::MoveInMonth,
        ListingField::Homepage,
        ListingField::Builder,
        ListingField::BusinessEntity,
        ListingField::Contact,
        ListingField::DetailUrl,
    ];

    /// Column label shared by the CSV export and the JSON snapshot.
    pub fn label(self) -> &'static str {
        match self {
            ListingField::HouseManageNo => "주택관리번호",
            ListingField::AnnouncementNo => "공고번호",
            ListingField::HouseName => "주택명",
            ListingField::HouseType => "주택구분",
            ListingField::HouseDetailType => "주택상세구분",
            ListingField::RentType => "분양구분",
            ListingField::SupplyRegion => "공급지역",
            ListingField::SupplyAddress => "공급위치",
            ListingField::TotalUnits => "공급규모",
            ListingField::AnnouncementDate => "모집공고일",
            ListingField::ApplicationStart => "청약접수시작일",
            ListingField::ApplicationEnd => "청약접수종료일",
            ListingField::WinnerDate => "당첨발표일",
            ListingField::ContractStart => "계약시작일",
            ListingField::ContractEnd => "계약종료일",
            ListingField::MoveInMonth => "입주예정월",
            ListingField::Homepage => "홈페이지",
            ListingField::Builder => "건설업체",
            ListingField::BusinessEntity => "분양업체",
            ListingField::Contact => "연락처",
            ListingField::DetailUrl => "모집공고URL",
        }
    }
}

/// A normalized listing, independent of the category it came from.
///
/// `Option` fields only exist for some categories: `None` means the category's
/// schema has no such field, `Some("")` means the field exists but was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalListing {
    #[serde(rename = "주택관리번호")]
    pub house_manage_no: String,
    #[serde(rename = "공고번호")]
    pub announcement_no: String,
    #[serde(rename = "주택명")]
    pub house_name: String,
    #[serde(rename = "주택구분")]
    pub house_type: String,
    #[serde(rename = "주택상세구분", default, skip_serializing_if = "Option::is_none")]
    pub house_detail_type: Option<String>,
    #[serde(rename = "분양구분", default, skip_serializing_if = "Option::is_none")]
    pub rent_type: Option<String>,
    #[serde(rename = "공급지역", default, skip_serializing_if = "Option::is_none")]
    pub supply_region: Option<String>,
    #[serde(rename = "공급위치")]
    pub supply_address: String,
    #[serde(rename = "공급규모")]
    pub total_units: String,
    #[serde(rename = "모집공고일")]
    pub announcement_date: String,
    #[serde(rename = "청약접수시작일")]
    pub application_start: String,
    #[serde(rename = "청약접수종료일")]
    pub application_end: String,
    #[serde(rename = "당첨발표일")]
    pub winner_date: String,
    #[serde(rename = "계약시작일")]
    pub contract_start: String,
    #[serde(rename = "계약종료일")]
    pub contract_end: String,
    #[serde(rename = "입주예정월")]
    pub move_in_month: String,
    #[serde(rename = "홈페이지")]
    pub homepage: String,
    #[serde(rename = "건설업체", default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<String>,
    #[serde(rename = "분양업체")]
    pub business_entity: String,
    #[serde(rename = "연락처")]
    pub contact: String,
    #[serde(rename = "모집공고URL")]
    pub detail_url: String,
}

impl CanonicalListing {
    pub fn set(&mut self, field: ListingField, value: String) {
        match field {
            ListingField::HouseManageNo => self.house_manage_no = value,
            ListingField::AnnouncementNo => self.announcement_no = value,
            ListingField::HouseName => self.house_name = value,
            ListingField::HouseType => self.house_type = value,
            ListingField::HouseDetailType => self.house_detail_type = Some(value),
            ListingField::RentType => self.rent_type = Some(value),
            ListingField::SupplyRegion => self.supply_region = Some(value),
            ListingField::SupplyAddress => self.supply_address = value,
            ListingField::TotalUnits => self.total_units = value,
            ListingField::AnnouncementDate => self.announcement_date = value,
            ListingField::ApplicationStart => self.application_start = value,
            ListingField::ApplicationEnd => self.application_end = value,
            ListingField::WinnerDate => self.winner_date = value,
            ListingField::ContractStart => self.contract_start = value,
            ListingField::ContractEnd => self.contract_end = value,
            ListingField::MoveInMonth => self.move_in_month = value,
            ListingField::Homepage => self.homepage = value,
            ListingField::Builder => self.builder = Some(value),
            ListingField::BusinessEntity => self.business_entity = value,
            ListingField::Contact => self.contact = value,
            ListingField::DetailUrl => self.detail_url = value,
        }
    }

    /// Field value, or `None` when the category does not carry the field.
    pub fn get(&self, field: ListingField) -> Option<&str> {
        match field {
            ListingField::HouseManageNo => Some(&self.house_manage_no),
            ListingField::AnnouncementNo => Some(&self.announcement_no),
            ListingField::HouseName => Some(&self.house_name),
            ListingField::HouseType => Some(&self.house_type),
            ListingField::HouseDetailType => self.house_detail_type.as_deref(),
            ListingField::RentType => self.rent_type.as_deref(),
            ListingField::SupplyRegion => self.supply_region.as_deref(),
            ListingField::SupplyAddress => Some(&self.supply_address),
            ListingField::TotalUnits => Some(&self.total_units),
            ListingField::AnnouncementDate => Some(&self.announcement_date),
            ListingField::ApplicationStart => Some(&self.application_start),
            ListingField::ApplicationEnd => Some(&self.application_end),
            ListingField::WinnerDate => Some(&self.winner_date),
            ListingField::ContractStart => Some(&self.contract_start),
            ListingField::ContractEnd => Some(&self.contract_end),
            ListingField::MoveInMonth => Some(&self.move_in_month),
            ListingField::Homepage => Some(&self.homepage),
            ListingField::Builder => self.builder.as_deref(),
            ListingField::BusinessEntity => Some(&self.business_entity),
            ListingField::Contact => Some(&self.contact),
            ListingField::DetailUrl => Some(&self.detail_url),
        }
    }
}

/// Canonical fields of a per-model-type row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelField {
    HouseManageNo,
    AnnouncementNo,
    ModelNo,
    HouseType,
    SupplyArea,
    GeneralUnits,
    SpecialUnits,
    TopPrice,
}

/// One housing model (unit type) of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTypeRecord {
    pub house_manage_no: String,
    pub announcement_no: String,
    pub model_no: String,
    pub house_type: String,
    pub supply_area: String,
    pub general_units: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_units: Option<String>,
    pub top_price: String,
}

impl ModelTypeRecord {
    pub fn set(&mut self, field: ModelField, value: String) {
        match field {
            ModelField::HouseManageNo => self.house_manage_no = value,
            ModelField::AnnouncementNo => self.announcement_no = value,
            ModelField::ModelNo => self.model_no = value,
            ModelField::HouseType => self.house_type = value,
            ModelField::SupplyArea => self.supply_area = value,
            ModelField::GeneralUnits => self.general_units = value,
            ModelField::SpecialUnits => self.special_units = Some(value),
            ModelField::TopPrice => self.top_price = value,
        }
    }
}

/// Comparison operator of a conditional query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "EQ")]
    Eq,
    #[serde(rename = "GTE")]
    Gte,
    #[serde(rename = "LTE")]
    Lte,
}

impl FilterOp {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Eq => "EQ",
            FilterOp::Gte => "GTE",
            FilterOp::Lte => "LTE",
        }
    }
}

/// Field -> operator -> value. Empty means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    conditions: BTreeMap<String, BTreeMap<FilterOp, String>>,
}

impl CategoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        self.insert(field, op, value);
        self
    }

    /// Add or replace a condition. Field names are stored upper-cased.
    pub fn insert(&mut self, field: impl Into<String>, op: FilterOp, value: impl Into<String>) {
        let field = field.into().trim().to_ascii_uppercase();
        self.conditions
            .entry(field)
            .or_default()
            .insert(op, value.into());
    }

    pub fn get(&self, field: &str, op: FilterOp) -> Option<&str> {
        self.conditions
            .get(&field.to_ascii_uppercase())
            .and_then(|ops| ops.get(&op))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of individual `(field, op)` conditions.
    pub fn len(&self) -> usize {
        self.conditions.values().map(BTreeMap::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FilterOp, &str)> {
        self.conditions.iter().flat_map(|(field, ops)| {
            ops.iter()
                .map(move |(op, value)| (field.as_str(), *op, value.as_str()))
        })
    }
}

/// Outcome of one category's fetch-and-normalize pipeline.
pub type FetchResult = Result<Vec<CanonicalListing>, FetchError>;

/// Combined result handed to downstream collaborators, in `Category` order.
pub type ListingSet = BTreeMap<Category, Vec<CanonicalListing>>;

/// Result of the minimal single-record request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityProbe {
    pub ok: bool,
    pub message: String,
}

impl ConnectivityProbe {
    pub fn success() -> Self {
        Self {
            ok: true,
            message: "success".to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}
