//! Per-category field tables, as published by the ApplyhomeInfoDetailSvc API.

use super::{FieldMapping, map};
use crate::domain::{ListingField as L, ModelField as M};

pub(super) const APT_DETAIL: &[FieldMapping<L>] = &[
    map("HOUSE_MANAGE_NO", L::HouseManageNo),
    map("PBLANC_NO", L::AnnouncementNo),
    map("HOUSE_NM", L::HouseName),
    map("HOUSE_SECD_NM", L::HouseType),
    map("HOUSE_DTL_SECD_NM", L::HouseDetailType),
    map("RENT_SECD_NM", L::RentType),
    map("SUBSCRPT_AREA_CODE_NM", L::SupplyRegion),
    map("HSSPLY_ADRES", L::SupplyAddress),
    map("TOT_SUPLY_HSHLDCO", L::TotalUnits),
    map("RCRIT_PBLANC_DE", L::AnnouncementDate),
    map("RCEPT_BGNDE", L::ApplicationStart),
    map("RCEPT_ENDDE", L::ApplicationEnd),
    map("PRZWNER_PRESNATN_DE", L::WinnerDate),
    map("CNTRCT_CNCLS_BGNDE", L::ContractStart),
    map("CNTRCT_CNCLS_ENDDE", L::ContractEnd),
    map("MVN_PREARNGE_YM", L::MoveInMonth),
    map("HMPG_ADRES", L::Homepage),
    map("CNSTRCT_ENTRPS_NM", L::Builder),
    map("BSNS_MBY_NM", L::BusinessEntity),
    map("MDHS_TELNO", L::Contact),
    map("PBLANC_URL", L::DetailUrl),
];

// Officetel / urban-living / private-rental: no rent-type, region code or builder.
pub(super) const OFFICETEL_DETAIL: &[FieldMapping<L>] = &[
    map("HOUSE_MANAGE_NO", L::HouseManageNo),
    map("PBLANC_NO", L::AnnouncementNo),
    map("HOUSE_NM", L::HouseName),
    map("HOUSE_SECD_NM", L::HouseType),
    map("HOUSE_DTL_SECD_NM", L::HouseDetailType),
    map("HSSPLY_ADRES", L::SupplyAddress),
    map("TOT_SUPLY_HSHLDCO", L::TotalUnits),
    map("RCRIT_PBLANC_DE", L::AnnouncementDate),
    map("SUBSCRPT_RCEPT_BGNDE", L::ApplicationStart),
    map("SUBSCRPT_RCEPT_ENDDE", L::ApplicationEnd),
    map("PRZWNER_PRESNATN_DE", L::WinnerDate),
    map("CNTRCT_CNCLS_BGNDE", L::ContractStart),
    map("CNTRCT_CNCLS_ENDDE", L::ContractEnd),
    map("MVN_PREARNGE_YM", L::MoveInMonth),
    map("HMPG_ADRES", L::Homepage),
    map("BSNS_MBY_NM", L::BusinessEntity),
    map("MDHS_TELNO", L::Contact),
    map("PBLANC_URL", L::DetailUrl),
];

pub(super) const REMAINDER_DETAIL: &[FieldMapping<L>] = &[
    map("HOUSE_MANAGE_NO", L::HouseManageNo),
    map("PBLANC_NO", L::AnnouncementNo),
    map("HOUSE_NM", L::HouseName),
    map("HOUSE_SECD_NM", L::HouseType),
    map("HSSPLY_ADRES", L::SupplyAddress),
    map("TOT_SUPLY_HSHLDCO", L::TotalUnits),
    map("RCRIT_PBLANC_DE", L::AnnouncementDate),
    map("SUBSCRPT_RCEPT_BGNDE", L::ApplicationStart),
    map("SUBSCRPT_RCEPT_ENDDE", L::ApplicationEnd),
    map("PRZWNER_PRESNATN_DE", L::WinnerDate),
    map("CNTRCT_CNCLS_BGNDE", L::ContractStart),
    map("CNTRCT_CNCLS_ENDDE", L::ContractEnd),
    map("MVN_PREARNGE_YM", L::MoveInMonth),
    map("HMPG_ADRES", L::Homepage),
    map("BSNS_MBY_NM", L::BusinessEntity),
    map("MDHS_TELNO", L::Contact),
    map("PBLANC_URL", L::DetailUrl),
];

pub(super) const PUBLIC_RENTAL_DETAIL: &[FieldMapping<L>] = &[
    map("HOUSE_MANAGE_NO", L::HouseManageNo),
    map("PBLANC_NO", L::AnnouncementNo),
    map("HOUSE_NM", L::HouseName),
    map("HOUSE_SECD_NM", L::HouseType),
    map("HSSPLY_ADRES", L::SupplyAddress),
    map("TOT_SUPLY_HSHLDCO", L::TotalUnits),
    map("RCRIT_PBLANC_DE", L::AnnouncementDate),
    map("SUBSCRPT_RCEPT_BGNDE", L::ApplicationStart),
    map("SUBSCRPT_RCEPT_ENDDE", L::ApplicationEnd),
    map("PRZWNER_PRESNATN_DE", L::WinnerDate),
    map("CNTRCT_CNCLS_BGNDE", L::ContractStart),
    map("CNTRCT_CNCLS_ENDDE", L::ContractEnd),
    map("MVN_PREARNGE_YM", L::MoveInMonth),
    map("HMPG_ADRES", L::Homepage),
    map("BSNS_MBY_NM", L::BusinessEntity),
    map("MDHS_TELNO", L::Contact),
    map("PBLANC_URL", L::DetailUrl),
];

pub(super) const OPTIONAL_SUPPLY_DETAIL: &[FieldMapping<L>] = &[
    map("HOUSE_MANAGE_NO", L::HouseManageNo),
    map("PBLANC_NO", L::AnnouncementNo),
    map("HOUSE_NM", L::HouseName),
    map("HOUSE_SECD_NM", L::HouseType),
    map("HOUSE_DTL_SECD_NM", L::HouseDetailType),
    map("HSSPLY_ADRES", L::SupplyAddress),
    map("TOT_SUPLY_HSHLDCO", L::TotalUnits),
    map("RCRIT_PBLANC_DE", L::AnnouncementDate),
    map("SUBSCRPT_RCEPT_BGNDE", L::ApplicationStart),
    map("SUBSCRPT_RCEPT_ENDDE", L::ApplicationEnd),
    map("PRZWNER_PRESNATN_DE", L::WinnerDate),
    map("CNTRCT_CNCLS_BGNDE", L::ContractStart),
    map("CNTRCT_CNCLS_ENDDE", L::ContractEnd),
    map("MVN_PREARNGE_YM", L::MoveInMonth),
    map("HMPG_ADRES", L::Homepage),
    map("BSNS_MBY_NM", L::BusinessEntity),
    map("MDHS_TELNO", L::Contact),
    map("PBLANC_URL", L::DetailUrl),
];

pub(super) const APT_MODEL: &[FieldMapping<M>] = &[
    map("HOUSE_MANAGE_NO", M::HouseManageNo),
    map("PBLANC_NO", M::AnnouncementNo),
    map("MODEL_NO", M::ModelNo),
    map("HOUSE_TY", M::HouseType),
    map("SUPLY_AR", M::SupplyArea),
    map("SUPLY_HSHLDCO", M::GeneralUnits),
    map("SPSPLY_HSHLDCO", M::SpecialUnits),
    map("LTTOT_TOP_AMOUNT", M::TopPrice),
];

// Officetel models are keyed by type (TP) and exclusive area rather than HOUSE_TY.
pub(super) const OFFICETEL_MODEL: &[FieldMapping<M>] = &[
    map("HOUSE_MANAGE_NO", M::HouseManageNo),
    map("PBLANC_NO", M::AnnouncementNo),
    map("MODEL_NO", M::ModelNo),
    map("TP", M::HouseType),
    map("EXCLUSE_AR", M::SupplyArea),
    map("SUPLY_HSHLDCO", M::GeneralUnits),
    map("SUPLY_AMOUNT", M::TopPrice),
];

pub(super) const REMAINDER_MODEL: &[FieldMapping<M>] = &[
    map("HOUSE_MANAGE_NO", M::HouseManageNo),
    map("PBLANC_NO", M::AnnouncementNo),
    map("MODEL_NO", M::ModelNo),
    map("HOUSE_TY", M::HouseType),
    map("SUPLY_AR", M::SupplyArea),
    map("SUPLY_HSHLDCO", M::GeneralUnits),
    map("SPSPLY_HSHLDCO", M::SpecialUnits),
    map("LTTOT_TOP_AMOUNT", M::TopPrice),
];

pub(super) const PUBLIC_RENTAL_MODEL: &[FieldMapping<M>] = &[
    map("HOUSE_MANAGE_NO", M::HouseManageNo),
    map("PBLANC_NO", M::AnnouncementNo),
    map("MODEL_NO", M::ModelNo),
    map("HOUSE_TY", M::HouseType),
    map("SUPLY_AR", M::SupplyArea),
    map("SUPLY_HSHLDCO", M::GeneralUnits),
    map("SPSPLY_HSHLDCO", M::SpecialUnits),
    map("SUPLY_AMOUNT", M::TopPrice),
];

pub(super) const OPTIONAL_SUPPLY_MODEL: &[FieldMapping<M>] = &[
    map("HOUSE_MANAGE_NO", M::HouseManageNo),
    map("PBLANC_NO", M::AnnouncementNo),
    map("MODEL_NO", M::ModelNo),
    map("HOUSE_TY", M::HouseType),
    map("SUPLY_AR", M::SupplyArea),
    map("SUPLY_HSHLDCO", M::GeneralUnits),
    map("LTTOT_TOP_AMOUNT", M::TopPrice),
];
