//! Pure Vedic astrology calculations over sidereal longitudes.
//!
//! This crate provides:
//! - Rashi, nakshatra and pada classification
//! - Divisional charts (D1 through D60)
//! - Vimshottari dasha timelines with three levels
//! - Shadbala and Ashtakavarga strength systems
//! - Whole-sign aspects and classical yoga detection
//! - Panchanga and daytime muhurta segmentation
//!
//! Nothing here computes planetary positions. Inputs are sidereal
//! longitudes in degrees and instants as Julian Days (UTC); obtaining
//! them is the job of an ephemeris provider in a higher layer.

pub mod amsha;
pub mod ashtakavarga;
pub mod dasha;
pub mod drishti;
pub mod error;
pub mod graha;
pub mod graha_relationships;
pub mod muhurta;
pub mod nakshatra;
pub mod panchanga;
pub mod rashi;
pub mod shadbala;
pub mod util;
pub mod yoga;

pub use amsha::{
    Amsha, DivisionalPosition, SAPTAVARGA, SHODASHA_SUBSET, all_amsha_positions, amsha_position,
    divisional_chart, is_vargottama, saptavarga_rashis,
};
pub use ashtakavarga::{
    AshtakavargaResult, BAV_TOTALS, BhinnaAshtakavarga, BhinnaQuality, SAV_TOTAL,
    SarvaAshtakavarga, SarvaQuality, TransitAnalysis, analyze_transit, calculate_all_bav,
    calculate_ashtakavarga, calculate_bav, calculate_sav, ekadhipatya_sodhana, prastara,
    transit_recommendation, trikona_sodhana,
};
pub use dasha::{
    CurrentDasha, DashaBalance, DashaLevel, DashaPeriod, MajorPeriodDetail, current_periods,
    dasha_balance, full_timeline, major_periods, sub_periods, sub_sub_periods,
};
pub use drishti::{aspected_rashis, aspecting_grahas, aspects_rashi};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, SAPTA_GRAHAS, nth_rashi_from, rashi_lord, rashi_lord_by_index};
pub use graha_relationships::{
    BeneficNature, Dignity, GrahaGender, dignity_in_rashi, graha_gender, natural_benefic_malefic,
};
pub use muhurta::{
    AbhijitMuhurta, Choghadiya, ChoghadiyaNature, ChoghadiyaPeriod, DaySpan, TimeWindow,
    abhijit_muhurta, choghadiya, gulika_kaal, rahu_kaal,
};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, Gana, NAKSHATRA_SPAN_27, Nakshatra, NakshatraInfo, PADA_SPAN,
    abhijit_position, nakshatra_from_longitude,
};
pub use panchanga::{
    KaranaInfo, KaranaKind, Paksha, PanchangaResult, PanchangaYoga, TithiInfo, Vara, YogaNature,
    karana, panchanga, panchanga_yoga, tithi,
};
pub use rashi::{
    ALL_RASHIS, Dms, Rashi, RashiDetails, RashiElement, RashiInfo, RashiModality, deg_to_dms,
    dms_to_deg, opposite_rashi, rashi_details, rashi_from_longitude, square_rashis, trine_rashis,
};
pub use shadbala::{
    AllShadbala, SthanaBalaBreakdown, ShadbalaInputs, ShadbalaResult, all_shadbala, shadbala,
};
pub use util::{house_distance, house_from_rashi, normalize_360};
pub use yoga::{
    GroupedYogas, YogaCategory, YogaChart, YogaFinding, YogaStrength, detect_yogas, group_yogas,
};
