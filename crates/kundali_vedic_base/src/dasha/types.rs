//! Core types for Vimshottari dasha calculations.

use serde::Serialize;

use crate::graha::Graha;
use crate::nakshatra::{NAKSHATRA_RULERS, Nakshatra};

/// Year length constant for dasha period calculations.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Length of the full Vimshottari cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Horizon used when the caller does not supply one.
pub const DEFAULT_HORIZON_YEARS: f64 = 120.0;

/// Largest accepted horizon: ten full cycles.
pub const MAX_HORIZON_YEARS: f64 = 10.0 * VIMSHOTTARI_TOTAL_YEARS;

/// The nine-ruler cycle, identical to the nakshatra ruler sequence.
pub const DASHA_SEQUENCE: [Graha; 9] = NAKSHATRA_RULERS;

/// Mahadasha length in years for each ruler.
///
/// Ketu 7, Shukra 20, Surya 6, Chandra 10, Mangal 7, Rahu 18,
/// Guru 16, Shani 19, Buddh 17. Sum = 120.
pub const fn dasha_years(graha: Graha) -> f64 {
    match graha {
        Graha::Ketu => 7.0,
        Graha::Shukra => 20.0,
        Graha::Surya => 6.0,
        Graha::Chandra => 10.0,
        Graha::Mangal => 7.0,
        Graha::Rahu => 18.0,
        Graha::Guru => 16.0,
        Graha::Shani => 19.0,
        Graha::Buddh => 17.0,
    }
}

/// 3 hierarchical dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 0,
    Antardasha = 1,
    Pratyantardasha = 2,
}

impl DashaLevel {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => None,
        }
    }
}

/// A single dasha period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaPeriod {
    /// The graha ruling this period.
    pub ruler: Graha,
    /// Hierarchical level.
    pub level: DashaLevel,
    /// JD UTC.
    pub start_jd: f64,
    /// JD UTC.
    pub end_jd: f64,
    /// Span in years of 365.25 days.
    pub years: f64,
    /// Span in days.
    pub days: f64,
    /// True only for the partial Mahadasha running at birth.
    pub is_birth_period: bool,
    /// Ruler of the enclosing period (None for Mahadashas).
    pub parent_ruler: Option<Graha>,
}

impl DashaPeriod {
    /// Inclusive on both ends.
    pub fn contains(&self, jd: f64) -> bool {
        self.start_jd <= jd && jd <= self.end_jd
    }

    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }
}

/// Where the birth Mahadasha stands at the birth instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaBalance {
    pub ruler: Graha,
    pub nakshatra: Nakshatra,
    /// Full Mahadasha length of the ruler.
    pub total_years: f64,
    /// Fraction of the nakshatra (and so of the Mahadasha) already traversed.
    pub elapsed_fraction: f64,
    pub elapsed_years: f64,
    pub remaining_years: f64,
    pub remaining_days: f64,
    /// JD UTC at which the birth Mahadasha ends.
    pub end_jd: f64,
}

/// A Mahadasha with its nine Antardashas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorPeriodDetail {
    pub period: DashaPeriod,
    pub sub_periods: Vec<DashaPeriod>,
}

/// Active periods at a specific instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentDasha {
    pub major: DashaPeriod,
    pub sub: DashaPeriod,
    pub sub_sub: DashaPeriod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dasha_years_sum_to_120() {
        let total: f64 = DASHA_SEQUENCE.iter().map(|&g| dasha_years(g)).sum();
        assert_eq!(total, VIMSHOTTARI_TOTAL_YEARS);
    }

    #[test]
    fn sequence_starts_with_ketu() {
        assert_eq!(DASHA_SEQUENCE[0], Graha::Ketu);
        assert_eq!(DASHA_SEQUENCE[8], Graha::Buddh);
    }

    #[test]
    fn dasha_level_child() {
        assert_eq!(
            DashaLevel::Mahadasha.child_level(),
            Some(DashaLevel::Antardasha)
        );
        assert_eq!(DashaLevel::Pratyantardasha.child_level(), None);
    }

    #[test]
    fn contains_is_inclusive() {
        let p = DashaPeriod {
            ruler: Graha::Surya,
            level: DashaLevel::Mahadasha,
            start_jd: 10.0,
            end_jd: 20.0,
            years: 10.0 / DAYS_PER_YEAR,
            days: 10.0,
            is_birth_period: false,
            parent_ruler: None,
        };
        assert!(p.contains(10.0));
        assert!(p.contains(20.0));
        assert!(!p.contains(20.0001));
        assert!((p.duration_days() - 10.0).abs() < 1e-12);
    }
}
