//! Dasha orchestration: bridges the ephemeris provider with the pure
//! Vimshottari computation in `kundali_vedic_base`.
//!
//! - `dasha_timeline`: balance plus every Mahadasha with its Antardashas
//! - `current_dasha`: active periods at a query instant

use chrono::{DateTime, FixedOffset};
use kundali_vedic_base::{
    CurrentDasha, DashaBalance, Graha, MajorPeriodDetail, NakshatraInfo, current_periods,
    dasha_balance, full_timeline, nakshatra_from_longitude,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::ephemeris::EphemerisProvider;
use crate::error::ChartError;
use crate::jyotish_types::{BirthData, ChartOptions};
use crate::time::datetime_to_jd;

/// Balance and timeline anchored at the Moon's birth nakshatra.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaTimeline {
    pub moon_longitude: f64,
    pub moon_nakshatra: NakshatraInfo,
    pub balance: DashaBalance,
    pub timeline: Vec<MajorPeriodDetail>,
}

/// Moon's sidereal longitude at the birth instant.
fn moon_sidereal_lon<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
) -> Result<f64, ChartError> {
    let pos = provider.body_position(Graha::Chandra, birth.jd_ut(), birth.ayanamsa)?;
    pos.check(Graha::Chandra.body_key())?;
    Ok(kundali_vedic_base::normalize_360(pos.longitude))
}

#[instrument(skip(provider, options))]
pub fn dasha_timeline<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
    options: &ChartOptions,
) -> Result<DashaTimeline, ChartError> {
    let moon = moon_sidereal_lon(provider, birth)?;
    let birth_jd = birth.jd_ut();
    debug!(moon, horizon = options.dasha_horizon_years, "building timeline");
    Ok(DashaTimeline {
        moon_longitude: moon,
        moon_nakshatra: nakshatra_from_longitude(moon),
        balance: dasha_balance(moon, birth_jd),
        timeline: full_timeline(moon, birth_jd, options.dasha_horizon_years)?,
    })
}

/// Active Mahadasha, Antardasha and Pratyantardasha at `target`.
///
/// A target outside the generated horizon surfaces as
/// `ChartError::Vedic(VedicError::OutsideTimeline { .. })`.
#[instrument(skip(provider, options))]
pub fn current_dasha<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
    target: DateTime<FixedOffset>,
    options: &ChartOptions,
) -> Result<CurrentDasha, ChartError> {
    let moon = moon_sidereal_lon(provider, birth)?;
    Ok(current_periods(
        moon,
        birth.jd_ut(),
        datetime_to_jd(&target),
        options.dasha_horizon_years,
    )?)
}
