//! Birth balance and the Mahadasha chain.
//!
//! The Moon's position within its nakshatra fixes how much of the first
//! Mahadasha has already elapsed at birth.

use crate::error::VedicError;
use crate::nakshatra::{NAKSHATRA_SPAN_27, nakshatra_from_longitude};

use super::subperiod::{cyclic_sequence, sub_periods};
use super::types::{
    DAYS_PER_YEAR, DashaBalance, DashaLevel, DashaPeriod, MAX_HORIZON_YEARS, MajorPeriodDetail,
    dasha_years,
};

/// Compute the birth balance from the Moon's sidereal longitude.
pub fn dasha_balance(moon_sidereal_lon: f64, birth_jd: f64) -> DashaBalance {
    let nak = nakshatra_from_longitude(moon_sidereal_lon);
    let total_years = dasha_years(nak.ruler);
    let elapsed_fraction = nak.degrees_in_nakshatra / NAKSHATRA_SPAN_27;
    let remaining_years = (1.0 - elapsed_fraction) * total_years;
    let remaining_days = remaining_years * DAYS_PER_YEAR;
    DashaBalance {
        ruler: nak.ruler,
        nakshatra: nak.nakshatra,
        total_years,
        elapsed_fraction,
        elapsed_years: elapsed_fraction * total_years,
        remaining_years,
        remaining_days,
        end_jd: birth_jd + remaining_days,
    }
}

/// Mahadashas from birth until `horizon_years` (Julian years) past birth.
///
/// The first period is the partial birth period; each following period runs
/// its full length. Periods are appended while the chain end lies before
/// the horizon, so the last one may extend past it.
///
/// The horizon must be finite, positive and at most [`MAX_HORIZON_YEARS`].
pub fn major_periods(
    moon_sidereal_lon: f64,
    birth_jd: f64,
    horizon_years: f64,
) -> Result<Vec<DashaPeriod>, VedicError> {
    if !horizon_years.is_finite() || horizon_years <= 0.0 {
        return Err(VedicError::InvalidInput("horizon must be finite and positive"));
    }
    if horizon_years > MAX_HORIZON_YEARS {
        return Err(VedicError::InvalidInput("horizon exceeds ten Vimshottari cycles"));
    }
    if !moon_sidereal_lon.is_finite() || !birth_jd.is_finite() {
        return Err(VedicError::InvalidInput("non-finite moon longitude or birth instant"));
    }

    let balance = dasha_balance(moon_sidereal_lon, birth_jd);
    let mut periods = vec![DashaPeriod {
        ruler: balance.ruler,
        level: DashaLevel::Mahadasha,
        start_jd: birth_jd,
        end_jd: balance.end_jd,
        years: balance.remaining_years,
        days: balance.remaining_days,
        is_birth_period: true,
        parent_ruler: None,
    }];

    let limit_jd = birth_jd + horizon_years * DAYS_PER_YEAR;
    let mut cursor = balance.end_jd;
    let mut rulers = cyclic_sequence(balance.ruler).into_iter().cycle().skip(1);

    while cursor < limit_jd {
        let Some(ruler) = rulers.next() else { break };
        let years = dasha_years(ruler);
        let days = years * DAYS_PER_YEAR;
        periods.push(DashaPeriod {
            ruler,
            level: DashaLevel::Mahadasha,
            start_jd: cursor,
            end_jd: cursor + days,
            years,
            days,
            is_birth_period: false,
            parent_ruler: None,
        });
        cursor += days;
    }
    Ok(periods)
}

/// Every Mahadasha up to the horizon with its nine Antardashas.
pub fn full_timeline(
    moon_sidereal_lon: f64,
    birth_jd: f64,
    horizon_years: f64,
) -> Result<Vec<MajorPeriodDetail>, VedicError> {
    major_periods(moon_sidereal_lon, birth_jd, horizon_years)?
        .into_iter()
        .map(|period| {
            Ok(MajorPeriodDetail {
                sub_periods: sub_periods(&period)?,
                period,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::Graha;
    use crate::nakshatra::Nakshatra;

    const BIRTH: f64 = 2_451_545.0;

    #[test]
    fn balance_at_start_of_ashwini() {
        let b = dasha_balance(0.0, BIRTH);
        assert_eq!(b.nakshatra, Nakshatra::Ashwini);
        assert_eq!(b.ruler, Graha::Ketu);
        assert_eq!(b.total_years, 7.0);
        assert!(b.elapsed_fraction.abs() < 1e-12);
        assert!((b.remaining_days - 7.0 * DAYS_PER_YEAR).abs() < 1e-9);
    }

    #[test]
    fn balance_at_midpoint() {
        let b = dasha_balance(NAKSHATRA_SPAN_27 / 2.0, BIRTH);
        assert!((b.elapsed_fraction - 0.5).abs() < 1e-10);
        assert!((b.remaining_years - 3.5).abs() < 1e-9);
        assert!((b.elapsed_years + b.remaining_years - b.total_years).abs() < 1e-12);
    }

    #[test]
    fn rohini_is_moon_ruled() {
        let b = dasha_balance(46.5, BIRTH);
        assert_eq!(b.nakshatra, Nakshatra::Rohini);
        assert_eq!(b.ruler, Graha::Chandra);
    }

    #[test]
    fn majors_chain_and_cycle() {
        let periods = major_periods(0.0, BIRTH, 120.0).unwrap();
        assert!(periods[0].is_birth_period);
        assert!(periods[1..].iter().all(|p| !p.is_birth_period));
        assert_eq!(periods[1].ruler, Graha::Shukra);
        assert_eq!(periods[2].ruler, Graha::Surya);
        for w in periods.windows(2) {
            assert!((w[0].end_jd - w[1].start_jd).abs() < 1e-9);
        }
        let last = periods.last().unwrap();
        assert!(last.end_jd >= BIRTH + 120.0 * DAYS_PER_YEAR - 1e-6);
    }

    #[test]
    fn short_horizon_keeps_only_birth_period() {
        // Ketu balance alone runs 7 years
        let periods = major_periods(0.0, BIRTH, 1.0).unwrap();
        assert_eq!(periods.len(), 1);
    }

    #[test]
    fn bad_horizon_rejected() {
        for horizon in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -50.0, 0.0, 1.0e7] {
            let err = major_periods(10.0, BIRTH, horizon).unwrap_err();
            assert!(matches!(err, VedicError::InvalidInput(_)), "{horizon}: {err:?}");
            assert!(!err.is_out_of_domain());
            assert!(full_timeline(10.0, BIRTH, horizon).is_err());
        }
    }

    #[test]
    fn largest_horizon_accepted() {
        let periods = major_periods(10.0, BIRTH, MAX_HORIZON_YEARS).unwrap();
        let last = periods.last().unwrap();
        assert!(last.end_jd >= BIRTH + MAX_HORIZON_YEARS * DAYS_PER_YEAR);
        assert!(periods.len() <= 92);
    }

    #[test]
    fn non_finite_moon_rejected() {
        assert!(major_periods(f64::NAN, BIRTH, 120.0).is_err());
    }

    #[test]
    fn partial_birth_period_subdivides_its_remaining_span() {
        let timeline = full_timeline(NAKSHATRA_SPAN_27 / 2.0, BIRTH, 30.0).unwrap();
        let first = &timeline[0];
        let total: f64 = first.sub_periods.iter().map(|s| s.days).sum();
        assert!((total - first.period.days).abs() < 1e-6);
        assert_eq!(first.sub_periods[0].ruler, first.period.ruler);
    }
}
