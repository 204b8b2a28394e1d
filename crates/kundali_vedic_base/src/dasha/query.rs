//! Point-in-time dasha lookup.

use crate::error::VedicError;

use super::balance::major_periods;
use super::subperiod::subdivide;
use super::types::{CurrentDasha, DashaPeriod};

/// First period (chronological scan) whose inclusive span contains `jd`.
///
/// At an exact boundary the earlier period wins.
pub fn find_active_period(periods: &[DashaPeriod], jd: f64) -> Option<&DashaPeriod> {
    periods.iter().find(|p| p.contains(jd))
}

/// Active Mahadasha, Antardasha and Pratyantardasha at `target_jd`.
///
/// A target before birth or past the end of the generated horizon is
/// [`VedicError::OutsideTimeline`].
pub fn current_periods(
    moon_sidereal_lon: f64,
    birth_jd: f64,
    target_jd: f64,
    horizon_years: f64,
) -> Result<CurrentDasha, VedicError> {
    let majors = major_periods(moon_sidereal_lon, birth_jd, horizon_years)?;
    let end_jd = majors.last().map_or(birth_jd, |p| p.end_jd);
    let outside = || VedicError::OutsideTimeline {
        jd: target_jd,
        start_jd: birth_jd,
        end_jd,
    };

    let major = *find_active_period(&majors, target_jd).ok_or_else(outside)?;
    let subs = subdivide(&major)?;
    let sub = *find_active_period(&subs, target_jd).ok_or_else(outside)?;
    let sub_subs = subdivide(&sub)?;
    let sub_sub = *find_active_period(&sub_subs, target_jd).ok_or_else(outside)?;

    Ok(CurrentDasha {
        major,
        sub,
        sub_sub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::types::DAYS_PER_YEAR;
    use crate::graha::Graha;

    const BIRTH: f64 = 2_451_545.0;

    #[test]
    fn at_birth_all_levels_share_ruler() {
        let cur = current_periods(0.0, BIRTH, BIRTH, 120.0).unwrap();
        assert_eq!(cur.major.ruler, Graha::Ketu);
        assert_eq!(cur.sub.ruler, Graha::Ketu);
        assert_eq!(cur.sub_sub.ruler, Graha::Ketu);
    }

    #[test]
    fn boundary_goes_to_earlier_period() {
        let majors = major_periods(0.0, BIRTH, 120.0).unwrap();
        let boundary = majors[0].end_jd;
        let found = find_active_period(&majors, boundary).unwrap();
        assert_eq!(found.ruler, Graha::Ketu);
    }

    #[test]
    fn nested_periods_contain_target() {
        let target = BIRTH + 30.0 * DAYS_PER_YEAR;
        let cur = current_periods(123.4, BIRTH, target, 120.0).unwrap();
        assert!(cur.major.contains(target));
        assert!(cur.sub.contains(target));
        assert!(cur.sub_sub.contains(target));
        assert_eq!(cur.sub.parent_ruler, Some(cur.major.ruler));
        assert_eq!(cur.sub_sub.parent_ruler, Some(cur.sub.ruler));
    }

    #[test]
    fn before_birth_is_outside() {
        let err = current_periods(0.0, BIRTH, BIRTH - 1.0, 120.0).unwrap_err();
        assert!(err.is_out_of_domain());
    }

    #[test]
    fn past_horizon_is_outside() {
        let err = current_periods(0.0, BIRTH, BIRTH + 200.0 * DAYS_PER_YEAR, 120.0).unwrap_err();
        assert!(matches!(err, VedicError::OutsideTimeline { .. }));
    }

    #[test]
    fn infinite_horizon_is_invalid_not_outside() {
        let err = current_periods(0.0, BIRTH, BIRTH, f64::INFINITY).unwrap_err();
        assert!(matches!(err, VedicError::InvalidInput(_)));
    }
}
