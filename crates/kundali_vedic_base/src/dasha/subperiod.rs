//! Proportional sub-period generation shared by every dasha level.
//!
//! child duration = parent_duration * years(child_ruler) / 120

use crate::error::VedicError;
use crate::graha::Graha;

use super::types::{
    DASHA_SEQUENCE, DAYS_PER_YEAR, DashaLevel, DashaPeriod, VIMSHOTTARI_TOTAL_YEARS, dasha_years,
};

/// The nine rulers in cycle order starting from `start`.
pub fn cyclic_sequence(start: Graha) -> [Graha; 9] {
    let pos = DASHA_SEQUENCE
        .iter()
        .position(|&g| g == start)
        .unwrap_or(0);
    std::array::from_fn(|i| DASHA_SEQUENCE[(pos + i) % 9])
}

/// Split a period into its nine children, starting from its own ruler.
///
/// Children are contiguous; the last child's end is snapped to the parent's
/// end to absorb floating-point drift. A Pratyantardasha has no deeper level.
pub fn subdivide(parent: &DashaPeriod) -> Result<Vec<DashaPeriod>, VedicError> {
    let child_level = parent
        .level
        .child_level()
        .ok_or(VedicError::InvalidInput("pratyantardasha has no sub-periods"))?;

    let parent_days = parent.duration_days();
    let mut children = Vec::with_capacity(9);
    let mut cursor = parent.start_jd;

    for ruler in cyclic_sequence(parent.ruler) {
        let days = parent_days * dasha_years(ruler) / VIMSHOTTARI_TOTAL_YEARS;
        let end = cursor + days;
        children.push(DashaPeriod {
            ruler,
            level: child_level,
            start_jd: cursor,
            end_jd: end,
            years: days / DAYS_PER_YEAR,
            days,
            is_birth_period: false,
            parent_ruler: Some(parent.ruler),
        });
        cursor = end;
    }

    if let Some(last) = children.last_mut() {
        last.end_jd = parent.end_jd;
        last.days = last.end_jd - last.start_jd;
        last.years = last.days / DAYS_PER_YEAR;
    }
    Ok(children)
}

/// Antardashas of a Mahadasha.
pub fn sub_periods(major: &DashaPeriod) -> Result<Vec<DashaPeriod>, VedicError> {
    if major.level != DashaLevel::Mahadasha {
        return Err(VedicError::InvalidInput("expected a mahadasha"));
    }
    subdivide(major)
}

/// Pratyantardashas of an Antardasha.
pub fn sub_sub_periods(sub: &DashaPeriod) -> Result<Vec<DashaPeriod>, VedicError> {
    if sub.level != DashaLevel::Antardasha {
        return Err(VedicError::InvalidInput("expected an antardasha"));
    }
    subdivide(sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn major(ruler: Graha, start_jd: f64) -> DashaPeriod {
        let years = dasha_years(ruler);
        let days = years * DAYS_PER_YEAR;
        DashaPeriod {
            ruler,
            level: DashaLevel::Mahadasha,
            start_jd,
            end_jd: start_jd + days,
            years,
            days,
            is_birth_period: false,
            parent_ruler: None,
        }
    }

    #[test]
    fn cyclic_from_venus() {
        let seq = cyclic_sequence(Graha::Shukra);
        assert_eq!(seq[0], Graha::Shukra);
        assert_eq!(seq[1], Graha::Surya);
        assert_eq!(seq[8], Graha::Ketu);
    }

    #[test]
    fn antardashas_partition_major() {
        let m = major(Graha::Guru, 2_451_545.0);
        let subs = sub_periods(&m).unwrap();
        assert_eq!(subs.len(), 9);
        assert_eq!(subs[0].ruler, Graha::Guru);
        assert!((subs[0].start_jd - m.start_jd).abs() < 1e-12);
        assert_eq!(subs[8].end_jd, m.end_jd);
        for w in subs.windows(2) {
            assert!((w[0].end_jd - w[1].start_jd).abs() < 1e-9);
        }
        let total: f64 = subs.iter().map(|s| s.days).sum();
        assert!((total - m.days).abs() < 1.0);
    }

    #[test]
    fn antardasha_duration_formula() {
        // Jupiter-Jupiter: 16 * 16 * 365.25 / 120 days
        let m = major(Graha::Guru, 0.0);
        let subs = sub_periods(&m).unwrap();
        let expected = 16.0 * 16.0 * DAYS_PER_YEAR / 120.0;
        assert!((subs[0].days - expected).abs() < 1e-9);
    }

    #[test]
    fn pratyantardashas_partition_sub() {
        let m = major(Graha::Shani, 0.0);
        for sub in sub_periods(&m).unwrap() {
            let pds = sub_sub_periods(&sub).unwrap();
            assert_eq!(pds.len(), 9);
            assert_eq!(pds[0].ruler, sub.ruler);
            assert_eq!(pds[0].parent_ruler, Some(sub.ruler));
            let total: f64 = pds.iter().map(|p| p.days).sum();
            assert!((total - sub.days).abs() < 0.01);
        }
    }

    #[test]
    fn level_checks() {
        let m = major(Graha::Ketu, 0.0);
        assert!(sub_sub_periods(&m).is_err());
        let sub = sub_periods(&m).unwrap()[0];
        assert!(sub_periods(&sub).is_err());
        let pd = sub_sub_periods(&sub).unwrap()[0];
        assert!(subdivide(&pd).is_err());
    }
}
