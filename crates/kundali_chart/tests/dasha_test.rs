//! Integration tests for Dasha orchestration over a fixed provider.

use kundali_chart::{
    AyanamshaModel, BirthData, ChartError, ChartOptions, FixedEphemeris, current_dasha,
    dasha_timeline, parse_datetime,
};
use kundali_vedic_base::{DashaLevel, Graha, Nakshatra, VedicError};

const SNAPSHOTS: &str = include_str!("fixtures/chart_snapshot.json");

fn provider() -> FixedEphemeris {
    FixedEphemeris::from_json(SNAPSHOTS).unwrap()
}

fn birth() -> BirthData {
    BirthData::new(
        parse_datetime("1990-05-15T14:30:00+05:30").unwrap(),
        28.6139,
        77.2090,
        AyanamshaModel::Lahiri,
    )
    .unwrap()
}

#[test]
fn timeline_starts_with_moon_balance() {
    let tl = dasha_timeline(&provider(), &birth(), &ChartOptions::default()).unwrap();
    assert!((tl.moon_longitude - 282.0).abs() < 1e-12);
    assert_eq!(tl.moon_nakshatra.nakshatra, Nakshatra::Shravana);
    assert_eq!(tl.balance.ruler, Graha::Chandra);
    assert!((tl.balance.elapsed_fraction - 0.15).abs() < 1e-9);

    let first = &tl.timeline[0];
    assert!(first.period.is_birth_period);
    assert!((first.period.start_jd - 2_448_026.875).abs() < 1e-7);
    assert_eq!(first.sub_periods.len(), 9);
    assert_eq!(first.sub_periods[0].ruler, Graha::Chandra);
    assert_eq!(first.sub_periods[0].level, DashaLevel::Antardasha);
}

#[test]
fn every_mahadasha_has_contiguous_antardashas() {
    let tl = dasha_timeline(&provider(), &birth(), &ChartOptions::default()).unwrap();
    for major in &tl.timeline {
        let subs = &major.sub_periods;
        assert_eq!(subs.len(), 9);
        assert_eq!(subs[0].ruler, major.period.ruler);
        assert!((subs[0].start_jd - major.period.start_jd).abs() < 1e-9);
        assert!((subs[8].end_jd - major.period.end_jd).abs() < 1e-9);
        for pair in subs.windows(2) {
            assert!((pair[0].end_jd - pair[1].start_jd).abs() < 1e-9);
        }
    }
}

#[test]
fn shorter_horizon_trims_timeline() {
    let options = ChartOptions {
        dasha_horizon_years: 20.0,
        ..ChartOptions::default()
    };
    let tl = dasha_timeline(&provider(), &birth(), &options).unwrap();
    // Moon (8.5) → Mars (15.5) → Rahu (33.5)
    let rulers: Vec<Graha> = tl.timeline.iter().map(|m| m.period.ruler).collect();
    assert_eq!(rulers, vec![Graha::Chandra, Graha::Mangal, Graha::Rahu]);
}

#[test]
fn current_dasha_at_turn_of_century() {
    let target = parse_datetime("2000-01-01T05:30:00+05:30").unwrap();
    let cur = current_dasha(&provider(), &birth(), target, &ChartOptions::default()).unwrap();
    assert_eq!(cur.major.ruler, Graha::Mangal);
    assert_eq!(cur.sub.ruler, Graha::Rahu);
    assert_eq!(cur.sub_sub.ruler, Graha::Shukra);
    assert_eq!(cur.sub_sub.level, DashaLevel::Pratyantardasha);
    assert_eq!(cur.sub_sub.parent_ruler, Some(Graha::Rahu));
}

#[test]
fn current_dasha_at_birth_is_moon_throughout() {
    let cur = current_dasha(
        &provider(),
        &birth(),
        birth().datetime,
        &ChartOptions::default(),
    )
    .unwrap();
    assert_eq!(cur.major.ruler, Graha::Chandra);
    assert!(cur.major.is_birth_period);
}

#[test]
fn before_birth_is_outside_timeline() {
    let target = parse_datetime("1985-03-01T00:00:00Z").unwrap();
    let err = current_dasha(&provider(), &birth(), target, &ChartOptions::default()).unwrap_err();
    assert!(!err.is_upstream());
    match err {
        ChartError::Vedic(VedicError::OutsideTimeline { start_jd, .. }) => {
            assert!((start_jd - 2_448_026.875).abs() < 1e-7);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
