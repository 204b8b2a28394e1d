//! Integration tests for rashi and nakshatra classification.

use kundali_vedic_base::{
    Gana, Graha, Nakshatra, Rashi, RashiElement, RashiModality, abhijit_position, deg_to_dms,
    dms_to_deg, nakshatra_from_longitude, rashi_details, rashi_from_longitude,
};

// ---------------------------------------------------------------------------
// Rashi
// ---------------------------------------------------------------------------

#[test]
fn rashi_sweep_all_12() {
    let expected = [
        Rashi::Mesha,
        Rashi::Vrishabha,
        Rashi::Mithuna,
        Rashi::Karka,
        Rashi::Simha,
        Rashi::Kanya,
        Rashi::Tula,
        Rashi::Vrischika,
        Rashi::Dhanu,
        Rashi::Makara,
        Rashi::Kumbha,
        Rashi::Meena,
    ];
    for (i, r) in expected.iter().enumerate() {
        let lon = i as f64 * 30.0 + 15.0;
        let info = rashi_from_longitude(lon);
        assert_eq!(info.rashi, *r, "rashi at {lon} deg");
        assert_eq!(info.rashi_index, i as u8);
    }
}

#[test]
fn rashi_dms_precision() {
    // 45 deg 30' 15.5" → Vrishabha 15 deg 30' 15.5"
    let lon = 45.0 + 30.0 / 60.0 + 15.5 / 3600.0;
    let info = rashi_from_longitude(lon);
    assert_eq!(info.rashi, Rashi::Vrishabha);
    assert_eq!(info.dms.degrees, 15);
    assert_eq!(info.dms.minutes, 30);
    assert!((info.dms.seconds - 15.5).abs() < 0.01, "seconds = {}", info.dms.seconds);
}

#[test]
fn rashi_wraps_negative_and_large() {
    assert_eq!(rashi_from_longitude(-0.5).rashi, Rashi::Meena);
    assert_eq!(rashi_from_longitude(725.0).rashi, Rashi::Mesha);
    assert_eq!(rashi_from_longitude(360.0).rashi_index, 0);
}

#[test]
fn dms_round_trip() {
    for deg in [0.0, 12.345678, 29.999, 123.456] {
        let back = dms_to_deg(&deg_to_dms(deg));
        assert!((back - deg).abs() < 1e-9, "{deg} → {back}");
    }
}

#[test]
fn rashi_details_table() {
    let simha = rashi_details(4).unwrap();
    assert_eq!(simha.name, "Simha");
    assert_eq!(simha.western_name, "Leo");
    assert_eq!(simha.lord, Graha::Surya);
    assert_eq!(simha.element, RashiElement::Fire);
    assert_eq!(simha.modality, RashiModality::Fixed);
    assert!(rashi_details(12).is_err());
}

// ---------------------------------------------------------------------------
// Nakshatra
// ---------------------------------------------------------------------------

#[test]
fn nakshatra_sweep_all_27() {
    let span = 360.0 / 27.0;
    for i in 0..27u8 {
        let lon = i as f64 * span + 1.0;
        let info = nakshatra_from_longitude(lon);
        assert_eq!(info.nakshatra_index, i, "nakshatra at {lon} deg");
        assert_eq!(info.pada, 1);
    }
}

#[test]
fn rohini_pada_and_ruler() {
    // 45 deg → Rohini (40..53.33), 5 deg in → pada 2
    let info = nakshatra_from_longitude(45.0);
    assert_eq!(info.nakshatra, Nakshatra::Rohini);
    assert_eq!(info.ruler, Graha::Chandra);
    assert_eq!(info.pada, 2);
    assert!((info.degrees_in_nakshatra - 5.0).abs() < 1e-10);
}

#[test]
fn end_of_zodiac_is_revati_pada_4() {
    let info = nakshatra_from_longitude(359.9999);
    assert_eq!(info.nakshatra, Nakshatra::Revati);
    assert_eq!(info.pada, 4);
    assert_eq!(info.ruler, Graha::Buddh);
    assert_eq!(info.gana, Gana::Deva);
}

#[test]
fn pada_boundaries() {
    let pada = 360.0 / 108.0;
    for p in 0..4u8 {
        let info = nakshatra_from_longitude(p as f64 * pada + 1e-6);
        assert_eq!(info.pada, p + 1);
        assert!(info.degrees_in_pada < pada);
    }
}

#[test]
fn abhijit_overlay() {
    assert!(abhijit_position(278.0).is_some());
    assert!(abhijit_position(270.0).is_none());
    assert!(abhijit_position(281.0).is_none());
}
