//! Panchanga: the five limbs of the Vedic almanac.
//!
//! Tithi, nakshatra, yoga, karana and vara derived from the sidereal Sun
//! and Moon longitudes plus the weekday, with optional Rahu/Gulika Kaal
//! windows when sunrise and sunset are known.

use serde::Serialize;

use crate::error::VedicError;
use crate::graha::Graha;
use crate::muhurta::{DaySpan, TimeWindow, gulika_kaal, rahu_kaal};
use crate::nakshatra::{Gana, NAKSHATRA_SPAN_27, Nakshatra, NakshatraInfo, nakshatra_from_longitude};
use crate::util::normalize_360;

// ---------------------------------------------------------------------------
// Tithi
// ---------------------------------------------------------------------------

/// Tithi span in degrees of Moon-Sun elongation.
pub const TITHI_SPAN: f64 = 12.0;

/// Karana span (half a tithi).
pub const KARANA_SPAN: f64 = 6.0;

/// Tithi names within a paksha; the 15th is Purnima (Amavasya in Krishna).
pub const TITHI_NAMES: [&str; 15] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Purnima",
];

const TITHI_LORDS: [Graha; 15] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
];

/// Tithis counted favorable within either paksha.
const FAVORABLE_TITHIS: [u8; 7] = [2, 3, 5, 7, 10, 11, 13];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Paksha {
    /// Waxing.
    Shukla,
    /// Waning.
    Krishna,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TithiInfo {
    /// 1-30.
    pub number: u8,
    /// 1-15 within the paksha.
    pub tithi_in_paksha: u8,
    pub name: &'static str,
    pub paksha: Paksha,
    pub lord: Graha,
    /// Elongation left until the tithi ends.
    pub remaining_degrees: f64,
    pub is_purnima: bool,
    pub is_amavasya: bool,
}

fn elongation(sun_lon: f64, moon_lon: f64) -> f64 {
    normalize_360(moon_lon - sun_lon)
}

pub fn tithi(sun_lon: f64, moon_lon: f64) -> TithiInfo {
    let diff = elongation(sun_lon, moon_lon);
    let number = ((diff / TITHI_SPAN).floor() as u8 + 1).min(30);
    let (paksha, tithi_in_paksha) = if number <= 15 {
        (Paksha::Shukla, number)
    } else {
        (Paksha::Krishna, number - 15)
    };
    let name = if number == 30 {
        "Amavasya"
    } else {
        TITHI_NAMES[(tithi_in_paksha - 1) as usize]
    };
    TithiInfo {
        number,
        tithi_in_paksha,
        name,
        paksha,
        lord: TITHI_LORDS[((number - 1) % 15) as usize],
        remaining_degrees: TITHI_SPAN - diff % TITHI_SPAN,
        is_purnima: number == 15,
        is_amavasya: number == 30,
    }
}

// ---------------------------------------------------------------------------
// Yoga
// ---------------------------------------------------------------------------

pub const YOGA_NAMES: [&str; 27] = [
    "Vishkumbha",
    "Priti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarma",
    "Dhriti",
    "Shoola",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyan",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

/// 1-based numbers of the malefic yogas.
const MALEFIC_YOGAS: [u8; 9] = [1, 6, 9, 10, 13, 15, 17, 19, 27];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YogaNature {
    Benefic,
    Malefic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanchangaYoga {
    /// 1-27.
    pub number: u8,
    pub name: &'static str,
    pub nature: YogaNature,
    pub remaining_degrees: f64,
}

pub fn panchanga_yoga(sun_lon: f64, moon_lon: f64) -> PanchangaYoga {
    let combined = normalize_360(sun_lon + moon_lon);
    let mut number = (combined / NAKSHATRA_SPAN_27).floor() as u8 + 1;
    if number > 27 {
        number = 1;
    }
    let nature = if MALEFIC_YOGAS.contains(&number) {
        YogaNature::Malefic
    } else {
        YogaNature::Benefic
    };
    PanchangaYoga {
        number,
        name: YOGA_NAMES[(number - 1) as usize],
        nature,
        remaining_degrees: NAKSHATRA_SPAN_27 - combined % NAKSHATRA_SPAN_27,
    }
}

// ---------------------------------------------------------------------------
// Karana
// ---------------------------------------------------------------------------

pub const MOVABLE_KARANAS: [&str; 7] = [
    "Bava", "Balava", "Kaulava", "Taitila", "Gara", "Vanija", "Vishti",
];

/// Karanas 57-60.
pub const FIXED_KARANAS: [&str; 4] = ["Shakuni", "Chatushpada", "Naga", "Kimstughna"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KaranaKind {
    Fixed,
    Movable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KaranaInfo {
    /// 1-60.
    pub number: u8,
    pub name: &'static str,
    pub kind: KaranaKind,
}

pub fn karana(sun_lon: f64, moon_lon: f64) -> KaranaInfo {
    let number = ((elongation(sun_lon, moon_lon) / KARANA_SPAN).floor() as u8 + 1).min(60);
    let (name, kind) = match number {
        1 => ("Kimstughna", KaranaKind::Fixed),
        57.. => (FIXED_KARANAS[(number - 57) as usize], KaranaKind::Fixed),
        _ => (
            MOVABLE_KARANAS[((number - 2) % 7) as usize],
            KaranaKind::Movable,
        ),
    };
    KaranaInfo { number, name, kind }
}

// ---------------------------------------------------------------------------
// Vara
// ---------------------------------------------------------------------------

/// Weekday, Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Vara {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

pub const ALL_VARAS: [Vara; 7] = [
    Vara::Sunday,
    Vara::Monday,
    Vara::Tuesday,
    Vara::Wednesday,
    Vara::Thursday,
    Vara::Friday,
    Vara::Saturday,
];

impl Vara {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Result<Self, VedicError> {
        ALL_VARAS
            .get(index as usize)
            .copied()
            .ok_or(VedicError::InvalidInput("weekday index must be 0-6"))
    }

    /// Weekday of the civil (UTC) day containing `jd`.
    pub fn from_jd(jd: f64) -> Self {
        let idx = ((jd + 1.5).floor() as i64).rem_euclid(7);
        ALL_VARAS[idx as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    pub const fn sanskrit_name(self) -> &'static str {
        match self {
            Self::Sunday => "Ravivara",
            Self::Monday => "Somavara",
            Self::Tuesday => "Mangalavara",
            Self::Wednesday => "Budhavara",
            Self::Thursday => "Guruvara",
            Self::Friday => "Shukravara",
            Self::Saturday => "Shanivara",
        }
    }

    pub const fn lord(self) -> Graha {
        match self {
            Self::Sunday => Graha::Surya,
            Self::Monday => Graha::Chandra,
            Self::Tuesday => Graha::Mangal,
            Self::Wednesday => Graha::Buddh,
            Self::Thursday => Graha::Guru,
            Self::Friday => Graha::Shukra,
            Self::Saturday => Graha::Shani,
        }
    }
}

// ---------------------------------------------------------------------------
// Complete Panchanga
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanchangaResult {
    pub tithi: TithiInfo,
    pub nakshatra: NakshatraInfo,
    pub yoga: PanchangaYoga,
    pub karana: KaranaInfo,
    pub vara: Vara,
    pub rahu_kaal: Option<TimeWindow>,
    pub gulika_kaal: Option<TimeWindow>,
    pub auspiciousness_score: i8,
    pub is_auspicious: bool,
    pub special_notes: Vec<&'static str>,
}

/// Sum of the four auspiciousness signals.
pub fn auspiciousness_score(
    tithi: &TithiInfo,
    yoga: &PanchangaYoga,
    gana: Gana,
    vara: Vara,
) -> i8 {
    let mut score = 0;
    if FAVORABLE_TITHIS.contains(&tithi.tithi_in_paksha) {
        score += 1;
    }
    score += match yoga.nature {
        YogaNature::Benefic => 1,
        YogaNature::Malefic => -1,
    };
    if gana == Gana::Deva {
        score += 1;
    }
    if matches!(vara, Vara::Monday | Vara::Friday) {
        score += 1;
    }
    score
}

fn special_notes(tithi: &TithiInfo, nakshatra: Nakshatra, vara: Vara) -> Vec<&'static str> {
    let mut notes = Vec::new();
    if tithi.is_purnima {
        notes.push("Purnima - Full Moon day, auspicious for rituals");
    }
    if tithi.is_amavasya {
        notes.push("Amavasya - New Moon day, good for ancestral rites");
    }
    if tithi.name == "Ekadashi" {
        notes.push("Ekadashi - Sacred fasting day");
    }
    if nakshatra == Nakshatra::Pushya {
        notes.push("Pushya Nakshatra - Highly auspicious for most activities");
    }
    if vara == Vara::Thursday {
        notes.push("Guruvara - Auspicious for learning and spiritual activities");
    }
    notes
}

/// Complete Panchanga. Kaal windows are present only when `day` is given.
pub fn panchanga(
    sun_lon: f64,
    moon_lon: f64,
    vara: Vara,
    day: Option<&DaySpan>,
) -> Result<PanchangaResult, VedicError> {
    if !sun_lon.is_finite() || !moon_lon.is_finite() {
        return Err(VedicError::InvalidInput("longitudes must be finite"));
    }
    let tithi = tithi(sun_lon, moon_lon);
    let nakshatra = nakshatra_from_longitude(moon_lon);
    let yoga = panchanga_yoga(sun_lon, moon_lon);
    let karana = karana(sun_lon, moon_lon);
    let score = auspiciousness_score(&tithi, &yoga, nakshatra.gana, vara);

    Ok(PanchangaResult {
        special_notes: special_notes(&tithi, nakshatra.nakshatra, vara),
        tithi,
        nakshatra,
        yoga,
        karana,
        vara,
        rahu_kaal: day.map(|d| rahu_kaal(vara, d)),
        gulika_kaal: day.map(|d| gulika_kaal(vara, d)),
        auspiciousness_score: score,
        is_auspicious: score >= 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn tithi_dwitiya_shukla() {
        let t = tithi(0.0, 12.0);
        assert_eq!(t.number, 2);
        assert_eq!(t.name, "Dwitiya");
        assert_eq!(t.paksha, Paksha::Shukla);
        assert_eq!(t.lord, Graha::Chandra);
        assert!((t.remaining_degrees - 12.0).abs() < EPS);
    }

    #[test]
    fn tithi_krishna_pratipada() {
        let t = tithi(0.0, 180.0);
        assert_eq!(t.number, 16);
        assert_eq!(t.tithi_in_paksha, 1);
        assert_eq!(t.paksha, Paksha::Krishna);
        assert_eq!(t.name, "Pratipada");
    }

    #[test]
    fn tithi_purnima_and_amavasya() {
        let p = tithi(10.0, 10.0 + 170.0);
        assert!(p.is_purnima);
        assert_eq!(p.name, "Purnima");
        let a = tithi(100.0, 95.0);
        assert_eq!(a.number, 30);
        assert_eq!(a.name, "Amavasya");
        assert_eq!(a.tithi_in_paksha, 15);
        assert!(a.is_amavasya);
    }

    #[test]
    fn yoga_wraps_and_classifies() {
        let y = panchanga_yoga(0.0, 0.0);
        assert_eq!(y.number, 1);
        assert_eq!(y.name, "Vishkumbha");
        assert_eq!(y.nature, YogaNature::Malefic);
        let y = panchanga_yoga(200.0, 159.9);
        assert_eq!(y.number, 27);
        assert_eq!(y.name, "Vaidhriti");
        let y = panchanga_yoga(10.0, 10.0);
        assert_eq!(y.name, "Priti");
        assert_eq!(y.nature, YogaNature::Benefic);
    }

    #[test]
    fn karana_sequence() {
        assert_eq!(karana(0.0, 3.0).name, "Kimstughna");
        assert_eq!(karana(0.0, 3.0).kind, KaranaKind::Fixed);
        assert_eq!(karana(0.0, 7.0).name, "Bava");
        assert_eq!(karana(0.0, 7.0).kind, KaranaKind::Movable);
        // Karana 9 → (9 - 2) % 7 = 0 → Bava again
        assert_eq!(karana(0.0, 50.0).name, "Bava");
        assert_eq!(karana(0.0, 340.0).name, "Shakuni");
        assert_eq!(karana(0.0, 359.0).name, "Kimstughna");
        assert_eq!(karana(0.0, 359.0).number, 60);
    }

    #[test]
    fn vara_from_jd() {
        // J2000.0 (2000-01-01 12:00 UT) was a Saturday
        assert_eq!(Vara::from_jd(2_451_545.0), Vara::Saturday);
        assert_eq!(Vara::from_jd(2_451_546.0), Vara::Sunday);
        assert_eq!(Vara::Thursday.sanskrit_name(), "Guruvara");
        assert!(Vara::from_index(7).is_err());
    }

    #[test]
    fn auspicious_verdict() {
        // Tritiya (+1), Priti (+1), Bharani is Manushya (0), Friday (+1)
        let p = panchanga(0.0, 24.0, Vara::Friday, None).unwrap();
        assert_eq!(p.yoga.name, "Priti");
        assert_eq!(p.auspiciousness_score, 3);
        assert!(p.is_auspicious);
        assert!(p.rahu_kaal.is_none());
    }

    #[test]
    fn kaal_windows_with_day() {
        let day = DaySpan::new(2_460_000.25, 2_460_000.75).unwrap();
        let p = panchanga(0.0, 100.0, Vara::Sunday, Some(&day)).unwrap();
        let rk = p.rahu_kaal.unwrap();
        assert!((rk.end_jd - day.sunset_jd).abs() < EPS);
        assert!(p.gulika_kaal.is_some());
    }

    #[test]
    fn notes_for_thursday_purnima() {
        let p = panchanga(0.0, 170.0, Vara::Thursday, None).unwrap();
        assert!(p.special_notes.iter().any(|n| n.starts_with("Purnima")));
        assert!(p.special_notes.iter().any(|n| n.starts_with("Guruvara")));
    }

    #[test]
    fn pushya_note() {
        // Pushya spans 93°20' to 106°40'
        let p = panchanga(0.0, 100.0, Vara::Sunday, None).unwrap();
        assert_eq!(p.nakshatra.nakshatra, Nakshatra::Pushya);
        assert!(p.special_notes.iter().any(|n| n.starts_with("Pushya")));
    }
}
