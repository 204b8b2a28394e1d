//! Nakshatra (lunar mansion) computation.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! (13.3333... deg) each. Each nakshatra has 4 padas (quarters) of
//! 3 deg 20' each.
//!
//! Rulers follow the fixed 9-graha cycle Ketu, Shukra, Surya, Chandra,
//! Mangal, Rahu, Guru, Shani, Buddh, repeated three times across the
//! 27 mansions. The same cycle drives Vimshottari dasha.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::util::normalize_360;

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Span of one pada: 13.3333.../4 = 3.3333... degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN_27 / 4.0;

/// Ruler cycle shared by nakshatra lordship and Vimshottari.
pub const NAKSHATRA_RULERS: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Abhijit start: Makara 6 deg 40' (276 deg 40').
pub const ABHIJIT_START_DEG: f64 = 276.0 + 40.0 / 60.0;

/// Abhijit end: Makara 10 deg 53' 20" (280 deg 53' 20").
pub const ABHIJIT_END_DEG: f64 = 280.0 + 53.0 / 60.0 + 20.0 / 3600.0;

// ---------------------------------------------------------------------------
// 27-Nakshatra scheme
// ---------------------------------------------------------------------------

/// The 27 nakshatras from Ashwini to Revati (uniform 13 deg 20' each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order.
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

/// Temperament (gana) of a nakshatra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gana {
    Deva,
    Manushya,
    Rakshasa,
}

impl Gana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Deva => "Deva",
            Self::Manushya => "Manushya",
            Self::Rakshasa => "Rakshasa",
        }
    }
}

const DEITIES: [&str; 27] = [
    "Ashwini Kumaras",
    "Yama",
    "Agni",
    "Brahma",
    "Soma",
    "Rudra",
    "Aditi",
    "Brihaspati",
    "Nagas",
    "Pitris",
    "Bhaga",
    "Aryaman",
    "Savitar",
    "Vishwakarma",
    "Vayu",
    "Indra-Agni",
    "Mitra",
    "Indra",
    "Nirriti",
    "Apas",
    "Vishvadevas",
    "Vishnu",
    "Vasus",
    "Varuna",
    "Aja Ekapada",
    "Ahir Budhnya",
    "Pushan",
];

const SYMBOLS: [&str; 27] = [
    "Horse's head",
    "Yoni/Elephant",
    "Razor/Flame",
    "Cart/Chariot",
    "Deer's head",
    "Teardrop/Diamond",
    "Bow/Quiver",
    "Flower/Circle",
    "Serpent/Wheel",
    "Royal throne",
    "Front legs of bed",
    "Back legs of bed",
    "Hand/Fist",
    "Bright jewel/Pearl",
    "Coral/Sword",
    "Triumphal arch",
    "Lotus",
    "Circular amulet",
    "Roots/Lion's tail",
    "Elephant tusk/Fan",
    "Elephant tusk/Planks",
    "Ear/Three footprints",
    "Drum/Flute",
    "Empty circle",
    "Front of funeral cot",
    "Back of funeral cot",
    "Fish/Drum",
];

use Gana::{Deva as D, Manushya as M, Rakshasa as R};

const GANAS: [Gana; 27] = [
    D, M, R, D, D, M, D, D, R, // Ashwini .. Ashlesha
    R, M, M, D, R, D, R, D, R, // Magha .. Jyeshtha
    R, M, M, D, R, R, M, M, D, // Mula .. Revati
];

impl Nakshatra {
    /// Sanskrit name of the nakshatra.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Vimshottari ruler: `NAKSHATRA_RULERS[index % 9]`.
    pub const fn ruler(self) -> Graha {
        NAKSHATRA_RULERS[(self.index() % 9) as usize]
    }

    pub const fn deity(self) -> &'static str {
        DEITIES[self.index() as usize]
    }

    pub const fn symbol(self) -> &'static str {
        SYMBOLS[self.index() as usize]
    }

    pub const fn gana(self) -> Gana {
        GANAS[self.index() as usize]
    }

    /// All 27 nakshatras in order.
    pub const fn all() -> &'static [Nakshatra; 27] {
        &ALL_NAKSHATRAS_27
    }
}

/// Result of a nakshatra lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraInfo {
    /// The nakshatra.
    pub nakshatra: Nakshatra,
    /// 0-based index (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Vimshottari ruler of the mansion.
    pub ruler: Graha,
    /// Pada (quarter) within the nakshatra, 1-4.
    pub pada: u8,
    /// Decimal degrees within the nakshatra [0.0, 13.333...).
    pub degrees_in_nakshatra: f64,
    /// Decimal degrees within the pada [0.0, 3.333...).
    pub degrees_in_pada: f64,
    pub deity: &'static str,
    pub symbol: &'static str,
    pub gana: Gana,
}

/// Determine nakshatra and pada from sidereal ecliptic longitude.
///
/// The pada is clamped to 4 so floating-point overshoot at the end of a
/// mansion never produces a fifth quarter.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let nak_idx = ((lon / NAKSHATRA_SPAN_27).floor() as u8).min(26);
    let degrees_in_nakshatra = lon - (nak_idx as f64) * NAKSHATRA_SPAN_27;
    let pada_idx = ((degrees_in_nakshatra / PADA_SPAN).floor() as u8).min(3);
    let degrees_in_pada = degrees_in_nakshatra - (pada_idx as f64) * PADA_SPAN;
    let nakshatra = ALL_NAKSHATRAS_27[nak_idx as usize];

    NakshatraInfo {
        nakshatra,
        nakshatra_index: nak_idx,
        ruler: nakshatra.ruler(),
        pada: pada_idx + 1,
        degrees_in_nakshatra,
        degrees_in_pada,
        deity: nakshatra.deity(),
        symbol: nakshatra.symbol(),
        gana: nakshatra.gana(),
    }
}

/// Degrees into Abhijit when the longitude falls inside it, else `None`.
///
/// Abhijit is the optional 28th mansion overlapping Uttara Ashadha and
/// Shravana; it is not part of the 27-fold division above.
pub fn abhijit_position(sidereal_lon_deg: f64) -> Option<f64> {
    let lon = normalize_360(sidereal_lon_deg);
    (ABHIJIT_START_DEG..ABHIJIT_END_DEG)
        .contains(&lon)
        .then(|| lon - ABHIJIT_START_DEG)
}
