//! Rashi (zodiac sign) and DMS (degrees-minutes-seconds) computation.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each.
//! Given a sidereal longitude, we identify which rashi the point falls in
//! and express the position as degrees-minutes-seconds within that sign.
//!
//! Element and modality are static properties of each sign, never computed
//! from the longitude itself.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::{Graha, rashi_lord};
use crate::util::normalize_360;

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
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

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi for a 0-based index; rejects anything above 11.
    pub fn from_index(index: u8) -> Result<Self, VedicError> {
        ALL_RASHIS
            .get(index as usize)
            .copied()
            .ok_or(VedicError::SignOutOfRange(index))
    }

    /// All 12 rashis in order.
    pub const fn all() -> &'static [Rashi; 12] {
        &ALL_RASHIS
    }

    /// Element of the sign (Mesha fire, Vrishabha earth, ... repeating).
    pub const fn element(self) -> RashiElement {
        rashi_element(self.index())
    }

    /// Modality of the sign (Mesha movable, Vrishabha fixed, ... repeating).
    pub const fn modality(self) -> RashiModality {
        rashi_modality(self.index())
    }

    /// Odd signs in the classical 1-based count (Mesha, Mithuna, ...).
    pub const fn is_odd(self) -> bool {
        self.index() % 2 == 0
    }

    /// Planetary lord of the sign.
    pub const fn lord(self) -> Graha {
        rashi_lord(self)
    }
}

/// Element (tattva) of a rashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RashiElement {
    Fire,
    Earth,
    Air,
    Water,
}

impl RashiElement {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Air => "Air",
            Self::Water => "Water",
        }
    }
}

/// Modality (quality) of a rashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RashiModality {
    /// Chara.
    Movable,
    /// Sthira.
    Fixed,
    /// Dwiswabhava.
    Dual,
}

impl RashiModality {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Movable => "Movable",
            Self::Fixed => "Fixed",
            Self::Dual => "Dual",
        }
    }
}

/// Element for a 0-based rashi index.
pub const fn rashi_element(rashi_index: u8) -> RashiElement {
    match rashi_index % 4 {
        0 => RashiElement::Fire,
        1 => RashiElement::Earth,
        2 => RashiElement::Air,
        _ => RashiElement::Water,
    }
}

/// Modality for a 0-based rashi index.
pub const fn rashi_modality(rashi_index: u8) -> RashiModality {
    match rashi_index % 3 {
        0 => RashiModality::Movable,
        1 => RashiModality::Fixed,
        _ => RashiModality::Dual,
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    /// Whole degrees (0..29 within a rashi, or 0..359 standalone).
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include fractional part.
    pub seconds: f64,
}

/// Full rashi position result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RashiInfo {
    /// The rashi (zodiac sign).
    pub rashi: Rashi,
    /// 0-based rashi index (0 = Mesha).
    pub rashi_index: u8,
    /// Position within the rashi as DMS.
    pub dms: Dms,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

/// Static description of a rashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RashiDetails {
    pub rashi: Rashi,
    pub index: u8,
    pub name: &'static str,
    pub western_name: &'static str,
    pub lord: Graha,
    pub element: RashiElement,
    pub modality: RashiModality,
}

/// Convert DMS back to decimal degrees.
pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Handles negative input by taking absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let total_degrees = d.floor() as u16;
    let remainder = (d - total_degrees as f64) * 60.0;
    let minutes = remainder.floor() as u8;
    let seconds = (remainder - minutes as f64) * 60.0;
    Dms {
        degrees: total_degrees,
        minutes,
        seconds,
    }
}

/// Determine rashi from sidereal ecliptic longitude.
///
/// Each rashi spans exactly 30 degrees: Mesha = [0, 30), Vrishabha = [30, 60), etc.
/// Any finite input is valid; it is first normalized into [0, 360).
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let rashi_idx = ((lon / 30.0).floor() as u8).min(11);
    let degrees_in_rashi = lon - (rashi_idx as f64) * 30.0;
    let rashi = ALL_RASHIS[rashi_idx as usize];
    let dms = deg_to_dms(degrees_in_rashi);

    RashiInfo {
        rashi,
        rashi_index: rashi_idx,
        dms,
        degrees_in_rashi,
    }
}

/// Static details (lord, element, modality) for a rashi index.
pub fn rashi_details(rashi_index: u8) -> Result<RashiDetails, VedicError> {
    let rashi = Rashi::from_index(rashi_index)?;
    Ok(RashiDetails {
        rashi,
        index: rashi_index,
        name: rashi.name(),
        western_name: rashi.western_name(),
        lord: rashi.lord(),
        element: rashi.element(),
        modality: rashi.modality(),
    })
}

/// The rashi 180 degrees away.
pub fn opposite_rashi(rashi_index: u8) -> u8 {
    (rashi_index % 12 + 6) % 12
}

/// The trine group (same element): the sign itself, 5th and 9th from it.
pub fn trine_rashis(rashi_index: u8) -> [u8; 3] {
    let r = rashi_index % 12;
    [r, (r + 4) % 12, (r + 8) % 12]
}

/// Signs in square (4th and 10th from the given sign).
pub fn square_rashis(rashi_index: u8) -> [u8; 2] {
    let r = rashi_index % 12;
    [(r + 3) % 12, (r + 9) % 12]
}
