//! Vedic planet (graha) enum and rashi lordship.
//!
//! The 9 grahas form the foundation of every chart calculation.
//! Each rashi has a planetary lord, which is a universal Vedic convention.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::rashi::{ALL_RASHIS, Rashi};

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// The 7 classical grahas (sapta grahas), excluding Rahu and Ketu.
/// Used for Shadbala and Ashtakavarga, which only consider the 7 planets.
pub const SAPTA_GRAHAS: [Graha; 7] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Upper-case body key used in position maps (`SUN`, `MOON`, ...).
    pub const fn body_key(self) -> &'static str {
        match self {
            Self::Surya => "SUN",
            Self::Chandra => "MOON",
            Self::Mangal => "MARS",
            Self::Buddh => "MERCURY",
            Self::Guru => "JUPITER",
            Self::Shukra => "VENUS",
            Self::Shani => "SATURN",
            Self::Rahu => "RAHU",
            Self::Ketu => "KETU",
        }
    }

    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// True for the 7 classical planets.
    pub const fn is_sapta(self) -> bool {
        !matches!(self, Self::Rahu | Self::Ketu)
    }

    /// Resolve a body name in English, Sanskrit, or upper-case key form.
    pub fn from_name(name: &str) -> Result<Self, VedicError> {
        let needle = name.trim();
        ALL_GRAHAS
            .iter()
            .copied()
            .find(|g| {
                needle.eq_ignore_ascii_case(g.english_name())
                    || needle.eq_ignore_ascii_case(g.name())
                    || needle.eq_ignore_ascii_case(g.body_key())
            })
            .ok_or_else(|| VedicError::UnknownBody(name.to_string()))
    }
}

impl FromStr for Graha {
    type Err = VedicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Get the planetary lord of a rashi.
///
/// - Mesha/Vrischika → Mangal (Mars)
/// - Vrishabha/Tula → Shukra (Venus)
/// - Mithuna/Kanya → Buddh (Mercury)
/// - Karka → Chandra (Moon)
/// - Simha → Surya (Sun)
/// - Dhanu/Meena → Guru (Jupiter)
/// - Makara/Kumbha → Shani (Saturn)
pub const fn rashi_lord(rashi: Rashi) -> Graha {
    match rashi {
        Rashi::Mesha => Graha::Mangal,
        Rashi::Vrishabha => Graha::Shukra,
        Rashi::Mithuna => Graha::Buddh,
        Rashi::Karka => Graha::Chandra,
        Rashi::Simha => Graha::Surya,
        Rashi::Kanya => Graha::Buddh,
        Rashi::Tula => Graha::Shukra,
        Rashi::Vrischika => Graha::Mangal,
        Rashi::Dhanu => Graha::Guru,
        Rashi::Makara => Graha::Shani,
        Rashi::Kumbha => Graha::Shani,
        Rashi::Meena => Graha::Guru,
    }
}

/// Get the lord of a rashi by 0-based index.
pub fn rashi_lord_by_index(rashi_index: u8) -> Result<Graha, VedicError> {
    ALL_RASHIS
        .get(rashi_index as usize)
        .map(|r| rashi_lord(*r))
        .ok_or(VedicError::SignOutOfRange(rashi_index))
}

/// Compute the n-th rashi from a given rashi (0-based indices, 1-based offset).
///
/// `nth_rashi_from(0, 1)` = 0 (same rashi), `nth_rashi_from(0, 2)` = 1 (next rashi).
pub fn nth_rashi_from(rashi_index: u8, offset: u8) -> u8 {
    ((rashi_index as u16 + offset as u16 + 11) % 12) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graha_indices_sequential() {
        for (i, g) in ALL_GRAHAS.iter().enumerate() {
            assert_eq!(g.index() as usize, i);
        }
    }

    #[test]
    fn from_name_accepts_all_spellings() {
        assert_eq!(Graha::from_name("Jupiter"), Ok(Graha::Guru));
        assert_eq!(Graha::from_name("guru"), Ok(Graha::Guru));
        assert_eq!(Graha::from_name("JUPITER"), Ok(Graha::Guru));
        assert_eq!("Ketu".parse::<Graha>(), Ok(Graha::Ketu));
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(
            Graha::from_name("Pluto"),
            Err(VedicError::UnknownBody("Pluto".to_string()))
        );
    }

    #[test]
    fn lords_of_dual_lordship() {
        assert_eq!(rashi_lord(Rashi::Mesha), Graha::Mangal);
        assert_eq!(rashi_lord(Rashi::Vrischika), Graha::Mangal);
        assert_eq!(rashi_lord(Rashi::Makara), Graha::Shani);
        assert_eq!(rashi_lord(Rashi::Kumbha), Graha::Shani);
    }

    #[test]
    fn lord_by_index_out_of_range() {
        assert!(rashi_lord_by_index(12).is_err());
        assert_eq!(rashi_lord_by_index(3), Ok(Graha::Chandra));
    }

    #[test]
    fn nth_rashi_wraps() {
        assert_eq!(nth_rashi_from(0, 1), 0);
        assert_eq!(nth_rashi_from(0, 2), 1);
        assert_eq!(nth_rashi_from(11, 2), 0);
        assert_eq!(nth_rashi_from(5, 12), 4);
    }

    #[test]
    fn nodes_not_sapta() {
        assert!(!Graha::Rahu.is_sapta());
        assert!(SAPTA_GRAHAS.iter().all(|g| g.is_sapta()));
    }
}
