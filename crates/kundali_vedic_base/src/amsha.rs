//! Amsha (divisional chart / varga chart) calculations.
//!
//! Transforms a sidereal longitude through a divisional mapping to produce
//! a new (rashi, degree) pair in the amsha chart. Every amsha except D30
//! divides the 30-degree rashi span into N equal parts; a per-amsha rule
//! picks the starting rashi and the step between consecutive parts.
//!
//! D2 (Hora) alternates between Simha and Karka, and D30 (Trimshamsha)
//! uses five unequal bands per parity. Both are special-cased variants of
//! the rule table rather than uniform folds.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::rashi::{ALL_RASHIS, Rashi, RashiElement, RashiModality, rashi_from_longitude};
use crate::util::normalize_360;

// ---------------------------------------------------------------------------
// Amsha enum (13 variants)
// ---------------------------------------------------------------------------

/// The 13 supported divisional charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Amsha {
    D1,
    D2,
    D3,
    D4,
    D7,
    D9,
    D10,
    D12,
    D16,
    D20,
    D24,
    D30,
    D60,
}

/// The 13 supported amshas in ascending division order.
pub const SHODASHA_SUBSET: [Amsha; 13] = [
    Amsha::D1,
    Amsha::D2,
    Amsha::D3,
    Amsha::D4,
    Amsha::D7,
    Amsha::D9,
    Amsha::D10,
    Amsha::D12,
    Amsha::D16,
    Amsha::D20,
    Amsha::D24,
    Amsha::D30,
    Amsha::D60,
];

/// The seven vargas (saptavarga) scored by Saptavargaja Bala.
pub const SAPTAVARGA: [Amsha; 7] = [
    Amsha::D1,
    Amsha::D2,
    Amsha::D3,
    Amsha::D7,
    Amsha::D9,
    Amsha::D12,
    Amsha::D30,
];

impl Amsha {
    /// Number of divisions per rashi.
    pub const fn divisions(self) -> u16 {
        match self {
            Self::D1 => 1,
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D4 => 4,
            Self::D7 => 7,
            Self::D9 => 9,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D16 => 16,
            Self::D20 => 20,
            Self::D24 => 24,
            Self::D30 => 30,
            Self::D60 => 60,
        }
    }

    /// Code string, e.g. `"D9"`.
    pub const fn code(self) -> &'static str {
        match self {
            Self::D1 => "D1",
            Self::D2 => "D2",
            Self::D3 => "D3",
            Self::D4 => "D4",
            Self::D7 => "D7",
            Self::D9 => "D9",
            Self::D10 => "D10",
            Self::D12 => "D12",
            Self::D16 => "D16",
            Self::D20 => "D20",
            Self::D24 => "D24",
            Self::D30 => "D30",
            Self::D60 => "D60",
        }
    }

    /// Sanskrit name of the varga.
    pub const fn name(self) -> &'static str {
        match self {
            Self::D1 => "Rashi",
            Self::D2 => "Hora",
            Self::D3 => "Drekkana",
            Self::D4 => "Chaturthamsha",
            Self::D7 => "Saptamsha",
            Self::D9 => "Navamsha",
            Self::D10 => "Dashamsha",
            Self::D12 => "Dwadashamsha",
            Self::D16 => "Shodashamsha",
            Self::D20 => "Vimshamsha",
            Self::D24 => "Chaturvimshamsha",
            Self::D30 => "Trimshamsha",
            Self::D60 => "Shashtiamsha",
        }
    }

    /// Life area traditionally read from the chart.
    pub const fn signification(self) -> &'static str {
        match self {
            Self::D1 => "Body, overall life",
            Self::D2 => "Wealth",
            Self::D3 => "Siblings, courage",
            Self::D4 => "Fortune, property",
            Self::D7 => "Children, progeny",
            Self::D9 => "Spouse, dharma",
            Self::D10 => "Career, status",
            Self::D12 => "Parents, ancestry",
            Self::D16 => "Vehicles, comforts",
            Self::D20 => "Spiritual progress",
            Self::D24 => "Education, learning",
            Self::D30 => "Misfortunes, evils",
            Self::D60 => "Past karma",
        }
    }

    /// Reverse lookup from the number of divisions.
    pub fn from_divisions(n: u16) -> Result<Amsha, VedicError> {
        SHODASHA_SUBSET
            .iter()
            .copied()
            .find(|a| a.divisions() == n)
            .ok_or_else(|| VedicError::UnknownDivision(n.to_string()))
    }

    /// Parse `"D9"`, `"d9"` or `"9"`.
    pub fn from_code(code: &str) -> Result<Amsha, VedicError> {
        let trimmed = code.trim();
        let digits = trimmed
            .strip_prefix('D')
            .or_else(|| trimmed.strip_prefix('d'))
            .unwrap_or(trimmed);
        digits
            .parse::<u16>()
            .ok()
            .and_then(|n| Self::from_divisions(n).ok())
            .ok_or_else(|| VedicError::UnknownDivision(code.to_string()))
    }
}

impl FromStr for Amsha {
    type Err = VedicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// How the starting rashi of the first division is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartRule {
    /// Start at the natal rashi.
    Natal,
    /// Odd rashi: natal; even rashi: natal + offset.
    ParityOffset(u8),
    /// Odd rashi: `odd`; even rashi: `even` (absolute rashi indices).
    ParityFixed { odd: u8, even: u8 },
    /// Start keyed by element, in Fire/Earth/Air/Water order.
    ByElement([u8; 4]),
    /// Start keyed by modality, in Movable/Fixed/Dual order.
    ByModality([u8; 3]),
}

/// Per-amsha descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AmshaRule {
    /// `target = (start + div_idx * step) % 12`.
    Uniform { start: StartRule, step: u8 },
    /// D2: each half maps to the Sun's sign (Simha) or the Moon's (Karka).
    Hora,
    /// D30: five unequal bands; degree is not rescaled.
    Trimshamsha,
}

const fn amsha_rule(amsha: Amsha) -> AmshaRule {
    use AmshaRule::Uniform;
    match amsha {
        Amsha::D1 | Amsha::D12 | Amsha::D60 => Uniform {
            start: StartRule::Natal,
            step: 1,
        },
        Amsha::D2 => AmshaRule::Hora,
        Amsha::D3 => Uniform {
            start: StartRule::Natal,
            step: 4,
        },
        Amsha::D4 => Uniform {
            start: StartRule::ParityOffset(3),
            step: 1,
        },
        Amsha::D7 => Uniform {
            start: StartRule::ParityOffset(6),
            step: 1,
        },
        Amsha::D9 => Uniform {
            // Mesha, Makara, Tula, Karka
            start: StartRule::ByElement([0, 9, 6, 3]),
            step: 1,
        },
        Amsha::D10 => Uniform {
            start: StartRule::ParityOffset(8),
            step: 1,
        },
        Amsha::D16 => Uniform {
            // Mesha, Simha, Dhanu
            start: StartRule::ByModality([0, 4, 8]),
            step: 1,
        },
        Amsha::D20 => Uniform {
            // Mesha, Dhanu, Simha
            start: StartRule::ByModality([0, 8, 4]),
            step: 1,
        },
        Amsha::D24 => Uniform {
            start: StartRule::ParityFixed { odd: 4, even: 3 },
            step: 1,
        },
        Amsha::D30 => AmshaRule::Trimshamsha,
    }
}

/// Trimshamsha bands as (exclusive end degree, target rashi).
/// Odd: Mangal 5, Shani 5, Guru 8, Buddh 7, Shukra 5.
const TRIMSHAMSHA_ODD: [(f64, u8); 5] = [(5.0, 0), (10.0, 10), (18.0, 8), (25.0, 2), (30.0, 1)];
/// Even: Shukra 5, Buddh 7, Guru 8, Shani 5, Mangal 5.
const TRIMSHAMSHA_EVEN: [(f64, u8); 5] = [(5.0, 1), (12.0, 2), (20.0, 8), (25.0, 10), (30.0, 0)];

fn is_odd_rashi(rashi_idx: u8) -> bool {
    // 0-indexed: 0,2,4.. are the odd signs of the 1-based count
    rashi_idx % 2 == 0
}

fn start_rashi(rule: StartRule, natal: u8) -> u8 {
    match rule {
        StartRule::Natal => natal,
        StartRule::ParityOffset(offset) => {
            if is_odd_rashi(natal) {
                natal
            } else {
                (natal + offset) % 12
            }
        }
        StartRule::ParityFixed { odd, even } => {
            if is_odd_rashi(natal) {
                odd
            } else {
                even
            }
        }
        StartRule::ByElement(starts) => {
            let slot = match ALL_RASHIS[natal as usize].element() {
                RashiElement::Fire => 0,
                RashiElement::Earth => 1,
                RashiElement::Air => 2,
                RashiElement::Water => 3,
            };
            starts[slot]
        }
        StartRule::ByModality(starts) => {
            let slot = match ALL_RASHIS[natal as usize].modality() {
                RashiModality::Movable => 0,
                RashiModality::Fixed => 1,
                RashiModality::Dual => 2,
            };
            starts[slot]
        }
    }
}

// ---------------------------------------------------------------------------
// Core transformation
// ---------------------------------------------------------------------------

/// A position remapped into a divisional chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DivisionalPosition {
    pub amsha: Amsha,
    pub rashi: Rashi,
    /// 0-based rashi index in the divisional chart.
    pub rashi_index: u8,
    /// Degrees within the divisional rashi, [0, 30).
    pub degree: f64,
    /// `rashi_index * 30 + degree`, in [0, 360).
    pub longitude: f64,
    /// Which division of the natal rashi the input fell in; for D30 the
    /// 0-based band index.
    pub division_index: u16,
}

/// Transform a sidereal longitude through an amsha division.
pub fn amsha_position(sidereal_lon: f64, amsha: Amsha) -> DivisionalPosition {
    let natal = rashi_from_longitude(sidereal_lon);
    let rashi_idx = natal.rashi_index;
    let pos_in_rashi = natal.degrees_in_rashi;
    let n = amsha.divisions();
    let span = 30.0 / n as f64;

    let (target, degree, division_index) = match amsha_rule(amsha) {
        AmshaRule::Uniform { start, step } => {
            let div_idx = ((pos_in_rashi / span).floor() as u16).min(n - 1);
            let first = start_rashi(start, rashi_idx) as u16;
            let target = ((first + div_idx * step as u16) % 12) as u8;
            let degree = (pos_in_rashi - div_idx as f64 * span) * n as f64;
            (target, degree, div_idx)
        }
        AmshaRule::Hora => {
            let div_idx = ((pos_in_rashi / span).floor() as u16).min(1);
            let first_half = div_idx == 0;
            let target = if is_odd_rashi(rashi_idx) == first_half { 4 } else { 3 };
            let degree = (pos_in_rashi - div_idx as f64 * span) * 2.0;
            (target, degree, div_idx)
        }
        AmshaRule::Trimshamsha => {
            let bands = if is_odd_rashi(rashi_idx) {
                &TRIMSHAMSHA_ODD
            } else {
                &TRIMSHAMSHA_EVEN
            };
            let band = bands
                .iter()
                .position(|(end, _)| pos_in_rashi < *end)
                .unwrap_or(bands.len() - 1);
            (bands[band].1, pos_in_rashi, band as u16)
        }
    };

    // Scaling can land a hair above 30.0 from floating-point error
    let degree = if degree >= 30.0 {
        30.0 - 1e-12
    } else {
        degree.max(0.0)
    };
    DivisionalPosition {
        amsha,
        rashi: ALL_RASHIS[target as usize],
        rashi_index: target,
        degree,
        longitude: normalize_360(target as f64 * 30.0 + degree),
        division_index,
    }
}

/// Transform a longitude given as a division code (`"D9"`, `"9"`, ...).
pub fn divisional_chart(sidereal_lon: f64, code: &str) -> Result<DivisionalPosition, VedicError> {
    let amsha = Amsha::from_code(code)?;
    Ok(amsha_position(sidereal_lon, amsha))
}

/// One longitude through all 13 amshas, keyed by amsha (iterates in
/// `SHODASHA_SUBSET` order).
pub fn all_amsha_positions(sidereal_lon: f64) -> BTreeMap<Amsha, DivisionalPosition> {
    SHODASHA_SUBSET
        .iter()
        .map(|&a| (a, amsha_position(sidereal_lon, a)))
        .collect()
}

/// One longitude through the seven saptavarga amshas, in `SAPTAVARGA` order.
pub fn saptavarga_rashis(sidereal_lon: f64) -> [u8; 7] {
    let mut out = [0u8; 7];
    for (slot, amsha) in out.iter_mut().zip(SAPTAVARGA) {
        *slot = amsha_position(sidereal_lon, amsha).rashi_index;
    }
    out
}

/// Vargottama: the D1 and D9 rashis coincide.
pub fn is_vargottama(sidereal_lon: f64) -> bool {
    amsha_position(sidereal_lon, Amsha::D1).rashi_index
        == amsha_position(sidereal_lon, Amsha::D9).rashi_index
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
