//! Shadbala (six-fold planetary strength) computation.
//!
//! Pure math, no ephemeris dependency. **Sapta grahas only** (Sun through
//! Saturn); Rahu/Ketu are rejected by [`shadbala`].
//!
//! The six components, each reported in rupas (1 rupa = 60 virupas):
//! 1. Sthana Bala (positional): uchcha + saptavargaja + ojhayugma + kendradi
//!    + drekkana, summed in virupas then divided by 60
//! 2. Dig Bala (directional)
//! 3. Kala Bala (temporal): day/night affinity
//! 4. Cheshta Bala (motional): retrograde > stationary > direct
//! 5. Naisargika Bala (natural)
//! 6. Drik Bala (aspectual)
//!
//! Values are exact; rounding is left to presentation.

use serde::Serialize;

use crate::amsha::saptavarga_rashis;
use crate::error::VedicError;
use crate::graha::{Graha, SAPTA_GRAHAS};
use crate::graha_relationships::{
    BeneficNature, GrahaGender, debilitation_degree, dignity_in_rashi, graha_gender,
    natural_benefic_malefic,
};
use crate::util::{house_from_rashi, normalize_360};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Virupas per rupa.
pub const VIRUPAS_PER_RUPA: f64 = 60.0;

/// Natural strength in virupas, Sun..Saturn.
pub const NAISARGIKA_BALA: [f64; 7] = [60.0, 51.43, 17.14, 25.71, 34.28, 42.85, 8.57];

/// House of maximum directional strength, Sun..Saturn.
pub const DIG_BALA_BHAVA: [u8; 7] = [10, 4, 10, 1, 1, 4, 7];

/// Minimum total (rupas) for a graha to be considered strong, Sun..Saturn.
pub const REQUIRED_STRENGTH: [f64; 7] = [6.5, 6.0, 5.0, 7.0, 6.5, 5.5, 5.0];

/// Contribution of a single aspecting graha to Drik Bala, in virupas.
const DRIK_UNIT: f64 = 15.0;

/// Offset lifting the signed aspect sum onto a non-negative scale.
const DRIK_OFFSET: f64 = 30.0;

fn sapta_index(graha: Graha) -> Result<usize, VedicError> {
    if graha.is_sapta() {
        Ok(graha.index() as usize)
    } else {
        Err(VedicError::InvalidInput(
            "shadbala is defined for the seven classical grahas",
        ))
    }
}

// ---------------------------------------------------------------------------
// Sthana Bala sub-components (virupas)
// ---------------------------------------------------------------------------

/// Uchcha Bala: 60 at exaltation, 0 at debilitation, linear in between.
pub fn uchcha_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    let Some(debil) = debilitation_degree(graha) else {
        return 0.0;
    };
    let diff = (normalize_360(sidereal_lon) - debil).abs();
    let dist = if diff > 180.0 { 360.0 - diff } else { diff };
    dist / 180.0 * 60.0
}

/// Saptavargaja Bala: mean of dignity points over the seven vargas.
///
/// `varga_rashis` follows `SAPTAVARGA` order (D1, D2, D3, D7, D9, D12, D30).
pub fn saptavargaja_bala(graha: Graha, varga_rashis: &[u8; 7]) -> f64 {
    let total: f64 = varga_rashis
        .iter()
        .map(|&r| dignity_in_rashi(graha, r).varga_points())
        .sum();
    total / 7.0
}

/// Ojhayugma Bala: 15 for a female graha in an even rashi, or any other
/// graha in an odd rashi.
pub fn ojhayugma_bala(graha: Graha, rashi_index: u8) -> f64 {
    let odd = rashi_index % 2 == 0;
    let wants_odd = graha_gender(graha) != GrahaGender::Female;
    if odd == wants_odd { 15.0 } else { 0.0 }
}

/// Kendradi Bala: kendra(1,4,7,10)=60, panaphara(2,5,8,11)=30, apoklima=15.
pub fn kendradi_bala(bhava_number: u8) -> f64 {
    match bhava_number {
        1 | 4 | 7 | 10 => 60.0,
        2 | 5 | 8 | 11 => 30.0,
        _ => 15.0,
    }
}

/// Drekkana Bala: male in 1st decanate, neuter in 2nd, female in 3rd = 15.
pub fn drekkana_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    let deg_in_rashi = normalize_360(sidereal_lon) % 30.0;
    let decanate = if deg_in_rashi < 10.0 {
        1
    } else if deg_in_rashi < 20.0 {
        2
    } else {
        3
    };
    match (graha_gender(graha), decanate) {
        (GrahaGender::Male, 1) | (GrahaGender::Neuter, 2) | (GrahaGender::Female, 3) => 15.0,
        _ => 0.0,
    }
}

/// Sthana Bala breakdown. Sub-components in virupas, `total` in rupas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SthanaBalaBreakdown {
    pub uchcha: f64,
    pub saptavargaja: f64,
    pub ojhayugma: f64,
    pub kendradi: f64,
    pub drekkana: f64,
    pub total: f64,
}

/// Sthana bala for a single graha.
pub fn sthana_bala(
    graha: Graha,
    sidereal_lon: f64,
    bhava: u8,
    varga_rashis: &[u8; 7],
) -> SthanaBalaBreakdown {
    let rashi = (normalize_360(sidereal_lon) / 30.0).floor() as u8;
    let u = uchcha_bala(graha, sidereal_lon);
    let s = saptavargaja_bala(graha, varga_rashis);
    let o = ojhayugma_bala(graha, rashi.min(11));
    let k = kendradi_bala(bhava);
    let d = drekkana_bala(graha, sidereal_lon);
    SthanaBalaBreakdown {
        uchcha: u,
        saptavargaja: s,
        ojhayugma: o,
        kendradi: k,
        drekkana: d,
        total: (u + s + o + k + d) / VIRUPAS_PER_RUPA,
    }
}

// ---------------------------------------------------------------------------
// Remaining components (rupas)
// ---------------------------------------------------------------------------

/// Dig Bala: houses from the weakest house (opposite the strongest), / 6.
pub fn dig_bala(graha: Graha, bhava_number: u8) -> f64 {
    let Ok(gi) = sapta_index(graha) else {
        return 0.0;
    };
    let strong = DIG_BALA_BHAVA[gi];
    let weak = (strong - 1 + 6) % 12 + 1;
    let diff = (bhava_number as i16 - weak as i16).unsigned_abs();
    let dist = if diff > 6 { 12 - diff } else { diff };
    dist as f64 / 6.0
}

/// Kala Bala: day grahas (Sun, Jupiter, Venus) full by day, night grahas
/// (Moon, Mars, Saturn) full by night, Mercury always half.
pub fn kala_bala(graha: Graha, is_day_birth: bool) -> f64 {
    match graha {
        Graha::Surya | Graha::Guru | Graha::Shukra => {
            if is_day_birth { 1.0 } else { 0.0 }
        }
        Graha::Chandra | Graha::Mangal | Graha::Shani => {
            if is_day_birth { 0.0 } else { 1.0 }
        }
        Graha::Buddh => 0.5,
        Graha::Rahu | Graha::Ketu => 0.0,
    }
}

/// Cheshta Bala: luminaries fixed at 0.5; otherwise retrograde 1.0,
/// stationary 0.5, direct 0.25.
pub fn cheshta_bala(graha: Graha, speed_deg_per_day: f64) -> f64 {
    if matches!(graha, Graha::Surya | Graha::Chandra) {
        return 0.5;
    }
    if speed_deg_per_day < 0.0 {
        1.0
    } else if speed_deg_per_day == 0.0 {
        0.5
    } else {
        0.25
    }
}

/// Naisargika (natural) bala in rupas.
pub fn naisargika_bala(graha: Graha) -> f64 {
    sapta_index(graha).map_or(0.0, |gi| NAISARGIKA_BALA[gi] / VIRUPAS_PER_RUPA)
}

/// Drik Bala: +15 per benefic aspect, -15 per malefic, offset by 30 and
/// floored at zero.
pub fn drik_bala(aspecting: &[Graha]) -> f64 {
    let signed: f64 = aspecting
        .iter()
        .map(|&g| match natural_benefic_malefic(g) {
            BeneficNature::Benefic => DRIK_UNIT,
            BeneficNature::Malefic => -DRIK_UNIT,
        })
        .sum();
    (signed + DRIK_OFFSET).max(0.0) / VIRUPAS_PER_RUPA
}

// ---------------------------------------------------------------------------
// Complete Shadbala
// ---------------------------------------------------------------------------

/// Inputs for one graha.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadbalaInputs {
    pub sidereal_lon: f64,
    /// Longitude speed in deg/day; negative is retrograde.
    pub speed: f64,
    pub ascendant_rashi: u8,
    /// Rashi in each saptavarga chart, `SAPTAVARGA` order.
    pub varga_rashis: [u8; 7],
    /// Grahas aspecting this one.
    pub aspects: Vec<Graha>,
    pub is_day_birth: bool,
}

impl ShadbalaInputs {
    /// Inputs with varga rashis derived from the longitude.
    pub fn from_longitude(
        sidereal_lon: f64,
        speed: f64,
        ascendant_rashi: u8,
        aspects: Vec<Graha>,
        is_day_birth: bool,
    ) -> Self {
        Self {
            sidereal_lon,
            speed,
            ascendant_rashi,
            varga_rashis: saptavarga_rashis(sidereal_lon),
            aspects,
            is_day_birth,
        }
    }
}

/// Complete Shadbala for one graha. Components and total in rupas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadbalaResult {
    pub graha: Graha,
    pub sthana: SthanaBalaBreakdown,
    pub sthana_bala: f64,
    pub dig_bala: f64,
    pub kala_bala: f64,
    pub cheshta_bala: f64,
    pub naisargika_bala: f64,
    pub drik_bala: f64,
    pub total: f64,
    pub required_strength: f64,
    pub is_strong: bool,
    /// `total / required_strength * 100`.
    pub strength_percentage: f64,
}

/// Compute complete Shadbala for a single graha.
pub fn shadbala(graha: Graha, inputs: &ShadbalaInputs) -> Result<ShadbalaResult, VedicError> {
    let gi = sapta_index(graha)?;
    if inputs.ascendant_rashi > 11 {
        return Err(VedicError::SignOutOfRange(inputs.ascendant_rashi));
    }
    if !inputs.sidereal_lon.is_finite() || !inputs.speed.is_finite() {
        return Err(VedicError::InvalidInput("longitude and speed must be finite"));
    }

    let rashi = ((normalize_360(inputs.sidereal_lon) / 30.0).floor() as u8).min(11);
    let bhava = house_from_rashi(rashi, inputs.ascendant_rashi);

    let sthana = sthana_bala(graha, inputs.sidereal_lon, bhava, &inputs.varga_rashis);
    let dig = dig_bala(graha, bhava);
    let kala = kala_bala(graha, inputs.is_day_birth);
    let cheshta = cheshta_bala(graha, inputs.speed);
    let naisargika = naisargika_bala(graha);
    let drik = drik_bala(&inputs.aspects);

    let total = sthana.total + dig + kala + cheshta + naisargika + drik;
    let required = REQUIRED_STRENGTH[gi];

    Ok(ShadbalaResult {
        graha,
        sthana,
        sthana_bala: sthana.total,
        dig_bala: dig,
        kala_bala: kala,
        cheshta_bala: cheshta,
        naisargika_bala: naisargika,
        drik_bala: drik,
        total,
        required_strength: required,
        is_strong: total >= required,
        strength_percentage: total / required * 100.0,
    })
}

/// Shadbala of all seven grahas with the extremes picked out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllShadbala {
    pub results: Vec<ShadbalaResult>,
    pub strongest: Graha,
    pub weakest: Graha,
}

/// Compute Shadbala for all 7 sapta grahas; `inputs` follows Sun..Saturn.
///
/// Ties for strongest/weakest go to the earlier graha.
pub fn all_shadbala(inputs: &[ShadbalaInputs; 7]) -> Result<AllShadbala, VedicError> {
    let results = SAPTA_GRAHAS
        .iter()
        .zip(inputs)
        .map(|(&g, inp)| shadbala(g, inp))
        .collect::<Result<Vec<_>, _>>()?;

    let mut strongest = &results[0];
    let mut weakest = &results[0];
    for r in &results[1..] {
        if r.total > strongest.total {
            strongest = r;
        }
        if r.total < weakest.total {
            weakest = r;
        }
    }
    let (strongest, weakest) = (strongest.graha, weakest.graha);
    Ok(AllShadbala {
        results,
        strongest,
        weakest,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // --- Uchcha Bala ---

    #[test]
    fn uchcha_sun_at_exaltation() {
        assert!((uchcha_bala(Graha::Surya, 10.0) - 60.0).abs() < EPS);
    }

    #[test]
    fn uchcha_sun_at_debilitation() {
        assert!(uchcha_bala(Graha::Surya, 190.0).abs() < EPS);
    }

    #[test]
    fn uchcha_sun_at_90deg_from_exalt() {
        assert!((uchcha_bala(Graha::Surya, 100.0) - 30.0).abs() < EPS);
    }

    #[test]
    fn uchcha_venus_wraps_through_zero() {
        // Venus exalted at 357, 6 deg past it is 3 → distance to 177 is 174
        assert!((uchcha_bala(Graha::Shukra, 3.0) - 174.0 / 3.0).abs() < EPS);
    }

    // --- Saptavargaja ---

    #[test]
    fn saptavargaja_mixed_dignities() {
        // Sun: exalted, own, neutral, debilitated, neutral x3 → (30+20+10+0+30)/7
        let rashis = [0, 4, 2, 6, 1, 3, 5];
        let expected = (30.0 + 20.0 + 10.0 + 0.0 + 10.0 * 3.0) / 7.0;
        assert!((saptavargaja_bala(Graha::Surya, &rashis) - expected).abs() < EPS);
    }

    // --- Ojhayugma ---

    #[test]
    fn ojhayugma_parity() {
        assert_eq!(ojhayugma_bala(Graha::Surya, 0), 15.0);
        assert_eq!(ojhayugma_bala(Graha::Surya, 1), 0.0);
        assert_eq!(ojhayugma_bala(Graha::Chandra, 1), 15.0);
        assert_eq!(ojhayugma_bala(Graha::Shukra, 0), 0.0);
        assert_eq!(ojhayugma_bala(Graha::Buddh, 2), 15.0);
    }

    // --- Kendradi ---

    #[test]
    fn kendradi_categories() {
        for b in [1u8, 4, 7, 10] {
            assert_eq!(kendradi_bala(b), 60.0, "bhava {b}");
        }
        for b in [2u8, 5, 8, 11] {
            assert_eq!(kendradi_bala(b), 30.0, "bhava {b}");
        }
        for b in [3u8, 6, 9, 12] {
            assert_eq!(kendradi_bala(b), 15.0, "bhava {b}");
        }
    }

    // --- Drekkana ---

    #[test]
    fn drekkana_by_gender() {
        assert_eq!(drekkana_bala(Graha::Mangal, 5.0), 15.0);
        assert_eq!(drekkana_bala(Graha::Mangal, 15.0), 0.0);
        assert_eq!(drekkana_bala(Graha::Shani, 45.0), 15.0);
        assert_eq!(drekkana_bala(Graha::Chandra, 85.0), 15.0);
        assert_eq!(drekkana_bala(Graha::Chandra, 5.0), 0.0);
    }

    // --- Dig Bala ---

    #[test]
    fn dig_sun_at_max() {
        assert!((dig_bala(Graha::Surya, 10) - 1.0).abs() < EPS);
    }

    #[test]
    fn dig_sun_at_weakest() {
        assert!(dig_bala(Graha::Surya, 4).abs() < EPS);
    }

    #[test]
    fn dig_sun_at_bhava_7() {
        // weak house 4 → |7-4| = 3 → 0.5
        assert!((dig_bala(Graha::Surya, 7) - 0.5).abs() < EPS);
    }

    #[test]
    fn dig_saturn_wraps() {
        // Saturn strong in 7, weak in 1; bhava 11 → |11-1|=10 → 2
        assert!((dig_bala(Graha::Shani, 11) - 2.0 / 6.0).abs() < EPS);
    }

    // --- Kala / Cheshta / Naisargika / Drik ---

    #[test]
    fn kala_day_night() {
        assert_eq!(kala_bala(Graha::Surya, true), 1.0);
        assert_eq!(kala_bala(Graha::Surya, false), 0.0);
        assert_eq!(kala_bala(Graha::Shani, false), 1.0);
        assert_eq!(kala_bala(Graha::Buddh, true), 0.5);
        assert_eq!(kala_bala(Graha::Buddh, false), 0.5);
    }

    #[test]
    fn cheshta_tiers() {
        assert_eq!(cheshta_bala(Graha::Mangal, -0.2), 1.0);
        assert_eq!(cheshta_bala(Graha::Mangal, 0.0), 0.5);
        assert_eq!(cheshta_bala(Graha::Mangal, 0.5), 0.25);
        assert_eq!(cheshta_bala(Graha::Chandra, -1.0), 0.5);
    }

    #[test]
    fn naisargika_sun_is_one_rupa() {
        assert!((naisargika_bala(Graha::Surya) - 1.0).abs() < EPS);
        assert!((naisargika_bala(Graha::Shani) - 8.57 / 60.0).abs() < EPS);
    }

    #[test]
    fn drik_offsets_and_floors() {
        assert!((drik_bala(&[]) - 0.5).abs() < EPS);
        assert!((drik_bala(&[Graha::Guru, Graha::Shukra]) - 1.0).abs() < EPS);
        assert_eq!(drik_bala(&[Graha::Shani, Graha::Mangal, Graha::Rahu]), 0.0);
    }

    // --- Complete ---

    #[test]
    fn complete_sums_components() {
        let inputs = ShadbalaInputs::from_longitude(10.0, 0.98, 9, vec![Graha::Guru], true);
        let r = shadbala(Graha::Surya, &inputs).unwrap();
        let sum = r.sthana_bala + r.dig_bala + r.kala_bala + r.cheshta_bala
            + r.naisargika_bala
            + r.drik_bala;
        assert!((r.total - sum).abs() < EPS);
        assert_eq!(r.is_strong, r.total >= 6.5);
        assert!((r.strength_percentage - r.total / 6.5 * 100.0).abs() < EPS);
        // Sun exalted in Mesha, 4th from Makara lagna
        assert!((r.sthana.uchcha - 60.0).abs() < EPS);
        assert_eq!(r.sthana.kendradi, 60.0);
    }

    #[test]
    fn nodes_rejected() {
        let inputs = ShadbalaInputs::from_longitude(10.0, -0.05, 0, vec![], true);
        assert!(shadbala(Graha::Rahu, &inputs).is_err());
    }

    #[test]
    fn all_picks_extremes() {
        let lons = [10.0, 33.0, 298.0, 165.0, 95.0, 357.0, 200.0];
        let inputs: [ShadbalaInputs; 7] = std::array::from_fn(|i| {
            ShadbalaInputs::from_longitude(lons[i], 0.5, 0, vec![], true)
        });
        let all = all_shadbala(&inputs).unwrap();
        assert_eq!(all.results.len(), 7);
        let max = all.results.iter().map(|r| r.total).fold(f64::MIN, f64::max);
        let min = all.results.iter().map(|r| r.total).fold(f64::MAX, f64::min);
        let strongest = all.results.iter().find(|r| r.graha == all.strongest).unwrap();
        let weakest = all.results.iter().find(|r| r.graha == all.weakest).unwrap();
        assert_eq!(strongest.total, max);
        assert_eq!(weakest.total, min);
    }
}
