//! Graha dignity and classification.
//!
//! Provides exaltation/debilitation data, own-sign ownership, a sign-level
//! dignity lookup, benefic/malefic classification and gender. The dignity
//! model is sign-based only: exaltation sign, debilitation sign, own sign,
//! otherwise neutral. Friendship tables are not consulted.

use serde::Serialize;

use crate::graha::Graha;

// ---------------------------------------------------------------------------
// Exaltation & Debilitation
// ---------------------------------------------------------------------------

/// Exaltation degree (sidereal) for sapta grahas. Returns None for Rahu/Ketu.
///
/// Sun 10 Ari=10, Moon 3 Tau=33, Mars 28 Cap=298,
/// Mercury 15 Vir=165, Jupiter 5 Can=95, Venus 27 Pis=357, Saturn 20 Lib=200.
pub const fn exaltation_degree(graha: Graha) -> Option<f64> {
    match graha {
        Graha::Surya => Some(10.0),
        Graha::Chandra => Some(33.0),
        Graha::Mangal => Some(298.0),
        Graha::Buddh => Some(165.0),
        Graha::Guru => Some(95.0),
        Graha::Shukra => Some(357.0),
        Graha::Shani => Some(200.0),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Debilitation degree = exaltation + 180 mod 360. Returns None for Rahu/Ketu.
pub const fn debilitation_degree(graha: Graha) -> Option<f64> {
    match exaltation_degree(graha) {
        Some(e) => {
            let d = e + 180.0;
            if d >= 360.0 { Some(d - 360.0) } else { Some(d) }
        }
        None => None,
    }
}

/// Rashi index containing the exaltation degree.
pub fn exaltation_rashi(graha: Graha) -> Option<u8> {
    exaltation_degree(graha).map(|d| (d / 30.0).floor() as u8)
}

/// Rashi index containing the debilitation degree.
pub fn debilitation_rashi(graha: Graha) -> Option<u8> {
    debilitation_degree(graha).map(|d| (d / 30.0).floor() as u8)
}

/// Own-sign rashis for sapta grahas. Returns empty slice for Rahu/Ketu.
///
/// Sun [4], Moon [3], Mars [0,7], Mercury [2,5],
/// Jupiter [8,11], Venus [1,6], Saturn [9,10].
pub fn own_signs(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Surya => &[4],     // Simha
        Graha::Chandra => &[3],   // Karka
        Graha::Mangal => &[0, 7], // Mesha, Vrischika
        Graha::Buddh => &[2, 5],  // Mithuna, Kanya
        Graha::Guru => &[8, 11],  // Dhanu, Meena
        Graha::Shukra => &[1, 6], // Vrishabha, Tula
        Graha::Shani => &[9, 10], // Makara, Kumbha
        Graha::Rahu | Graha::Ketu => &[],
    }
}

// ---------------------------------------------------------------------------
// Dignity
// ---------------------------------------------------------------------------

/// Sign-level dignity of a graha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dignity {
    Exalted,
    OwnSign,
    Neutral,
    Debilitated,
}

impl Dignity {
    /// Varga points used by Saptavargaja Bala.
    pub const fn varga_points(self) -> f64 {
        match self {
            Self::Exalted => 30.0,
            Self::OwnSign => 20.0,
            Self::Neutral => 10.0,
            Self::Debilitated => 0.0,
        }
    }
}

/// Dignity of a graha occupying a rashi.
///
/// Exaltation wins over own sign (Mercury in Kanya is exalted).
/// Rahu/Ketu are always Neutral.
pub fn dignity_in_rashi(graha: Graha, rashi_index: u8) -> Dignity {
    if exaltation_rashi(graha) == Some(rashi_index) {
        Dignity::Exalted
    } else if debilitation_rashi(graha) == Some(rashi_index) {
        Dignity::Debilitated
    } else if own_signs(graha).contains(&rashi_index) {
        Dignity::OwnSign
    } else {
        Dignity::Neutral
    }
}

// ---------------------------------------------------------------------------
// Benefic/Malefic, Gender
// ---------------------------------------------------------------------------

/// Natural benefic or malefic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BeneficNature {
    Benefic,
    Malefic,
}

/// Natural benefic/malefic for each graha. Moon is always Benefic here.
pub const fn natural_benefic_malefic(graha: Graha) -> BeneficNature {
    match graha {
        Graha::Chandra | Graha::Buddh | Graha::Guru | Graha::Shukra => BeneficNature::Benefic,
        Graha::Surya | Graha::Mangal | Graha::Shani | Graha::Rahu | Graha::Ketu => {
            BeneficNature::Malefic
        }
    }
}

/// Graha gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GrahaGender {
    Male,
    Female,
    Neuter,
}

pub const fn graha_gender(graha: Graha) -> GrahaGender {
    match graha {
        Graha::Surya | Graha::Mangal | Graha::Guru => GrahaGender::Male,
        Graha::Chandra | Graha::Shukra => GrahaGender::Female,
        Graha::Buddh | Graha::Shani | Graha::Rahu | Graha::Ketu => GrahaGender::Neuter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::SAPTA_GRAHAS;

    #[test]
    fn debilitation_is_opposite() {
        for g in SAPTA_GRAHAS {
            let e = exaltation_degree(g).unwrap();
            let d = debilitation_degree(g).unwrap();
            let diff = (d - e).rem_euclid(360.0);
            assert!((diff - 180.0).abs() < 1e-10, "{g:?}");
        }
        assert!(exaltation_degree(Graha::Rahu).is_none());
    }

    #[test]
    fn venus_debilitation_wraps() {
        // 357 + 180 = 537 → 177 (Kanya)
        assert!((debilitation_degree(Graha::Shukra).unwrap() - 177.0).abs() < 1e-10);
        assert_eq!(debilitation_rashi(Graha::Shukra), Some(5));
    }

    #[test]
    fn exaltation_rashis() {
        assert_eq!(exaltation_rashi(Graha::Surya), Some(0));
        assert_eq!(exaltation_rashi(Graha::Mangal), Some(9));
        assert_eq!(exaltation_rashi(Graha::Guru), Some(3));
    }

    #[test]
    fn dignity_levels() {
        assert_eq!(dignity_in_rashi(Graha::Surya, 0), Dignity::Exalted);
        assert_eq!(dignity_in_rashi(Graha::Surya, 6), Dignity::Debilitated);
        assert_eq!(dignity_in_rashi(Graha::Surya, 4), Dignity::OwnSign);
        assert_eq!(dignity_in_rashi(Graha::Surya, 2), Dignity::Neutral);
        assert_eq!(dignity_in_rashi(Graha::Buddh, 5), Dignity::Exalted);
        assert_eq!(dignity_in_rashi(Graha::Ketu, 7), Dignity::Neutral);
    }

    #[test]
    fn varga_points_order() {
        assert!(Dignity::Exalted.varga_points() > Dignity::OwnSign.varga_points());
        assert!(Dignity::OwnSign.varga_points() > Dignity::Neutral.varga_points());
        assert_eq!(Dignity::Debilitated.varga_points(), 0.0);
    }

    #[test]
    fn benefics_and_gender() {
        assert_eq!(natural_benefic_malefic(Graha::Guru), BeneficNature::Benefic);
        assert_eq!(natural_benefic_malefic(Graha::Ketu), BeneficNature::Malefic);
        assert_eq!(graha_gender(Graha::Shukra), GrahaGender::Female);
        assert_eq!(graha_gender(Graha::Shani), GrahaGender::Neuter);
    }
}
