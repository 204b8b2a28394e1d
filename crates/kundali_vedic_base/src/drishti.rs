//! Whole-sign graha drishti (planetary aspects).
//!
//! Every graha aspects the 7th sign from itself. Mars adds the 4th and
//! 8th, Jupiter the 5th and 9th, Saturn the 3rd and 10th. The nodes cast
//! only the 7th-sign aspect.

use crate::error::VedicError;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::util::house_distance;

/// Sign distances (1-based, counted from the aspecting graha) aspected by `graha`.
pub const fn aspected_distances(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Mangal => &[4, 7, 8],
        Graha::Guru => &[5, 7, 9],
        Graha::Shani => &[3, 7, 10],
        _ => &[7],
    }
}

/// Does a graha in `from_rashi` aspect `to_rashi`?
pub fn aspects_rashi(graha: Graha, from_rashi: u8, to_rashi: u8) -> bool {
    aspected_distances(graha).contains(&house_distance(from_rashi, to_rashi))
}

/// Rashis (0-based) aspected by a graha placed in `from_rashi`.
pub fn aspected_rashis(graha: Graha, from_rashi: u8) -> Vec<u8> {
    aspected_distances(graha)
        .iter()
        .map(|d| (from_rashi + d - 1) % 12)
        .collect()
}

/// Grahas aspecting the graha `target`, given rashis indexed by `Graha::index()`.
///
/// A graha never aspects itself; conjunction is not an aspect.
pub fn aspecting_grahas(graha_rashis: &[u8; 9], target: Graha) -> Result<Vec<Graha>, VedicError> {
    if let Some(&bad) = graha_rashis.iter().find(|&&r| r > 11) {
        return Err(VedicError::SignOutOfRange(bad));
    }
    let to = graha_rashis[target.index() as usize];
    Ok(ALL_GRAHAS
        .into_iter()
        .filter(|&g| g != target)
        .filter(|&g| aspects_rashi(g, graha_rashis[g.index() as usize], to))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventh_for_everyone() {
        for g in ALL_GRAHAS {
            assert!(aspects_rashi(g, 0, 6), "{g:?}");
        }
    }

    #[test]
    fn special_aspects() {
        assert!(aspects_rashi(Graha::Mangal, 0, 3));
        assert!(aspects_rashi(Graha::Mangal, 0, 7));
        assert!(aspects_rashi(Graha::Guru, 10, 2)); // 5th from Kumbha is Mithuna
        assert!(aspects_rashi(Graha::Shani, 0, 9));
        assert!(!aspects_rashi(Graha::Surya, 0, 3));
        assert!(!aspects_rashi(Graha::Rahu, 0, 4));
    }

    #[test]
    fn aspected_rashis_wrap() {
        assert_eq!(aspected_rashis(Graha::Guru, 8), vec![0, 2, 4]);
        assert_eq!(aspected_rashis(Graha::Chandra, 11), vec![5]);
    }

    #[test]
    fn aspecting_grahas_excludes_self_and_conjunction() {
        // Sun in Mesha, Saturn in Tula (7th), Mars in Makara (4th from Mars is Mesha),
        // Jupiter in Mesha (conjunct, no aspect)
        let rashis = [0, 5, 9, 1, 0, 2, 6, 3, 9];
        let a = aspecting_grahas(&rashis, Graha::Surya).unwrap();
        assert!(a.contains(&Graha::Shani));
        assert!(a.contains(&Graha::Mangal));
        assert!(!a.contains(&Graha::Guru));
        assert!(!a.contains(&Graha::Surya));
    }

    #[test]
    fn rejects_bad_rashi() {
        assert!(aspecting_grahas(&[0, 0, 0, 0, 0, 0, 0, 0, 12], Graha::Surya).is_err());
    }
}
