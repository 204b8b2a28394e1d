//! Shared utility functions for vedic calculations.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-15 % 360 + 360 rounds to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Whole-sign house number (1-12) of a rashi counted from the ascendant rashi.
///
/// `house_from_rashi(asc, asc) == 1`; both indices are 0-based rashi indices.
pub fn house_from_rashi(rashi_index: u8, ascendant_rashi: u8) -> u8 {
    ((rashi_index as i16 - ascendant_rashi as i16).rem_euclid(12) + 1) as u8
}

/// House distance (1-12) of `to` counted from `from`, both 1-based house numbers
/// or both 0-based rashi indices.
pub fn house_distance(from: u8, to: u8) -> u8 {
    ((to as i16 - from as i16).rem_euclid(12) + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero() {
        assert!((normalize_360(0.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_positive() {
        assert!((normalize_360(45.0) - 45.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_360_wraps() {
        assert!((normalize_360(360.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_360() {
        let r = normalize_360(-1e-15);
        assert!((0.0..360.0).contains(&r));
    }

    #[test]
    fn normalize_large_negative() {
        assert!((normalize_360(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn house_of_ascendant_is_first() {
        for asc in 0..12 {
            assert_eq!(house_from_rashi(asc, asc), 1);
        }
    }

    #[test]
    fn house_wraps_behind_ascendant() {
        // Lagna in Karka (3), planet in Mithuna (2) → 12th house
        assert_eq!(house_from_rashi(2, 3), 12);
        assert_eq!(house_from_rashi(9, 3), 7);
    }

    #[test]
    fn house_distance_counts_inclusive() {
        assert_eq!(house_distance(1, 1), 1);
        assert_eq!(house_distance(1, 4), 4);
        assert_eq!(house_distance(10, 1), 4);
    }
}
