//! Error types for Vedic calculations.

use thiserror::Error;

/// Errors from Vedic base calculations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// Division code is not one of the 13 supported vargas.
    #[error("unknown division code: {0}")]
    UnknownDivision(String),
    /// Body name does not match any graha.
    #[error("unknown body: {0}")]
    UnknownBody(String),
    /// Rashi index outside 0..=11.
    #[error("rashi index out of range: {0}")]
    SignOutOfRange(u8),
    /// House number outside 1..=12.
    #[error("house number out of range: {0}")]
    HouseOutOfRange(u8),
    /// Malformed argument (non-finite value, wrong body class, ...).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Query instant lies outside the generated dasha timeline.
    #[error("instant {jd} is outside the dasha timeline [{start_jd}, {end_jd}]")]
    OutsideTimeline { jd: f64, start_jd: f64, end_jd: f64 },
}

impl VedicError {
    /// True for out-of-domain queries that may succeed with a larger horizon.
    pub fn is_out_of_domain(&self) -> bool {
        matches!(self, Self::OutsideTimeline { .. })
    }
}
