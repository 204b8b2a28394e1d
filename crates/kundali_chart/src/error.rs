//! Error types for chart orchestration.

use kundali_vedic_base::VedicError;
use thiserror::Error;

/// Failures reported by an ephemeris provider.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The provider has no data for this body.
    #[error("no ephemeris data for body {0}")]
    UnknownBody(String),
    /// Sidereal model name not recognised.
    #[error("unknown ayanamsa model: {0}")]
    UnknownModel(String),
    /// The provider has no data covering this instant or model.
    #[error("no ephemeris data at JD {jd} for {model}")]
    NoData { jd: f64, model: &'static str },
    /// The provider returned a non-finite or out-of-range value.
    #[error("invalid ephemeris value for {body}: {reason}")]
    InvalidValue { body: String, reason: &'static str },
    /// A snapshot could not be parsed.
    #[error("snapshot parse error: {0}")]
    Snapshot(String),
    /// Backend failure (I/O, remote service, ...).
    #[error("ephemeris backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors from chart-level operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Upstream provider failure, passed through unchanged.
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    /// Core calculation rejected its inputs.
    #[error(transparent)]
    Vedic(#[from] VedicError),
    /// Civil time cannot be converted.
    #[error("invalid time: {0}")]
    InvalidTime(String),
    /// Geographic coordinate outside its range.
    #[error("invalid place: {coordinate} {value} outside [-{limit}, {limit}]")]
    InvalidPlace {
        coordinate: &'static str,
        value: f64,
        limit: f64,
    },
    /// Sunrise and sunset must be given together.
    #[error("day window needs both sunrise and sunset")]
    PartialDayWindow,
}

impl ChartError {
    /// True when the failure came from the ephemeris provider.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Ephemeris(_))
    }
}
