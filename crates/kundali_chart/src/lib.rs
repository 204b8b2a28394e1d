//! Chart-level Vedic astrology over an external ephemeris.
//!
//! This crate provides:
//! - The `EphemerisProvider` seam and an in-memory snapshot provider
//! - Civil time (`chrono`) to Julian Day conversion
//! - Positions of the nine grahas and the ascendant
//! - Chart-level dasha, divisional, strength, yoga, transit and
//!   panchanga operations built on `kundali_vedic_base`

pub mod dasha;
pub mod ephemeris;
pub mod error;
pub mod jyotish;
pub mod jyotish_types;
pub mod panchang;
pub mod time;

pub use dasha::{DashaTimeline, current_dasha, dasha_timeline};
pub use ephemeris::{
    AyanamshaModel, EphemerisProvider, EphemerisSnapshot, FixedEphemeris, RawPosition,
};
pub use error::{ChartError, EphemerisError};
pub use jyotish::{
    ashtakavarga_for_chart, divisional_chart_for, divisional_chart_from_positions, full_chart,
    positions, positions_at, shadbala_for_chart, shadbala_inputs, transit_for_chart, transits,
    yogas_for_chart,
};
pub use jyotish_types::{
    ASCENDANT_KEY, BirthData, BodyPosition, ChartOptions, ChartPositions, DayWindow,
    DivisionalChart, FullChart, TransitChart,
};
pub use panchang::{abhijit_for_day, choghadiya_for_day, day_span, panchanga_for_chart, vara_of};
pub use time::{datetime_to_jd, jd_to_datetime, parse_datetime};
