//! Vimshottari dasha (planetary period) calculations.
//!
//! A 120-year cycle of nine rulers, anchored at birth by the Moon's
//! nakshatra. Three hierarchical levels are generated (Mahadasha,
//! Antardasha, Pratyantardasha), each subdivided proportionally with the
//! same rule: a child ruled by `g` receives `years(g) / 120` of its
//! parent's span, starting from the parent's own ruler.

pub mod balance;
pub mod query;
pub mod subperiod;
pub mod types;

pub use balance::{dasha_balance, full_timeline, major_periods};
pub use query::{current_periods, find_active_period};
pub use subperiod::{cyclic_sequence, sub_periods, sub_sub_periods, subdivide};
pub use types::{
    CurrentDasha, DASHA_SEQUENCE, DAYS_PER_YEAR, DEFAULT_HORIZON_YEARS, DashaBalance, DashaLevel,
    DashaPeriod, MAX_HORIZON_YEARS, MajorPeriodDetail, VIMSHOTTARI_TOTAL_YEARS, dasha_years,
};
