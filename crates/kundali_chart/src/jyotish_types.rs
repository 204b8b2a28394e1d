//! Types for chart-level orchestration.

use chrono::{DateTime, FixedOffset, Timelike};
use kundali_vedic_base::{
    ALL_GRAHAS, CurrentDasha, DashaBalance, DashaPeriod, DivisionalPosition, Graha, GroupedYogas,
    Nakshatra, NakshatraInfo, Rashi, SAPTA_GRAHAS, TransitAnalysis, house_from_rashi,
    nakshatra_from_longitude, rashi_from_longitude,
};
use serde::{Deserialize, Serialize};

use crate::ephemeris::{AyanamshaModel, RawPosition};
use crate::error::ChartError;
use crate::time::datetime_to_jd;

/// Pseudo-body key for the ascendant in position maps.
pub const ASCENDANT_KEY: &str = "ASCENDANT";

/// Birth (or event) moment and place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    /// Local civil time with its UTC offset.
    pub datetime: DateTime<FixedOffset>,
    /// Geographic latitude, degrees north.
    pub latitude: f64,
    /// Geographic longitude, degrees east.
    pub longitude: f64,
    #[serde(default)]
    pub ayanamsa: AyanamshaModel,
}

impl BirthData {
    pub fn new(
        datetime: DateTime<FixedOffset>,
        latitude: f64,
        longitude: f64,
        ayanamsa: AyanamshaModel,
    ) -> Result<Self, ChartError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ChartError::InvalidPlace {
                coordinate: "latitude",
                value: latitude,
                limit: 90.0,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ChartError::InvalidPlace {
                coordinate: "longitude",
                value: longitude,
                limit: 180.0,
            });
        }
        Ok(Self {
            datetime,
            latitude,
            longitude,
            ayanamsa,
        })
    }

    pub fn jd_ut(&self) -> f64 {
        datetime_to_jd(&self.datetime)
    }

    /// Same place and model at another instant.
    pub fn at(&self, datetime: DateTime<FixedOffset>) -> Self {
        Self { datetime, ..*self }
    }

    /// Day birth by local clock hour.
    pub fn is_day_birth(&self, window: &DayWindow) -> bool {
        window.contains(self.datetime.hour())
    }
}

/// Local-hour window counted as daytime, `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for DayWindow {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 18,
        }
    }
}

impl DayWindow {
    pub fn contains(&self, hour: u32) -> bool {
        (self.start_hour..self.end_hour).contains(&hour)
    }
}

/// Knobs for chart-level operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Dasha horizon in Julian years from birth.
    pub dasha_horizon_years: f64,
    pub day_window: DayWindow,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            dasha_horizon_years: kundali_vedic_base::dasha::DEFAULT_HORIZON_YEARS,
            day_window: DayWindow::default(),
        }
    }
}

/// Position details for one body (or the ascendant).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyPosition {
    /// `SUN` ... `KETU`, or `ASCENDANT`.
    pub name: &'static str,
    /// Sidereal longitude in degrees [0, 360).
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub speed: f64,
    pub rashi: Rashi,
    pub rashi_index: u8,
    pub rashi_degree: f64,
    pub nakshatra: Nakshatra,
    pub nakshatra_index: u8,
    pub nakshatra_pada: u8,
    pub is_retrograde: bool,
}

impl BodyPosition {
    pub fn from_raw(name: &'static str, raw: &RawPosition) -> Self {
        let rashi = rashi_from_longitude(raw.longitude);
        let nak = nakshatra_from_longitude(raw.longitude);
        Self {
            name,
            longitude: kundali_vedic_base::normalize_360(raw.longitude),
            latitude: raw.latitude,
            distance: raw.distance,
            speed: raw.speed,
            rashi: rashi.rashi,
            rashi_index: rashi.rashi_index,
            rashi_degree: rashi.degrees_in_rashi,
            nakshatra: nak.nakshatra,
            nakshatra_index: nak.nakshatra_index,
            nakshatra_pada: nak.pada,
            is_retrograde: raw.speed < 0.0,
        }
    }

    /// Ascendant pseudo-body: latitude, distance and speed are zero.
    pub fn ascendant(longitude: f64) -> Self {
        let raw = RawPosition {
            longitude,
            latitude: 0.0,
            distance: 0.0,
            speed: 0.0,
        };
        Self::from_raw(ASCENDANT_KEY, &raw)
    }
}

/// All nine grahas and the ascendant at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPositions {
    pub jd_ut: f64,
    pub ayanamsa: f64,
    /// Indexed by `Graha::index()`.
    pub grahas: [BodyPosition; 9],
    pub ascendant: BodyPosition,
}

impl ChartPositions {
    pub fn graha(&self, graha: Graha) -> &BodyPosition {
        &self.grahas[graha.index() as usize]
    }

    pub fn longitude(&self, graha: Graha) -> f64 {
        self.graha(graha).longitude
    }

    pub fn ascendant_rashi(&self) -> u8 {
        self.ascendant.rashi_index
    }

    /// Rashi indices of all nine grahas.
    pub fn rashis(&self) -> [u8; 9] {
        self.grahas.map(|p| p.rashi_index)
    }

    /// Rashi indices of Sun..Saturn.
    pub fn sapta_rashis(&self) -> [u8; 7] {
        SAPTA_GRAHAS.map(|g| self.graha(g).rashi_index)
    }

    /// Whole-sign house (1-12) of each graha from the ascendant.
    pub fn houses(&self) -> [u8; 9] {
        ALL_GRAHAS.map(|g| house_from_rashi(self.graha(g).rashi_index, self.ascendant_rashi()))
    }

    /// Every position, grahas first, then the ascendant.
    pub fn iter(&self) -> impl Iterator<Item = &BodyPosition> {
        self.grahas.iter().chain(std::iter::once(&self.ascendant))
    }

    /// Lookup by body key, Sanskrit or English name, or `ASCENDANT`.
    pub fn get(&self, name: &str) -> Option<&BodyPosition> {
        if name.eq_ignore_ascii_case(ASCENDANT_KEY) {
            return Some(&self.ascendant);
        }
        Graha::from_name(name).ok().map(|g| self.graha(g))
    }
}

/// Birth chart with the Moon's nakshatra and the dasha picture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullChart {
    pub birth: BirthData,
    pub positions: ChartPositions,
    pub houses: [u8; 9],
    pub moon_nakshatra: NakshatraInfo,
    pub dasha_balance: DashaBalance,
    /// Active periods at the requested instant, if it lies on the timeline.
    pub current_dasha: Option<CurrentDasha>,
    pub mahadasha_timeline: Vec<DashaPeriod>,
    pub navamsha: DivisionalChart,
    pub yogas: GroupedYogas,
}

/// Every graha and the ascendant in one divisional chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DivisionalChart {
    pub ascendant: DivisionalPosition,
    /// Indexed by `Graha::index()`.
    pub grahas: [DivisionalPosition; 9],
    /// Grahas whose D1 and divisional rashis coincide.
    pub vargottama: [bool; 9],
}

/// Natal and transit positions side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitChart {
    pub transit_datetime: DateTime<FixedOffset>,
    pub natal: ChartPositions,
    pub transit: ChartPositions,
    /// Whole-sign house of each transiting graha counted from the natal ascendant.
    pub transit_houses: [u8; 9],
    /// Ashtakavarga reading of each transiting sapta graha.
    pub analysis: Vec<TransitAnalysis>,
}
