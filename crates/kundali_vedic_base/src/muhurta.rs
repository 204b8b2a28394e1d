//! Daytime segmentation: Rahu Kaal, Gulika Kaal, Choghadiya and Abhijit
//! muhurta.
//!
//! All instants are JD UTC. The day runs from sunrise to sunset and is
//! split into 8 equal parts for the kaal windows and the Choghadiya.

use serde::Serialize;

use crate::error::VedicError;
use crate::graha::Graha;
use crate::panchanga::Vara;

/// Sunrise-to-sunset span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySpan {
    pub sunrise_jd: f64,
    pub sunset_jd: f64,
}

impl DaySpan {
    /// Rejects non-finite instants and sunset not after sunrise.
    pub fn new(sunrise_jd: f64, sunset_jd: f64) -> Result<Self, VedicError> {
        if !sunrise_jd.is_finite() || !sunset_jd.is_finite() {
            return Err(VedicError::InvalidInput("sunrise and sunset must be finite"));
        }
        if sunset_jd <= sunrise_jd {
            return Err(VedicError::InvalidInput("sunset must follow sunrise"));
        }
        Ok(Self {
            sunrise_jd,
            sunset_jd,
        })
    }

    pub fn duration_days(&self) -> f64 {
        self.sunset_jd - self.sunrise_jd
    }

    /// The `segment`-th (1-based) of `count` equal parts of the day.
    pub fn segment(&self, segment: u8, count: u8) -> TimeWindow {
        let len = self.duration_days() / count as f64;
        let start_jd = self.sunrise_jd + len * (segment.saturating_sub(1)) as f64;
        TimeWindow {
            start_jd,
            end_jd: start_jd + len,
        }
    }
}

/// A [start, end] window in JD UTC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWindow {
    pub start_jd: f64,
    pub end_jd: f64,
}

impl TimeWindow {
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }
}

// ---------------------------------------------------------------------------
// Rahu Kaal / Gulika Kaal
// ---------------------------------------------------------------------------

/// 1-based day segment of Rahu Kaal, Sunday..Saturday.
pub const RAHU_KAAL_SEGMENTS: [u8; 7] = [8, 2, 7, 5, 6, 4, 3];

/// 1-based day segment of Gulika Kaal, Sunday..Saturday.
pub const GULIKA_KAAL_SEGMENTS: [u8; 7] = [7, 6, 5, 4, 3, 2, 1];

pub fn rahu_kaal(vara: Vara, day: &DaySpan) -> TimeWindow {
    day.segment(RAHU_KAAL_SEGMENTS[vara.index() as usize], 8)
}

pub fn gulika_kaal(vara: Vara, day: &DaySpan) -> TimeWindow {
    day.segment(GULIKA_KAAL_SEGMENTS[vara.index() as usize], 8)
}

// ---------------------------------------------------------------------------
// Choghadiya
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Choghadiya {
    Udveg,
    Char,
    Labh,
    Amrit,
    Kaal,
    Shubh,
    Rog,
}

/// The 7-entry cycle.
pub const CHOGHADIYA_CYCLE: [Choghadiya; 7] = [
    Choghadiya::Udveg,
    Choghadiya::Char,
    Choghadiya::Labh,
    Choghadiya::Amrit,
    Choghadiya::Kaal,
    Choghadiya::Shubh,
    Choghadiya::Rog,
];

/// Index into the cycle of the first day period, Sunday..Saturday.
const DAY_START_CHOGHADIYA: [usize; 7] = [0, 3, 6, 2, 5, 1, 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoghadiyaNature {
    Best,
    Good,
    Inauspicious,
}

impl Choghadiya {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Udveg => "Udveg",
            Self::Char => "Char",
            Self::Labh => "Labh",
            Self::Amrit => "Amrit",
            Self::Kaal => "Kaal",
            Self::Shubh => "Shubh",
            Self::Rog => "Rog",
        }
    }

    pub const fn nature(self) -> ChoghadiyaNature {
        match self {
            Self::Amrit => ChoghadiyaNature::Best,
            Self::Char | Self::Labh | Self::Shubh => ChoghadiyaNature::Good,
            Self::Udveg | Self::Kaal | Self::Rog => ChoghadiyaNature::Inauspicious,
        }
    }

    pub const fn lord(self) -> Graha {
        match self {
            Self::Udveg => Graha::Surya,
            Self::Char => Graha::Shukra,
            Self::Labh => Graha::Buddh,
            Self::Amrit => Graha::Chandra,
            Self::Kaal => Graha::Shani,
            Self::Shubh => Graha::Guru,
            Self::Rog => Graha::Mangal,
        }
    }

    pub const fn is_good(self) -> bool {
        !matches!(self.nature(), ChoghadiyaNature::Inauspicious)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChoghadiyaPeriod {
    pub choghadiya: Choghadiya,
    pub name: &'static str,
    pub nature: ChoghadiyaNature,
    pub lord: Graha,
    pub window: TimeWindow,
    pub is_good: bool,
}

/// The 8 daytime Choghadiya periods.
pub fn choghadiya(vara: Vara, day: &DaySpan) -> Vec<ChoghadiyaPeriod> {
    let start = DAY_START_CHOGHADIYA[vara.index() as usize];
    (0..8u8)
        .map(|i| {
            let c = CHOGHADIYA_CYCLE[(start + i as usize) % 7];
            ChoghadiyaPeriod {
                choghadiya: c,
                name: c.name(),
                nature: c.nature(),
                lord: c.lord(),
                window: day.segment(i + 1, 8),
                is_good: c.is_good(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Abhijit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbhijitMuhurta {
    pub name: &'static str,
    pub window: TimeWindow,
    pub duration_minutes: f64,
    pub is_auspicious: bool,
    pub effects: &'static str,
}

/// Abhijit muhurta: one muhurta (day / 30) centred on local noon.
pub fn abhijit_muhurta(day: &DaySpan) -> AbhijitMuhurta {
    let muhurta = day.duration_days() / 30.0;
    let noon = day.sunrise_jd + day.duration_days() / 2.0;
    AbhijitMuhurta {
        name: "Abhijit Muhurta",
        window: TimeWindow {
            start_jd: noon - muhurta / 2.0,
            end_jd: noon + muhurta / 2.0,
        },
        duration_minutes: muhurta * 1440.0,
        is_auspicious: true,
        effects: "Destroys all doshas, highly auspicious for important activities",
    }
}
