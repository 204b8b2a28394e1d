//! Ephemeris provider seam.
//!
//! Raw astronomy is outside this workspace: an [`EphemerisProvider`]
//! supplies sidereal positions, the ascendant and the ayanamsa for an
//! instant. [`FixedEphemeris`] is an in-memory provider built from JSON
//! snapshots.

use std::collections::BTreeMap;
use std::str::FromStr;

use kundali_vedic_base::Graha;
use serde::{Deserialize, Serialize};

use crate::error::EphemerisError;

/// Named sidereal reference model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AyanamshaModel {
    #[default]
    Lahiri,
    Krishnamurti,
    Raman,
}

impl AyanamshaModel {
    pub const ALL: [Self; 3] = [Self::Lahiri, Self::Krishnamurti, Self::Raman];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lahiri => "lahiri",
            Self::Krishnamurti => "krishnamurti",
            Self::Raman => "raman",
        }
    }

    /// Case-insensitive; `kp` is accepted for Krishnamurti.
    pub fn from_name(name: &str) -> Result<Self, EphemerisError> {
        let needle = name.trim();
        if needle.eq_ignore_ascii_case("kp") {
            return Ok(Self::Krishnamurti);
        }
        Self::ALL
            .into_iter()
            .find(|m| needle.eq_ignore_ascii_case(m.name()))
            .ok_or_else(|| EphemerisError::UnknownModel(name.to_string()))
    }
}

impl FromStr for AyanamshaModel {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Sidereal position of one body as reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    /// Sidereal ecliptic longitude, degrees.
    pub longitude: f64,
    /// Ecliptic latitude, degrees.
    pub latitude: f64,
    /// Distance, AU.
    pub distance: f64,
    /// Longitude speed, degrees/day; negative is retrograde.
    pub speed: f64,
}

impl RawPosition {
    /// Ketu is derived from Rahu: opposite longitude, same speed, mirrored latitude.
    pub fn opposite_node(&self) -> Self {
        Self {
            longitude: kundali_vedic_base::normalize_360(self.longitude + 180.0),
            latitude: -self.latitude,
            distance: self.distance,
            speed: self.speed,
        }
    }

    pub(crate) fn check(&self, body: &str) -> Result<(), EphemerisError> {
        let finite = [self.longitude, self.latitude, self.distance, self.speed]
            .iter()
            .all(|v| v.is_finite());
        if finite {
            Ok(())
        } else {
            Err(EphemerisError::InvalidValue {
                body: body.to_string(),
                reason: "non-finite component",
            })
        }
    }
}

/// Source of sidereal positions.
///
/// `jd_ut` is a Julian Day in UTC. Rahu is requested as a body; Ketu is
/// never requested and is derived by the caller.
pub trait EphemerisProvider {
    fn body_position(
        &self,
        graha: Graha,
        jd_ut: f64,
        model: AyanamshaModel,
    ) -> Result<RawPosition, EphemerisError>;

    /// Sidereal ascendant longitude; the house convention is the provider's concern.
    fn ascendant(
        &self,
        jd_ut: f64,
        latitude: f64,
        longitude: f64,
        model: AyanamshaModel,
    ) -> Result<f64, EphemerisError>;

    fn ayanamsa(&self, jd_ut: f64, model: AyanamshaModel) -> Result<f64, EphemerisError>;
}

// ---------------------------------------------------------------------------
// Fixed snapshot provider
// ---------------------------------------------------------------------------

/// Positions of every body at one instant.
///
/// `bodies` is keyed by any name `Graha::from_name` accepts (`"SUN"`,
/// `"Moon"`, `"Guru"`, ...). Ketu may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSnapshot {
    pub jd_ut: f64,
    #[serde(default)]
    pub model: AyanamshaModel,
    pub ayanamsa: f64,
    /// Sidereal ascendant for the place the snapshot was taken at.
    pub ascendant: f64,
    pub bodies: BTreeMap<String, RawPosition>,
}

impl EphemerisSnapshot {
    fn position(&self, graha: Graha) -> Option<&RawPosition> {
        self.bodies
            .iter()
            .find(|(name, _)| Graha::from_name(name) == Ok(graha))
            .map(|(_, pos)| pos)
    }

    fn validate(&self) -> Result<(), EphemerisError> {
        for (name, pos) in &self.bodies {
            Graha::from_name(name).map_err(|_| EphemerisError::UnknownBody(name.clone()))?;
            pos.check(name)?;
        }
        if !self.jd_ut.is_finite() || !self.ayanamsa.is_finite() || !self.ascendant.is_finite() {
            return Err(EphemerisError::InvalidValue {
                body: "snapshot".into(),
                reason: "non-finite epoch, ayanamsa or ascendant",
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    One(EphemerisSnapshot),
    Many(Vec<EphemerisSnapshot>),
}

/// In-memory provider answering from the snapshot nearest in time.
///
/// The ascendant is the snapshot's stored value regardless of the
/// requested place. With a tolerance set, queries further than that from
/// every snapshot fail with [`EphemerisError::NoData`].
#[derive(Debug, Clone, PartialEq)]
pub struct FixedEphemeris {
    snapshots: Vec<EphemerisSnapshot>,
    tolerance_days: Option<f64>,
}

impl FixedEphemeris {
    pub fn new(mut snapshots: Vec<EphemerisSnapshot>) -> Result<Self, EphemerisError> {
        if snapshots.is_empty() {
            return Err(EphemerisError::Snapshot("no snapshots".into()));
        }
        for s in &snapshots {
            s.validate()?;
        }
        snapshots.sort_by(|a, b| a.jd_ut.total_cmp(&b.jd_ut));
        Ok(Self {
            snapshots,
            tolerance_days: None,
        })
    }

    /// Parse a single snapshot object or an array of them.
    pub fn from_json(json: &str) -> Result<Self, EphemerisError> {
        let file: SnapshotFile =
            serde_json::from_str(json).map_err(|e| EphemerisError::Snapshot(e.to_string()))?;
        match file {
            SnapshotFile::One(s) => Self::new(vec![s]),
            SnapshotFile::Many(v) => Self::new(v),
        }
    }

    pub fn with_tolerance(mut self, days: f64) -> Self {
        self.tolerance_days = Some(days);
        self
    }

    pub fn snapshots(&self) -> &[EphemerisSnapshot] {
        &self.snapshots
    }

    fn snapshot_at(
        &self,
        jd_ut: f64,
        model: AyanamshaModel,
    ) -> Result<&EphemerisSnapshot, EphemerisError> {
        let no_data = || EphemerisError::NoData {
            jd: jd_ut,
            model: model.name(),
        };
        let nearest = self
            .snapshots
            .iter()
            .filter(|s| s.model == model)
            .min_by(|a, b| (a.jd_ut - jd_ut).abs().total_cmp(&(b.jd_ut - jd_ut).abs()))
            .ok_or_else(no_data)?;
        match self.tolerance_days {
            Some(tol) if (nearest.jd_ut - jd_ut).abs() > tol => Err(no_data()),
            _ => Ok(nearest),
        }
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn body_position(
        &self,
        graha: Graha,
        jd_ut: f64,
        model: AyanamshaModel,
    ) -> Result<RawPosition, EphemerisError> {
        let snap = self.snapshot_at(jd_ut, model)?;
        match (graha, snap.position(graha)) {
            (_, Some(pos)) => Ok(*pos),
            (Graha::Ketu, None) => snap
                .position(Graha::Rahu)
                .map(RawPosition::opposite_node)
                .ok_or_else(|| EphemerisError::UnknownBody(graha.body_key().into())),
            (_, None) => Err(EphemerisError::UnknownBody(graha.body_key().into())),
        }
    }

    fn ascendant(
        &self,
        jd_ut: f64,
        _latitude: f64,
        _longitude: f64,
        model: AyanamshaModel,
    ) -> Result<f64, EphemerisError> {
        Ok(self.snapshot_at(jd_ut, model)?.ascendant)
    }

    fn ayanamsa(&self, jd_ut: f64, model: AyanamshaModel) -> Result<f64, EphemerisError> {
        Ok(self.snapshot_at(jd_ut, model)?.ayanamsa)
    }
}
