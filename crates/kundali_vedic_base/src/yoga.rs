//! Yoga (planetary combination) detection.
//!
//! Every detector is an independent predicate over whole-sign house
//! placements: `house = ((rashi - lagna_rashi) mod 12) + 1`. No detector
//! reads another's output.

use serde::Serialize;

use crate::error::VedicError;
use crate::graha::{ALL_GRAHAS, Graha, rashi_lord};
use crate::graha_relationships::{exaltation_rashi, own_signs};
use crate::rashi::ALL_RASHIS;
use crate::util::{house_distance, house_from_rashi};

const KENDRAS: [u8; 4] = [1, 4, 7, 10];
const TRIKONAS: [u8; 3] = [1, 5, 9];
const DUSTHANAS: [u8; 3] = [6, 8, 12];

/// Category tag used for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YogaCategory {
    Rajayoga,
    Mahapurusha,
    Dhana,
    Daridra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YogaStrength {
    Strong,
    Medium,
    Weak,
}

/// Outcome of one detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YogaFinding {
    pub name: String,
    pub sanskrit_name: String,
    pub category: YogaCategory,
    pub grahas: Vec<Graha>,
    pub houses: Vec<u8>,
    pub strength: YogaStrength,
    pub effects: &'static str,
    pub is_present: bool,
}

/// Whole-sign placements of the nine grahas relative to the lagna.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YogaChart {
    rashis: [u8; 9],
    lagna_rashi: u8,
}

impl YogaChart {
    /// `graha_rashis` is indexed by `Graha::index()` (Sun..Ketu).
    pub fn new(graha_rashis: [u8; 9], lagna_rashi: u8) -> Result<Self, VedicError> {
        if let Some(&bad) = graha_rashis.iter().chain([&lagna_rashi]).find(|&&r| r > 11) {
            return Err(VedicError::SignOutOfRange(bad));
        }
        Ok(Self {
            rashis: graha_rashis,
            lagna_rashi,
        })
    }

    pub fn rashi(&self, graha: Graha) -> u8 {
        self.rashis[graha.index() as usize]
    }

    pub fn house(&self, graha: Graha) -> u8 {
        house_from_rashi(self.rashi(graha), self.lagna_rashi)
    }

    /// Lord of a house (1-12) counted from the lagna.
    pub fn house_lord(&self, house: u8) -> Graha {
        let sign = (self.lagna_rashi as usize + (house as usize + 11) % 12) % 12;
        rashi_lord(ALL_RASHIS[sign])
    }

    fn in_kendra(&self, graha: Graha) -> bool {
        KENDRAS.contains(&self.house(graha))
    }

    fn occupants(&self, house: u8) -> impl Iterator<Item = Graha> + '_ {
        ALL_GRAHAS.into_iter().filter(move |&g| self.house(g) == house)
    }

    /// Conjunct, or `b` in a kendra counted from `a`. Returns (present, conjunct).
    fn lords_connected(&self, a: Graha, b: Graha) -> (bool, bool) {
        let (ha, hb) = (self.house(a), self.house(b));
        let conjunct = ha == hb;
        (conjunct || KENDRAS.contains(&house_distance(ha, hb)), conjunct)
    }
}

// ---------------------------------------------------------------------------
// Detectors
// ---------------------------------------------------------------------------

/// Gajakesari: Jupiter in a kendra counted from the Moon.
pub fn gajakesari(chart: &YogaChart) -> YogaFinding {
    let moon_house = chart.house(Graha::Chandra);
    let jupiter_house = chart.house(Graha::Guru);
    let is_present = KENDRAS.contains(&house_distance(moon_house, jupiter_house));

    let strength = if !is_present {
        YogaStrength::Weak
    } else if KENDRAS.contains(&jupiter_house) {
        YogaStrength::Strong
    } else if TRIKONAS.contains(&jupiter_house) {
        YogaStrength::Medium
    } else {
        YogaStrength::Weak
    };

    YogaFinding {
        name: "Gajakesari Yoga".into(),
        sanskrit_name: "गजकेसरी योग".into(),
        category: YogaCategory::Rajayoga,
        grahas: vec![Graha::Chandra, Graha::Guru],
        houses: vec![moon_house, jupiter_house],
        strength,
        effects: "Fame, wealth, intelligence, leadership, long-lasting reputation",
        is_present,
    }
}

const MAHAPURUSHA: [(Graha, &str, &str, &str); 5] = [
    (
        Graha::Mangal,
        "Ruchaka",
        "रुचक",
        "Valor, courage, leadership, military success, strong physique",
    ),
    (
        Graha::Buddh,
        "Bhadra",
        "भद्र",
        "Intelligence, eloquence, learning, business acumen",
    ),
    (
        Graha::Guru,
        "Hamsa",
        "हंस",
        "Wisdom, spirituality, teaching ability, righteous conduct",
    ),
    (
        Graha::Shukra,
        "Malavya",
        "मालव्य",
        "Beauty, luxury, artistic talents, marital happiness",
    ),
    (
        Graha::Shani,
        "Shasha",
        "शश",
        "Leadership over masses, authority, longevity, discipline",
    ),
];

/// Pancha Mahapurusha: Mars, Mercury, Jupiter, Venus or Saturn in own or
/// exaltation sign and in a kendra. One finding per graha.
pub fn pancha_mahapurusha(chart: &YogaChart) -> Vec<YogaFinding> {
    MAHAPURUSHA
        .iter()
        .map(|&(graha, name, sanskrit, effects)| {
            let rashi = chart.rashi(graha);
            let house = chart.house(graha);
            let exalted = exaltation_rashi(graha) == Some(rashi);
            let dignified = exalted || own_signs(graha).contains(&rashi);
            let is_present = dignified && chart.in_kendra(graha);
            let strength = match (is_present, exalted) {
                (true, true) => YogaStrength::Strong,
                (true, false) => YogaStrength::Medium,
                (false, _) => YogaStrength::Weak,
            };
            YogaFinding {
                name: format!("{name} Yoga"),
                sanskrit_name: format!("{sanskrit} योग"),
                category: YogaCategory::Mahapurusha,
                grahas: vec![graha],
                houses: vec![house],
                strength,
                effects,
                is_present,
            }
        })
        .collect()
}

/// Kendra-Trikona Rajayoga: a kendra lord connected with a trikona lord
/// (5th or 9th). Pairs of the same graha are skipped.
pub fn kendra_trikona_rajayoga(chart: &YogaChart) -> Vec<YogaFinding> {
    let mut found = Vec::new();
    for k in KENDRAS {
        let k_lord = chart.house_lord(k);
        for t in [5u8, 9] {
            let t_lord = chart.house_lord(t);
            if k_lord == t_lord {
                continue;
            }
            let (present, conjunct) = chart.lords_connected(k_lord, t_lord);
            if present {
                found.push(YogaFinding {
                    name: "Kendra-Trikona Rajayoga".into(),
                    sanskrit_name: "केन्द्र-त्रिकोण राजयोग".into(),
                    category: YogaCategory::Rajayoga,
                    grahas: vec![k_lord, t_lord],
                    houses: vec![chart.house(k_lord), chart.house(t_lord)],
                    strength: if conjunct {
                        YogaStrength::Strong
                    } else {
                        YogaStrength::Medium
                    },
                    effects: "Power, authority, success, rise in life, leadership",
                    is_present: true,
                });
            }
        }
    }
    found
}

fn lord_pair_yoga(
    chart: &YogaChart,
    houses: [u8; 2],
    name: &str,
    sanskrit: &str,
    effects: &'static str,
) -> YogaFinding {
    let a = chart.house_lord(houses[0]);
    let b = chart.house_lord(houses[1]);
    let (is_present, conjunct) = chart.lords_connected(a, b);
    YogaFinding {
        name: name.into(),
        sanskrit_name: sanskrit.into(),
        category: YogaCategory::Dhana,
        grahas: vec![a, b],
        houses: houses.to_vec(),
        strength: match (is_present, conjunct) {
            (true, true) => YogaStrength::Strong,
            (true, false) => YogaStrength::Medium,
            (false, _) => YogaStrength::Weak,
        },
        effects,
        is_present,
    }
}

/// Dhana yogas: lords of 2 and 11 connected; Lakshmi: lords of 5 and 9.
pub fn dhana_yogas(chart: &YogaChart) -> Vec<YogaFinding> {
    vec![
        lord_pair_yoga(
            chart,
            [2, 11],
            "Dhana Yoga (2-11)",
            "धन योग",
            "Accumulation of wealth, financial prosperity",
        ),
        lord_pair_yoga(
            chart,
            [5, 9],
            "Lakshmi Yoga",
            "लक्ष्मी योग",
            "Wealth through merit and fortune, divine grace",
        ),
    ]
}

/// Kemadruma: nothing but the Moon or the nodes in the 2nd and 12th from
/// the Moon. Cancelled when Jupiter, Venus or Mercury sits in a kendra from
/// the lagna.
pub fn kemadruma(chart: &YogaChart) -> YogaFinding {
    let moon_house = chart.house(Graha::Chandra);
    let second = moon_house % 12 + 1;
    let twelfth = (moon_house + 10) % 12 + 1;

    let flanked = [second, twelfth].into_iter().any(|h| {
        chart
            .occupants(h)
            .any(|g| !matches!(g, Graha::Chandra | Graha::Rahu | Graha::Ketu))
    });
    let cancelled = [Graha::Guru, Graha::Shukra, Graha::Buddh]
        .into_iter()
        .any(|g| chart.in_kendra(g));

    YogaFinding {
        name: "Kemadruma Yoga".into(),
        sanskrit_name: "केमद्रुम योग".into(),
        category: YogaCategory::Daridra,
        grahas: vec![Graha::Chandra],
        houses: vec![moon_house],
        strength: if cancelled {
            YogaStrength::Weak
        } else {
            YogaStrength::Medium
        },
        effects: "Financial difficulties, lack of support (cancelled if benefics in Kendra)",
        is_present: !flanked && !cancelled,
    }
}

/// Viparita Rajayoga: lord of the 6th, 8th or 12th placed in one of those
/// houses. Evaluated per lord.
pub fn viparita_rajayoga(chart: &YogaChart) -> Vec<YogaFinding> {
    DUSTHANAS
        .iter()
        .filter_map(|&h| {
            let lord = chart.house_lord(h);
            let lord_house = chart.house(lord);
            DUSTHANAS.contains(&lord_house).then(|| YogaFinding {
                name: format!("Viparita Rajayoga ({h}th lord)"),
                sanskrit_name: "विपरीत राजयोग".into(),
                category: YogaCategory::Rajayoga,
                grahas: vec![lord],
                houses: vec![h, lord_house],
                strength: YogaStrength::Medium,
                effects: "Rise through unconventional means, gains from obstacles",
                is_present: true,
            })
        })
        .collect()
}

/// Budhaditya: Sun and Mercury in the same house.
pub fn budhaditya(chart: &YogaChart) -> YogaFinding {
    let sun_house = chart.house(Graha::Surya);
    let mercury_house = chart.house(Graha::Buddh);
    let is_present = sun_house == mercury_house;
    YogaFinding {
        name: "Budhaditya Yoga".into(),
        sanskrit_name: "बुधादित्य योग".into(),
        category: YogaCategory::Rajayoga,
        grahas: vec![Graha::Surya, Graha::Buddh],
        houses: vec![sun_house, mercury_house],
        strength: if is_present {
            YogaStrength::Medium
        } else {
            YogaStrength::Weak
        },
        effects: "Intelligence, fame through learning, communication skills",
        is_present,
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Run every detector and keep the present findings.
pub fn detect_yogas(chart: &YogaChart) -> Vec<YogaFinding> {
    let mut all = vec![gajakesari(chart)];
    all.extend(pancha_mahapurusha(chart));
    all.extend(kendra_trikona_rajayoga(chart));
    all.extend(dhana_yogas(chart));
    all.push(kemadruma(chart));
    all.extend(viparita_rajayoga(chart));
    all.push(budhaditya(chart));
    all.retain(|y| y.is_present);
    all
}

/// Findings bucketed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedYogas {
    /// Rajayoga and Mahapurusha.
    pub rajayogas: Vec<YogaFinding>,
    pub dhana_yogas: Vec<YogaFinding>,
    pub other_yogas: Vec<YogaFinding>,
}

pub fn group_yogas(findings: Vec<YogaFinding>) -> GroupedYogas {
    let mut grouped = GroupedYogas::default();
    for y in findings {
        match y.category {
            YogaCategory::Rajayoga | YogaCategory::Mahapurusha => grouped.rajayogas.push(y),
            YogaCategory::Dhana => grouped.dhana_yogas.push(y),
            YogaCategory::Daridra => grouped.other_yogas.push(y),
        }
    }
    grouped
}
