//! Chart orchestration: queries the provider for positions and feeds the
//! pure calculations in `kundali_vedic_base`.

use chrono::{DateTime, FixedOffset};
use kundali_vedic_base::{
    ALL_GRAHAS, AllShadbala, Amsha, AshtakavargaResult, Graha, SAPTA_GRAHAS, ShadbalaInputs,
    TransitAnalysis, VedicError, YogaChart, YogaFinding, all_shadbala, amsha_position,
    analyze_transit, aspecting_grahas, calculate_ashtakavarga, current_periods, dasha_balance,
    detect_yogas, group_yogas, house_from_rashi, major_periods, nakshatra_from_longitude,
};
use tracing::{debug, instrument};

use crate::ephemeris::{AyanamshaModel, EphemerisProvider, RawPosition};
use crate::error::{ChartError, EphemerisError};
use crate::jyotish_types::{
    BirthData, BodyPosition, ChartOptions, ChartPositions, DivisionalChart, FullChart,
    TransitChart,
};
use crate::time::datetime_to_jd;

/// Positions of all nine grahas and the ascendant at a JD.
///
/// Ketu is always derived from Rahu; the provider is never asked for it.
pub fn positions_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd_ut: f64,
    latitude: f64,
    longitude: f64,
    model: AyanamshaModel,
) -> Result<ChartPositions, ChartError> {
    let ayanamsa = provider.ayanamsa(jd_ut, model)?;

    let mut raw = [RawPosition {
        longitude: 0.0,
        latitude: 0.0,
        distance: 0.0,
        speed: 0.0,
    }; 9];
    for graha in ALL_GRAHAS {
        let pos = match graha {
            Graha::Ketu => raw[Graha::Rahu.index() as usize].opposite_node(),
            _ => provider.body_position(graha, jd_ut, model)?,
        };
        pos.check(graha.body_key())?;
        raw[graha.index() as usize] = pos;
    }

    let asc = provider.ascendant(jd_ut, latitude, longitude, model)?;
    if !asc.is_finite() {
        return Err(EphemerisError::InvalidValue {
            body: "ASCENDANT".into(),
            reason: "non-finite longitude",
        }
        .into());
    }
    debug!(jd_ut, ayanamsa, ascendant = asc, "positions resolved");

    Ok(ChartPositions {
        jd_ut,
        ayanamsa,
        grahas: std::array::from_fn(|i| BodyPosition::from_raw(ALL_GRAHAS[i].body_key(), &raw[i])),
        ascendant: BodyPosition::ascendant(asc),
    })
}

/// Positions for a birth moment and place.
#[instrument(skip(provider), fields(model = birth.ayanamsa.name()))]
pub fn positions<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
) -> Result<ChartPositions, ChartError> {
    positions_at(
        provider,
        birth.jd_ut(),
        birth.latitude,
        birth.longitude,
        birth.ayanamsa,
    )
}

/// Remap all positions through one amsha.
pub fn divisional_chart_from_positions(positions: &ChartPositions, amsha: Amsha) -> DivisionalChart {
    let grahas = ALL_GRAHAS.map(|g| amsha_position(positions.longitude(g), amsha));
    let natal = positions.rashis();
    DivisionalChart {
        ascendant: amsha_position(positions.ascendant.longitude, amsha),
        vargottama: std::array::from_fn(|i| grahas[i].rashi_index == natal[i]),
        grahas,
    }
}

#[instrument(skip(provider))]
pub fn divisional_chart_for<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
    amsha: Amsha,
) -> Result<DivisionalChart, ChartError> {
    let pos = positions(provider, birth)?;
    Ok(divisional_chart_from_positions(&pos, amsha))
}

fn yoga_chart(positions: &ChartPositions) -> Result<YogaChart, VedicError> {
    YogaChart::new(positions.rashis(), positions.ascendant_rashi())
}

/// Present yogas of the birth chart.
#[instrument(skip(provider))]
pub fn yogas_for_chart<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
) -> Result<Vec<YogaFinding>, ChartError> {
    let pos = positions(provider, birth)?;
    Ok(detect_yogas(&yoga_chart(&pos)?))
}

/// Shadbala inputs for Sun..Saturn with whole-sign aspects.
pub fn shadbala_inputs(
    positions: &ChartPositions,
    is_day_birth: bool,
) -> Result<[ShadbalaInputs; 7], VedicError> {
    let rashis = positions.rashis();
    let asc = positions.ascendant_rashi();
    let mut inputs = Vec::with_capacity(7);
    for graha in SAPTA_GRAHAS {
        let p = positions.graha(graha);
        let aspects = aspecting_grahas(&rashis, graha)?;
        inputs.push(ShadbalaInputs::from_longitude(
            p.longitude,
            p.speed,
            asc,
            aspects,
            is_day_birth,
        ));
    }
    inputs
        .try_into()
        .map_err(|_| VedicError::InvalidInput("expected seven shadbala inputs"))
}

#[instrument(skip(provider, options))]
pub fn shadbala_for_chart<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
    options: &ChartOptions,
) -> Result<AllShadbala, ChartError> {
    let pos = positions(provider, birth)?;
    let is_day = birth.is_day_birth(&options.day_window);
    debug!(is_day, "day/night decided from local hour");
    Ok(all_shadbala(&shadbala_inputs(&pos, is_day)?)?)
}

fn ashtakavarga_of(positions: &ChartPositions) -> Result<AshtakavargaResult, VedicError> {
    calculate_ashtakavarga(&positions.sapta_rashis(), positions.ascendant_rashi())
}

#[instrument(skip(provider))]
pub fn ashtakavarga_for_chart<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
) -> Result<AshtakavargaResult, ChartError> {
    let pos = positions(provider, birth)?;
    Ok(ashtakavarga_of(&pos)?)
}

/// Ashtakavarga reading of one graha's transit at `transit_datetime`.
#[instrument(skip(provider))]
pub fn transit_for_chart<P: EphemerisProvider + ?Sized>(
    provider: &P,
    natal: &BirthData,
    transit_datetime: DateTime<FixedOffset>,
    graha: Graha,
) -> Result<TransitAnalysis, ChartError> {
    let natal_pos = positions(provider, natal)?;
    let transit_pos = positions(provider, &natal.at(transit_datetime))?;
    let av = ashtakavarga_of(&natal_pos)?;
    Ok(analyze_transit(&av, graha, transit_pos.graha(graha).rashi_index)?)
}

/// Natal and transit positions with a reading for every sapta graha.
#[instrument(skip(provider))]
pub fn transits<P: EphemerisProvider + ?Sized>(
    provider: &P,
    natal: &BirthData,
    transit_datetime: DateTime<FixedOffset>,
) -> Result<TransitChart, ChartError> {
    let natal_pos = positions(provider, natal)?;
    let transit_pos = positions(provider, &natal.at(transit_datetime))?;
    let av = ashtakavarga_of(&natal_pos)?;

    let analysis = SAPTA_GRAHAS
        .iter()
        .map(|&g| analyze_transit(&av, g, transit_pos.graha(g).rashi_index))
        .collect::<Result<Vec<_>, _>>()?;
    let asc = natal_pos.ascendant_rashi();

    Ok(TransitChart {
        transit_datetime,
        transit_houses: transit_pos.rashis().map(|r| house_from_rashi(r, asc)),
        natal: natal_pos,
        transit: transit_pos,
        analysis,
    })
}

/// Birth chart with Moon nakshatra, dasha balance and timeline, D9 and yogas.
///
/// `at` selects the instant for the running dasha; an instant outside the
/// generated timeline leaves `current_dasha` empty.
#[instrument(skip(provider, options))]
pub fn full_chart<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
    at: Option<DateTime<FixedOffset>>,
    options: &ChartOptions,
) -> Result<FullChart, ChartError> {
    let pos = positions(provider, birth)?;
    let birth_jd = pos.jd_ut;
    let moon = pos.longitude(Graha::Chandra);
    let horizon = options.dasha_horizon_years;
    let mahadasha_timeline = major_periods(moon, birth_jd, horizon)?;

    let current_dasha = match at {
        Some(dt) => match current_periods(moon, birth_jd, datetime_to_jd(&dt), horizon) {
            Ok(cur) => Some(cur),
            Err(e) if e.is_out_of_domain() => {
                debug!(%dt, "instant outside dasha timeline");
                None
            }
            Err(e) => return Err(e.into()),
        },
        None => None,
    };

    Ok(FullChart {
        birth: *birth,
        houses: pos.houses(),
        moon_nakshatra: nakshatra_from_longitude(moon),
        dasha_balance: dasha_balance(moon, birth_jd),
        current_dasha,
        mahadasha_timeline,
        navamsha: divisional_chart_from_positions(&pos, Amsha::D9),
        yogas: group_yogas(detect_yogas(&yoga_chart(&pos)?)),
        positions: pos,
    })
}
