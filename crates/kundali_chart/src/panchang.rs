//! Panchanga and daytime muhurta for a chart moment.
//!
//! Sunrise and sunset are inputs; this layer does not compute them.

use chrono::{DateTime, Datelike, FixedOffset};
use kundali_vedic_base::{
    AbhijitMuhurta, ChoghadiyaPeriod, DaySpan, Graha, PanchangaResult, Vara, abhijit_muhurta,
    choghadiya, panchanga,
};
use tracing::instrument;

use crate::ephemeris::EphemerisProvider;
use crate::error::ChartError;
use crate::jyotish::positions;
use crate::jyotish_types::BirthData;
use crate::time::datetime_to_jd;

/// Weekday of the local civil date.
pub fn vara_of(datetime: &DateTime<FixedOffset>) -> Vara {
    match datetime.weekday().num_days_from_sunday() {
        0 => Vara::Sunday,
        1 => Vara::Monday,
        2 => Vara::Tuesday,
        3 => Vara::Wednesday,
        4 => Vara::Thursday,
        5 => Vara::Friday,
        _ => Vara::Saturday,
    }
}

/// Sunrise-to-sunset span from zoned instants.
pub fn day_span(
    sunrise: &DateTime<FixedOffset>,
    sunset: &DateTime<FixedOffset>,
) -> Result<DaySpan, ChartError> {
    Ok(DaySpan::new(datetime_to_jd(sunrise), datetime_to_jd(sunset))?)
}

/// Panchanga at the chart moment.
///
/// Kaal windows are filled when both sunrise and sunset are given; only
/// one of them is [`ChartError::PartialDayWindow`].
#[instrument(skip(provider))]
pub fn panchanga_for_chart<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthData,
    sunrise: Option<DateTime<FixedOffset>>,
    sunset: Option<DateTime<FixedOffset>>,
) -> Result<PanchangaResult, ChartError> {
    let pos = positions(provider, birth)?;
    let day = match (sunrise, sunset) {
        (Some(rise), Some(set)) => Some(day_span(&rise, &set)?),
        (None, None) => None,
        _ => return Err(ChartError::PartialDayWindow),
    };
    Ok(panchanga(
        pos.longitude(Graha::Surya),
        pos.longitude(Graha::Chandra),
        vara_of(&birth.datetime),
        day.as_ref(),
    )?)
}

/// Choghadiya periods for the day of `sunrise`.
pub fn choghadiya_for_day(
    sunrise: &DateTime<FixedOffset>,
    sunset: &DateTime<FixedOffset>,
) -> Result<Vec<ChoghadiyaPeriod>, ChartError> {
    let day = day_span(sunrise, sunset)?;
    Ok(choghadiya(vara_of(sunrise), &day))
}

pub fn abhijit_for_day(
    sunrise: &DateTime<FixedOffset>,
    sunset: &DateTime<FixedOffset>,
) -> Result<AbhijitMuhurta, ChartError> {
    Ok(abhijit_muhurta(&day_span(sunrise, sunset)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_datetime;

    #[test]
    fn weekday_from_local_date() {
        // 2024-01-04 was a Thursday; 23:30 at +05:30 is still Thursday locally
        let dt = parse_datetime("2024-01-04T23:30:00+05:30").unwrap();
        assert_eq!(vara_of(&dt), Vara::Thursday);
        let dt = parse_datetime("2024-01-07T08:00:00Z").unwrap();
        assert_eq!(vara_of(&dt), Vara::Sunday);
    }

    #[test]
    fn choghadiya_thursday() {
        let rise = parse_datetime("2024-01-04T07:00:00+05:30").unwrap();
        let set = parse_datetime("2024-01-04T17:48:00+05:30").unwrap();
        let periods = choghadiya_for_day(&rise, &set).unwrap();
        assert_eq!(periods.len(), 8);
        // Thursday opens with Shubh
        assert_eq!(periods[0].name, "Shubh");
    }

    #[test]
    fn sunset_before_sunrise_rejected() {
        let rise = parse_datetime("2024-01-04T18:00:00Z").unwrap();
        let set = parse_datetime("2024-01-04T06:00:00Z").unwrap();
        assert!(abhijit_for_day(&rise, &set).is_err());
    }
}
