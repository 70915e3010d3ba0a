use crate::{
    error::{DashboardError, first},
    format::{plain_number, summary_uv_index},
    model::NormalizedReport,
};

const RAIN_THRESHOLD_PCT: f64 = 50.0;
const HOT_THRESHOLD_C: f64 = 30.0;
const MILD_THRESHOLD_C: f64 = 20.0;
const HIGH_UV: i64 = 6;

const RAIN: &str =
    " It's likely to rain later today, so be sure to carry an umbrella or raincoat.";
const HOT: &str = " It's very hot outside, so be sure to stay hydrated and avoid prolonged exposure to the sun.";
const MILD: &str = " It's a nice day out, but be sure to wear sunscreen and stay hydrated if you're spending time outside.";
const CHILLY: &str = " It's a bit chilly outside, so be sure to wear warm clothes if you're going to be outside for an extended period of time.";
const HIGH_UV_ADVICE: &str = " The UV index is very high today, so be sure to wear sunscreen and avoid prolonged exposure to the sun.";

/// Build the narrative paragraph for the dashboard callout.
///
/// Clauses are appended in a fixed order: conditions, rain advisory, UV value,
/// temperature band, high UV advisory.
pub fn generate_summary(report: &NormalizedReport) -> Result<String, DashboardError> {
    let current = &report.report.current_weather;
    let precipitation = first(
        &report.report.hourly.precipitation_probability,
        "hourly.precipitation_probability",
    )?;
    let uv = summary_uv_index(first(&report.report.daily.uv_index_max, "daily.uv_index_max")?);

    let mut summary = format!(
        "The current temperature outside is {}°C and a wind speed of {} km/h coming from the {}° direction.",
        plain_number(current.temperature),
        plain_number(current.windspeed),
        plain_number(current.winddirection),
    );

    if precipitation > RAIN_THRESHOLD_PCT {
        summary.push_str(RAIN);
    }

    match uv {
        Some(uv) => summary.push_str(&format!(" The UV index is currently {uv}.")),
        None => summary.push_str(" The UV index is currently unknown."),
    }

    summary.push_str(temperature_band(current.temperature));

    if uv.is_some_and(|uv| uv >= HIGH_UV) {
        summary.push_str(HIGH_UV_ADVICE);
    }

    Ok(summary)
}

fn temperature_band(temperature: f64) -> &'static str {
    if temperature > HOT_THRESHOLD_C {
        HOT
    } else if temperature > MILD_THRESHOLD_C {
        MILD
    } else {
        CHILLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentWeather, Daily, Hourly, WeatherReport};
    use chrono::NaiveDate;

    fn report(temperature: f64, precipitation: &[f64], uv: &[f64]) -> NormalizedReport {
        let time = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(13, 0, 0))
            .unwrap();

        NormalizedReport {
            city: "Testville".into(),
            report: WeatherReport {
                latitude: None,
                longitude: None,
                timezone: "GMT".into(),
                timezone_abbreviation: None,
                current_weather: CurrentWeather {
                    temperature,
                    windspeed: 10.0,
                    winddirection: 180.0,
                    time,
                    weathercode: None,
                    is_day: None,
                },
                hourly: Hourly { precipitation_probability: precipitation.to_vec(), ..Default::default() },
                daily: Daily { uv_index_max: uv.to_vec(), ..Default::default() },
            },
        }
    }

    fn bands(summary: &str) -> usize {
        [HOT, MILD, CHILLY].iter().filter(|b| summary.contains(*b)).count()
    }

    #[test]
    fn hot_rainy_high_uv_scenario() {
        let summary = generate_summary(&report(35.0, &[60.0, 10.0], &[7.8])).unwrap();

        let expected = format!(
            "The current temperature outside is 35°C and a wind speed of 10 km/h coming from the 180° direction.{RAIN} The UV index is currently 7.{HOT}{HIGH_UV_ADVICE}"
        );
        assert_eq!(summary, expected);
    }

    #[test]
    fn cold_dry_low_uv_scenario() {
        let summary = generate_summary(&report(15.0, &[20.0], &[3.2])).unwrap();

        let expected = format!(
            "The current temperature outside is 15°C and a wind speed of 10 km/h coming from the 180° direction. The UV index is currently 3.{CHILLY}"
        );
        assert_eq!(summary, expected);
        assert!(!summary.contains(RAIN));
        assert!(!summary.contains(HIGH_UV_ADVICE));
    }

    #[test]
    fn is_deterministic() {
        let input = report(22.5, &[55.0], &[6.4]);
        assert_eq!(generate_summary(&input).unwrap(), generate_summary(&input).unwrap());
    }

    #[test]
    fn exactly_one_temperature_band() {
        for t in [-10.0, 0.0, 19.9, 20.0, 20.1, 25.0, 29.9, 30.0, 30.1, 45.0] {
            let summary = generate_summary(&report(t, &[0.0], &[1.0])).unwrap();
            assert_eq!(bands(&summary), 1, "temperature {t}");
        }
    }

    #[test]
    fn band_boundaries_are_strict() {
        let at_30 = generate_summary(&report(30.0, &[0.0], &[1.0])).unwrap();
        assert!(at_30.contains(MILD));
        assert!(!at_30.contains(HOT));

        let above_30 = generate_summary(&report(30.1, &[0.0], &[1.0])).unwrap();
        assert!(above_30.contains(HOT));

        let at_20 = generate_summary(&report(20.0, &[0.0], &[1.0])).unwrap();
        assert!(at_20.contains(CHILLY));
        assert!(!at_20.contains(MILD));
    }

    #[test]
    fn rain_clause_above_fifty_percent_only() {
        assert!(generate_summary(&report(15.0, &[51.0], &[1.0])).unwrap().contains(RAIN));
        assert!(!generate_summary(&report(15.0, &[50.0], &[1.0])).unwrap().contains(RAIN));
    }

    #[test]
    fn rain_clause_reads_first_hour_only() {
        let summary = generate_summary(&report(15.0, &[10.0, 90.0, 90.0], &[1.0])).unwrap();
        assert!(!summary.contains(RAIN));
    }

    #[test]
    fn high_uv_clause_uses_truncated_value() {
        let low = generate_summary(&report(15.0, &[0.0], &[5.9])).unwrap();
        assert!(low.contains(" The UV index is currently 5."));
        assert!(!low.contains(HIGH_UV_ADVICE));

        let six = generate_summary(&report(15.0, &[0.0], &[6.0])).unwrap();
        assert!(six.contains(" The UV index is currently 6."));
        assert!(six.contains(HIGH_UV_ADVICE));
    }

    #[test]
    fn high_uv_follows_temperature_band() {
        let summary = generate_summary(&report(25.0, &[0.0], &[9.0])).unwrap();
        let band = summary.find(MILD).unwrap();
        let advice = summary.find(HIGH_UV_ADVICE).unwrap();
        assert!(band < advice);
    }

    #[test]
    fn fractional_conditions_render_in_short_form() {
        let mut input = report(12.3, &[0.0], &[1.0]);
        input.report.current_weather.windspeed = 4.5;
        let summary = generate_summary(&input).unwrap();
        assert!(summary.starts_with(
            "The current temperature outside is 12.3°C and a wind speed of 4.5 km/h"
        ));
    }

    #[test]
    fn empty_precipitation_is_a_shape_mismatch() {
        let err = generate_summary(&report(15.0, &[], &[1.0])).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ShapeMismatch { field: "hourly.precipitation_probability" }
        ));
    }

    #[test]
    fn empty_uv_is_a_shape_mismatch() {
        let err = generate_summary(&report(15.0, &[0.0], &[])).unwrap_err();
        assert!(matches!(err, DashboardError::ShapeMismatch { field: "daily.uv_index_max" }));
    }
}
