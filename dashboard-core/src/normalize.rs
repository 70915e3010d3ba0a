use crate::model::{NormalizedReport, WeatherReport};

/// Attach the display city to a fetched report. Weather fields pass through unchanged.
pub fn normalize(report: WeatherReport, city: &str) -> NormalizedReport {
    NormalizedReport { city: city.to_string(), report }
}
