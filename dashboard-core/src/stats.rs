//! Scalar projections shown on the stat cards.
//!
//! Each value is formatted with [`fixed_one_decimal`]; units are attached by
//! the presentation layer.

use crate::{
    error::{DashboardError, first},
    format::fixed_one_decimal,
    model::NormalizedReport,
};

const HIGH_UV_DISPLAY: f64 = 6.0;

pub fn max_temperature(report: &NormalizedReport) -> Result<String, DashboardError> {
    first(&report.report.daily.temperature_2m_max, "daily.temperature_2m_max")
        .map(fixed_one_decimal)
}

pub fn min_temperature(report: &NormalizedReport) -> Result<String, DashboardError> {
    first(&report.report.daily.temperature_2m_min, "daily.temperature_2m_min")
        .map(fixed_one_decimal)
}

pub fn uv_index(report: &NormalizedReport) -> Result<String, DashboardError> {
    first(&report.report.daily.uv_index_max, "daily.uv_index_max").map(fixed_one_decimal)
}

/// True when the displayed UV index is strictly above 6.
///
/// Compares the one-decimal display value, so `6.04` (shown as `6.0`) is not high.
pub fn high_uv_flag(report: &NormalizedReport) -> Result<bool, DashboardError> {
    let shown = uv_index(report)?;
    Ok(shown.parse::<f64>().is_ok_and(|uv| uv > HIGH_UV_DISPLAY))
}

pub fn wind_speed(report: &NormalizedReport) -> String {
    fixed_one_decimal(report.report.current_weather.windspeed)
}

pub fn wind_direction(report: &NormalizedReport) -> String {
    fixed_one_decimal(report.report.current_weather.winddirection)
}
