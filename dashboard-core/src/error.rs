/// Failures of the dashboard pipeline.
///
/// Nothing here is recovered locally; every variant aborts the render.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The weather source could not be reached or returned something unusable.
    #[error("Failed to fetch weather data")]
    Fetch(#[source] anyhow::Error),

    /// A series that is read at index 0 was empty or absent.
    #[error("Weather data is missing required field '{field}'")]
    ShapeMismatch { field: &'static str },
}

/// Read the first element of a series, failing with [`DashboardError::ShapeMismatch`].
pub(crate) fn first(series: &[f64], field: &'static str) -> Result<f64, DashboardError> {
    series.first().copied().ok_or(DashboardError::ShapeMismatch { field })
}
