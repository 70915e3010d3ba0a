use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::model::{WeatherQuery, WeatherReport};

use super::{ProviderId, WeatherProvider, truncate_body};

pub const DEFAULT_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

const HOURLY: &str = "temperature_2m,precipitation_probability,relativehumidity_2m,uv_index";
const DAILY: &str = "temperature_2m_max,temperature_2m_min,uv_index_max,sunrise,sunset";

/// Direct REST client for the Open-Meteo forecast API. No key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoint: String,
    http: Client,
}

#[derive(Debug, Serialize)]
struct ForecastParams<'a> {
    latitude: &'a str,
    longitude: &'a str,
    timezone: &'a str,
    current_weather: &'a str,
    hourly: &'a str,
    daily: &'a str,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenMeteo
    }

    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport> {
        tracing::debug!(
            endpoint = %self.endpoint,
            latitude = %query.latitude,
            longitude = %query.longitude,
            timezone = %query.timezone,
            "requesting Open-Meteo forecast"
        );

        let res = self
            .http
            .get(&self.endpoint)
            .query(&ForecastParams {
                latitude: &query.latitude,
                longitude: &query.longitude,
                timezone: &query.timezone,
                current_weather: &query.current_weather,
                hourly: HOURLY,
                daily: DAILY,
            })
            .send()
            .await
            .context("Failed to send request to Open-Meteo")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let report: WeatherReport =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        Ok(report)
    }
}
