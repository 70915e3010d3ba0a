use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::model::{WeatherQuery, WeatherReport};

use super::{ProviderId, WeatherProvider, truncate_body};

/// Forecast query against a GraphQL gateway that wraps Open-Meteo.
pub const FORECAST_QUERY: &str = r#"query myQuery(
  $current_weather: String
  $daily: String = "temperature_2m_max,temperature_2m_min,uv_index_max,sunrise,sunset"
  $hourly: String = "temperature_2m,precipitation_probability,relativehumidity_2m,uv_index"
  $latitude: String!
  $longitude: String!
  $timezone: String!
) {
  myQuery(
    current_weather: $current_weather
    daily: $daily
    hourly: $hourly
    latitude: $latitude
    longitude: $longitude
    timezone: $timezone
  ) {
    current_weather { is_day temperature time weathercode winddirection windspeed }
    daily { time temperature_2m_max temperature_2m_min uv_index_max sunrise sunset }
    hourly { time temperature_2m precipitation_probability relativehumidity_2m uv_index }
    latitude
    longitude
    timezone
    timezone_abbreviation
  }
}"#;

#[derive(Debug, Clone)]
pub struct GraphQlProvider {
    endpoint: String,
    api_key: String,
    http: Client,
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: &'a WeatherQuery,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlData {
    my_query: Option<WeatherReport>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl GraphQlProvider {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), api_key: api_key.into(), http: Client::new() }
    }
}

#[async_trait]
impl WeatherProvider for GraphQlProvider {
    fn id(&self) -> ProviderId {
        ProviderId::GraphQl
    }

    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport> {
        tracing::debug!(
            endpoint = %self.endpoint,
            latitude = %query.latitude,
            longitude = %query.longitude,
            "sending GraphQL forecast query"
        );

        let res = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("apikey {}", self.api_key))
            .json(&GraphQlRequest { query: FORECAST_QUERY, variables: query })
            .send()
            .await
            .context("Failed to send request to GraphQL weather endpoint")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read GraphQL response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "GraphQL weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GraphQlResponse =
            serde_json::from_str(&body).context("Failed to parse GraphQL weather JSON")?;

        if !parsed.errors.is_empty() {
            let messages: Vec<&str> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(anyhow!("GraphQL weather query returned errors: {}", messages.join("; ")));
        }

        parsed
            .data
            .and_then(|data| data.my_query)
            .ok_or_else(|| anyhow!("GraphQL weather response contained no data"))
    }
}
