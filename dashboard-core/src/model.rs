use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Raw location parameters as they arrive from the caller.
///
/// Latitude and longitude are kept as strings and forwarded to the weather
/// source untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub latitude: String,
    pub longitude: String,
}

impl Location {
    pub fn new(
        city: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self { city: city.into(), latitude: latitude.into(), longitude: longitude.into() }
    }
}

/// Parameters of a single forecast fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherQuery {
    pub latitude: String,
    pub longitude: String,
    pub timezone: String,
    pub current_weather: String,
}

impl WeatherQuery {
    pub fn for_location(location: &Location, timezone: impl Into<String>) -> Self {
        Self {
            latitude: location.latitude.clone(),
            longitude: location.longitude.clone(),
            timezone: timezone.into(),
            current_weather: "true".to_string(),
        }
    }
}

/// Forecast payload as returned by the weather source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_abbreviation: Option<String>,
    pub current_weather: CurrentWeather,
    #[serde(default)]
    pub hourly: Hourly,
    #[serde(default)]
    pub daily: Daily,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    #[serde(with = "local_time")]
    pub time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weathercode: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_day: Option<u8>,
}

/// Hourly series, indexed by hour offset from the start of the forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hourly {
    #[serde(default, with = "local_time::seq")]
    pub time: Vec<NaiveDateTime>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
    #[serde(default)]
    pub precipitation_probability: Vec<f64>,
    #[serde(default, alias = "relative_humidity_2m")]
    pub relativehumidity_2m: Vec<f64>,
    #[serde(default)]
    pub uv_index: Vec<f64>,
}

/// Daily series, indexed by day offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Daily {
    #[serde(default)]
    pub time: Vec<NaiveDate>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub uv_index_max: Vec<f64>,
    #[serde(default, with = "local_time::seq")]
    pub sunrise: Vec<NaiveDateTime>,
    #[serde(default, with = "local_time::seq")]
    pub sunset: Vec<NaiveDateTime>,
}

/// A report labelled with the city it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReport {
    pub city: String,
    #[serde(flatten)]
    pub report: WeatherReport,
}

/// Open-Meteo timestamps are local ISO times without an offset and usually
/// without seconds (`2024-05-01T13:00`).
pub(crate) mod local_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const MINUTES: &str = "%Y-%m-%dT%H:%M";
    const SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, MINUTES)
            .or_else(|_| NaiveDateTime::parse_from_str(s, SECONDS))
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(MINUTES))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(|e| D::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }

    pub mod seq {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer, de::Error, ser::SerializeSeq};

        pub fn serialize<S: Serializer>(values: &[NaiveDateTime], s: S) -> Result<S::Ok, S::Error> {
            let mut seq = s.serialize_seq(Some(values.len()))?;
            for value in values {
                seq.serialize_element(&value.format(super::MINUTES).to_string())?;
            }
            seq.end()
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<NaiveDateTime>, D::Error> {
            let raw = Vec::<String>::deserialize(d)?;
            raw.iter()
                .map(|s| {
                    super::parse(s)
                        .map_err(|e| D::Error::custom(format!("invalid timestamp '{s}': {e}")))
                })
                .collect()
        }
    }
}
