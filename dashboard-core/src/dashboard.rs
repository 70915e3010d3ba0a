//! View model for one dashboard render.
//!
//! Everything the renderer shows is derived here from a single normalized
//! report; renderers only lay it out.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    condition::WeatherCondition,
    error::DashboardError,
    model::{Location, NormalizedReport, WeatherQuery, WeatherReport},
    normalize::normalize,
    provider::WeatherProvider,
    stats, summary,
};

pub const OVERVIEW_TITLE: &str = "Todays Overview";
pub const HIGH_UV_WARNING: &str = "The UV is high today, be sure to wear SPF!";

/// Number of hourly entries plotted on each chart.
const CHART_HOURS: usize = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardOptions {
    pub timezone: String,
    pub greeting: Option<String>,
}

impl DashboardOptions {
    pub fn from_config(config: &crate::Config) -> Self {
        Self { timezone: config.timezone().to_string(), greeting: config.greeting.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub panel: InformationPanel,
    pub title: &'static str,
    pub last_updated: NaiveDateTime,
    pub timezone: String,
    pub summary: Callout,
    pub stat_cards: Vec<StatCard>,
    pub uv_warning: Option<Callout>,
    pub charts: Vec<Chart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InformationPanel {
    pub city: String,
    pub latitude: String,
    pub longitude: String,
    pub temperature: f64,
    pub condition: Option<WeatherCondition>,
    pub is_day: Option<bool>,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Callout {
    pub message: String,
    pub warning: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Yellow,
    Green,
    Rose,
    Cyan,
    Violet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub metric: String,
    pub color: CardColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: &'static str,
    /// Hour labels, `HH:MM`.
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// Fetch, normalize and derive a complete dashboard.
pub async fn load_dashboard(
    provider: &dyn WeatherProvider,
    location: &Location,
    options: &DashboardOptions,
) -> anyhow::Result<Dashboard> {
    let query = WeatherQuery::for_location(location, options.timezone.as_str());
    let report = provider.fetch_weather(&query).await.map_err(DashboardError::Fetch)?;

    let dashboard = build_dashboard(report, location, options)?;
    tracing::info!(city = %location.city, provider = %provider.id(), "dashboard rendered");
    Ok(dashboard)
}

pub fn build_dashboard(
    report: WeatherReport,
    location: &Location,
    options: &DashboardOptions,
) -> Result<Dashboard, DashboardError> {
    let report = normalize(report, &location.city);

    let summary_text = summary::generate_summary(&report)?;
    let message = match options.greeting.as_deref() {
        Some(greeting) if !greeting.is_empty() => format!("{greeting} {summary_text}"),
        _ => summary_text,
    };

    let stat_cards = vec![
        StatCard {
            title: "Maximum Temperature",
            metric: format!("{}°", stats::max_temperature(&report)?),
            color: CardColor::Yellow,
        },
        StatCard {
            title: "Minimum Temperature",
            metric: format!("{}°", stats::min_temperature(&report)?),
            color: CardColor::Green,
        },
        StatCard { title: "UV Index", metric: stats::uv_index(&report)?, color: CardColor::Rose },
        StatCard {
            title: "Wind Speed",
            // labelled m/s although the source reports km/h
            metric: format!("{}m/s", stats::wind_speed(&report)),
            color: CardColor::Cyan,
        },
        StatCard {
            title: "Wind Direction",
            metric: format!("{}°", stats::wind_direction(&report)),
            color: CardColor::Violet,
        },
    ];

    let uv_warning = stats::high_uv_flag(&report)?
        .then(|| Callout { message: HIGH_UV_WARNING.to_string(), warning: true });

    let charts = charts(&report);
    let panel = information_panel(&report, location);

    let NormalizedReport { report, .. } = report;
    Ok(Dashboard {
        panel,
        title: OVERVIEW_TITLE,
        last_updated: report.current_weather.time,
        timezone: report.timezone,
        summary: Callout { message, warning: false },
        stat_cards,
        uv_warning,
        charts,
    })
}

fn information_panel(report: &NormalizedReport, location: &Location) -> InformationPanel {
    let weather = &report.report;
    InformationPanel {
        city: report.city.clone(),
        latitude: location.latitude.clone(),
        longitude: location.longitude.clone(),
        temperature: weather.current_weather.temperature,
        condition: weather.current_weather.weathercode.map(WeatherCondition::from_wmo_code),
        is_day: weather.current_weather.is_day.map(|flag| flag == 1),
        sunrise: weather.daily.sunrise.first().copied(),
        sunset: weather.daily.sunset.first().copied(),
        timezone: weather.timezone.clone(),
    }
}

fn charts(report: &NormalizedReport) -> Vec<Chart> {
    let hourly = &report.report.hourly;
    let labels: Vec<String> = hourly
        .time
        .iter()
        .take(CHART_HOURS)
        .map(|t| t.format("%H:%M").to_string())
        .collect();

    vec![
        Chart {
            title: "Temperature & UV Index",
            labels: labels.clone(),
            series: vec![
                Series { name: "Temperatures (C)", values: head(&hourly.temperature_2m) },
                Series { name: "UV Index", values: head(&hourly.uv_index) },
            ],
        },
        Chart {
            title: "Chances of Rain",
            labels: labels.clone(),
            series: vec![Series {
                name: "Rain (%)",
                values: head(&hourly.precipitation_probability),
            }],
        },
        Chart {
            title: "Humidity Levels",
            labels,
            series: vec![Series { name: "Humidity (%)", values: head(&hourly.relativehumidity_2m) }],
        },
    ]
}

fn head(values: &[f64]) -> Vec<f64> {
    values.iter().take(CHART_HOURS).copied().collect()
}
