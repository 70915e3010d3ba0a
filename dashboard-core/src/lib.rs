//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - Forecast data model and the providers that fetch it
//! - Normalization, summary text and display statistics
//! - The dashboard view model handed to renderers
//! - Configuration handling
//!
//! It is used by `dashboard-cli`, but can also be reused by other binaries or services.

pub mod condition;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod stats;
pub mod summary;

pub use condition::WeatherCondition;
pub use config::{Config, ProviderConfig};
pub use dashboard::{Dashboard, DashboardOptions, build_dashboard, load_dashboard};
pub use error::DashboardError;
pub use model::{Location, NormalizedReport, WeatherQuery, WeatherReport};
pub use normalize::normalize;
pub use provider::{ProviderId, WeatherProvider};
pub use summary::generate_summary;
