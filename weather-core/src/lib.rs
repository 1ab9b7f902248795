//! Core library for the `weather` app.
//!
//! This crate defines:
//! - The WeatherAPI.com data model and client
//! - Configuration (API key from the environment, preferences on disk)
//! - The view model that turns responses into display-ready snapshots
//!
//! It is used by `weather-cli`, but any front-end can drive
//! [`WeatherViewModel`] and render the [`DisplayState`] it publishes.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use config::{API_KEY_ENV, Config};
pub use error::WeatherError;
pub use model::{ForecastDays, ForecastRequest, WeatherResponse};
pub use provider::{WeatherApiProvider, WeatherProvider, provider_from_env};
pub use view::{
    CurrentView, DisplayState, ForecastDayView, Glyph, SearchOutcome, UnitSystem,
    WeatherViewModel,
};
