//! Presentation layer: turns provider data into display-ready snapshots.
//!
//! Nothing here knows about a particular front-end. Renderers subscribe to
//! [`WeatherViewModel`] and draw whatever [`DisplayState`] they receive.

pub mod format;
pub mod icon;
pub mod state;

use serde::{Deserialize, Serialize};

pub use format::{CurrentView, ForecastDayView, normalize_icon_url};
pub use icon::Glyph;
pub use state::{DisplayState, SearchOutcome, WeatherViewModel};

/// Metric (°C, kph, mm, km) or imperial (°F, mph, in, mi) display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn from_fahrenheit_flag(use_fahrenheit: bool) -> Self {
        if use_fahrenheit { Self::Imperial } else { Self::Metric }
    }

    pub fn is_fahrenheit(self) -> bool {
        self == Self::Imperial
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    pub fn temperature_symbol(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub fn speed_symbol(self) -> &'static str {
        match self {
            Self::Metric => "kph",
            Self::Imperial => "mph",
        }
    }
}
