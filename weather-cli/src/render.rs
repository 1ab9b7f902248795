//! Plain-text rendering of a [`DisplayState`] snapshot.

use std::fmt;

use weather_core::{CurrentView, DisplayState, ForecastDayView};

pub fn render(state: &DisplayState) -> String {
    Screen(state).to_string()
}

/// One frame of terminal output.
pub struct Screen<'a>(pub &'a DisplayState);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        if state.is_loading {
            writeln!(f, "Searching for \"{}\"...", state.query)?;
        }

        if let Some(message) = state.error_message.as_deref().filter(|_| state.has_error()) {
            writeln!(f, "! {message}")?;
        }

        match &state.current {
            Some(current) => {
                writeln!(f, "{}  ({})", state.location_name, state.local_time)?;
                write_current(f, current)?;
            }
            None if !state.is_loading && !state.has_error() => {
                writeln!(f, "No results yet. Search for a location.")?;
            }
            None => {}
        }

        if !state.forecast.is_empty() {
            writeln!(f)?;
            writeln!(f, "Forecast ({} days)", state.forecast.len())?;
            for day in &state.forecast {
                write_day(f, day)?;
            }
        }

        Ok(())
    }
}

fn write_current(f: &mut fmt::Formatter<'_>, current: &CurrentView) -> fmt::Result {
    writeln!(f, "{} {} ({})", current.glyph.symbol(), current.condition_text, current.day_night)?;
    writeln!(f, "  {}  feels like {}", current.temperature, current.feels_like)?;
    writeln!(f, "  Wind {} · {}", current.wind, current.gust)?;
    writeln!(
        f,
        "  Humidity {} · Cloud {} · {}",
        current.humidity, current.cloud, current.dewpoint
    )?;
    writeln!(f, "  Precip {} · Visibility {}", current.precip, current.visibility)?;
    if !current.icon_url.is_empty() {
        writeln!(f, "  Icon {}", current.icon_url)?;
    }
    Ok(())
}

fn write_day(f: &mut fmt::Formatter<'_>, day: &ForecastDayView) -> fmt::Result {
    writeln!(
        f,
        "  {:<11} {} {:<24} {} / {}  precip {}",
        day.day_label,
        day.glyph.symbol(),
        day.condition,
        day.max_temp,
        day.min_temp,
        day.chance_of_precip_text
    )?;
    writeln!(
        f,
        "  {:<11} wind {} · {} · sun {}-{} · moon {}-{} {} ({}%)",
        "",
        day.max_wind,
        day.total_precip,
        day.sunrise,
        day.sunset,
        day.moonrise,
        day.moonset,
        day.moon_phase,
        day.moon_illumination
    )
}
