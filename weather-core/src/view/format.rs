//! Pure derivation of display strings from provider records.
//!
//! Every view is rebuilt from its source record; nothing here parses a
//! previously formatted string back into a number.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{CurrentConditions, ForecastDay};

use super::{Glyph, UnitSystem};

const KPH_TO_MPH: f64 = 0.621371;
const MM_TO_IN: f64 = 0.0393701;

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Give protocol-relative icon URLs an explicit `https:` scheme.
///
/// Empty input stays empty, `//host/path` becomes `https://host/path`, and
/// anything else (absolute URLs included) is returned untouched.
pub fn normalize_icon_url(raw: &str) -> String {
    if raw.starts_with("//") {
        format!("https:{raw}")
    } else {
        raw.to_string()
    }
}

/// Fixed-point text with ties rounded away from zero and no "-0".
fn fixed(value: f64, decimals: u8) -> String {
    let scale = 10f64.powi(i32::from(decimals));
    let rounded = (value * scale).round() / scale;
    // -0.0 == 0.0, so this also drops the sign of a rounded-away negative.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.prec$}", prec = usize::from(decimals))
}

fn temperature(celsius: f64, units: UnitSystem) -> String {
    let value = match units {
        UnitSystem::Metric => celsius,
        UnitSystem::Imperial => celsius_to_fahrenheit(celsius),
    };
    format!("{}{}", fixed(value, 0), units.temperature_symbol())
}

fn speed(kph: f64, units: UnitSystem) -> String {
    let value = match units {
        UnitSystem::Metric => kph,
        UnitSystem::Imperial => kph * KPH_TO_MPH,
    };
    format!("{} {}", fixed(value, 0), units.speed_symbol())
}

fn precipitation(mm: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{} mm", fixed(mm, 1)),
        UnitSystem::Imperial => format!("{} in", fixed(mm * MM_TO_IN, 2)),
    }
}

fn distance(km: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{} km", fixed(km, 0)),
        UnitSystem::Imperial => format!("{} mi", fixed(km * KPH_TO_MPH, 0)),
    }
}

/// "Wed 1 May" for an ISO date; the raw string if it doesn't parse.
fn day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a %-d %b").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentView {
    pub condition_text: String,
    pub icon_url: String,
    pub glyph: Glyph,
    pub temperature: String,
    pub feels_like: String,
    pub wind: String,
    pub gust: String,
    pub dewpoint: String,
    pub precip: String,
    pub visibility: String,
    pub humidity: String,
    pub cloud: String,
    pub is_day: bool,
    pub day_night: String,
}

impl CurrentView {
    pub fn derive(current: &CurrentConditions, units: UnitSystem) -> Self {
        let feels_like = match units {
            UnitSystem::Metric => format!("{}°C", fixed(current.feelslike_c, 0)),
            UnitSystem::Imperial => format!("{}°F", fixed(current.feelslike_f, 0)),
        };

        // The API has a native mph field for wind but not for gusts.
        let wind = match units {
            UnitSystem::Metric => format!("{} kph {}", fixed(current.wind_kph, 0), current.wind_dir),
            UnitSystem::Imperial => {
                format!("{} mph {}", fixed(current.wind_mph, 0), current.wind_dir)
            }
        };

        let dewpoint = match units {
            UnitSystem::Metric => format!("Dew {}°C", fixed(current.dewpoint_c, 1)),
            UnitSystem::Imperial => {
                format!("Dew {}°F", fixed(celsius_to_fahrenheit(current.dewpoint_c), 1))
            }
        };

        Self {
            condition_text: current.condition.text.clone(),
            icon_url: normalize_icon_url(&current.condition.icon),
            glyph: Glyph::classify(&current.condition.text),
            temperature: temperature(current.temp_c, units),
            feels_like,
            wind,
            gust: format!("Gusts {}", speed(current.gust_kph, units)),
            dewpoint,
            precip: precipitation(current.precip_mm, units),
            visibility: distance(current.vis_km, units),
            humidity: format!("{}%", current.humidity),
            cloud: format!("{}%", current.cloud),
            is_day: current.is_day(),
            day_night: if current.is_day() { "Day" } else { "Night" }.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastDayView {
    pub date: String,
    pub day_label: String,
    pub condition: String,
    pub icon_url: String,
    pub glyph: Glyph,
    pub max_temp: String,
    pub min_temp: String,
    pub max_wind: String,
    pub total_precip: String,
    pub chance_of_precip: u8,
    pub chance_of_precip_text: String,
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    pub moon_illumination: String,
}

impl ForecastDayView {
    pub fn derive(day: &ForecastDay, units: UnitSystem) -> Self {
        let summary = day.day.clone().unwrap_or_default();
        let astro = day.astro.clone().unwrap_or_default();
        let condition = summary.condition.clone().unwrap_or_default();
        let chance = summary.chance_of_precip();

        Self {
            date: day.date.clone(),
            day_label: day_label(&day.date),
            glyph: Glyph::classify(&condition.text),
            icon_url: normalize_icon_url(&condition.icon),
            condition: condition.text,
            max_temp: temperature(summary.maxtemp_c.unwrap_or(0.0), units),
            min_temp: temperature(summary.mintemp_c.unwrap_or(0.0), units),
            max_wind: speed(summary.maxwind_kph.unwrap_or(0.0), units),
            total_precip: precipitation(summary.totalprecip_mm.unwrap_or(0.0), units),
            chance_of_precip: chance,
            chance_of_precip_text: format!("{chance}%"),
            sunrise: astro.sunrise.unwrap_or_default(),
            sunset: astro.sunset.unwrap_or_default(),
            moonrise: astro.moonrise.unwrap_or_default(),
            moonset: astro.moonset.unwrap_or_default(),
            moon_phase: astro.moon_phase.unwrap_or_default(),
            moon_illumination: astro.moon_illumination.unwrap_or(0).to_string(),
        }
    }

    pub fn derive_all(days: &[ForecastDay], units: UnitSystem) -> Vec<Self> {
        days.iter().map(|d| Self::derive(d, units)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Astro, Condition, DaySummary};

    fn london_current() -> CurrentConditions {
        CurrentConditions {
            temp_c: 18.0,
            feelslike_c: 17.0,
            feelslike_f: 62.6,
            is_day: 1,
            wind_kph: 10.0,
            // Deliberately not 10 * 0.621371 so the test can tell which field was used.
            wind_mph: 9.0,
            wind_dir: "N".into(),
            gust_kph: 15.0,
            dewpoint_c: 10.0,
            precip_mm: 2.0,
            vis_km: 10.0,
            humidity: 72,
            cloud: 50,
            condition: Condition {
                text: "Partly cloudy".into(),
                icon: "//cdn.weatherapi.com/weather/64x64/day/116.png".into(),
            },
        }
    }

    #[test]
    fn icon_url_normalization() {
        assert_eq!(normalize_icon_url(""), "");
        assert_eq!(normalize_icon_url("//cdn.example/icon.png"), "https://cdn.example/icon.png");
        assert_eq!(normalize_icon_url("http://x/y.png"), "http://x/y.png");
        assert_eq!(normalize_icon_url("https://x/y.png"), "https://x/y.png");
        assert_eq!(normalize_icon_url("icon.png"), "icon.png");
    }

    #[test]
    fn metric_current_view() {
        let view = CurrentView::derive(&london_current(), UnitSystem::Metric);

        assert_eq!(view.temperature, "18°C");
        assert_eq!(view.feels_like, "17°C");
        assert_eq!(view.day_night, "Day");
        assert_eq!(view.wind, "10 kph N");
        assert_eq!(view.gust, "Gusts 15 kph");
        assert_eq!(view.dewpoint, "Dew 10.0°C");
        assert_eq!(view.precip, "2.0 mm");
        assert_eq!(view.visibility, "10 km");
        assert_eq!(view.humidity, "72%");
        assert_eq!(view.cloud, "50%");
        assert_eq!(view.icon_url, "https://cdn.weatherapi.com/weather/64x64/day/116.png");
        assert_eq!(view.glyph, Glyph::Cloud);
    }

    #[test]
    fn imperial_current_view() {
        let view = CurrentView::derive(&london_current(), UnitSystem::Imperial);

        assert_eq!(view.temperature, "64°F");
        assert_eq!(view.feels_like, "63°F");
        assert_eq!(view.wind, "9 mph N");
        assert_eq!(view.gust, "Gusts 9 mph");
        assert_eq!(view.dewpoint, "Dew 50.0°F");
        assert_eq!(view.precip, "0.08 in");
        assert_eq!(view.visibility, "6 mi");
    }

    #[test]
    fn half_values_round_away_from_zero() {
        let current = CurrentConditions {
            temp_c: 18.5,
            feelslike_c: 12.5,
            dewpoint_c: 10.25,
            wind_kph: 2.5,
            ..london_current()
        };
        let view = CurrentView::derive(&current, UnitSystem::Metric);

        assert_eq!(view.temperature, "19°C");
        assert_eq!(view.feels_like, "13°C");
        assert_eq!(view.dewpoint, "Dew 10.3°C");
        assert_eq!(view.wind, "3 kph N");
    }

    #[test]
    fn small_negatives_do_not_render_as_minus_zero() {
        let current = CurrentConditions {
            temp_c: -0.4,
            feelslike_c: -0.2,
            dewpoint_c: -0.04,
            ..london_current()
        };
        let view = CurrentView::derive(&current, UnitSystem::Metric);

        assert_eq!(view.temperature, "0°C");
        assert_eq!(view.feels_like, "0°C");
        assert_eq!(view.dewpoint, "Dew 0.0°C");

        let cold = CurrentConditions { temp_c: -2.5, ..london_current() };
        assert_eq!(CurrentView::derive(&cold, UnitSystem::Metric).temperature, "-3°C");
    }

    #[test]
    fn fixed_keeps_requested_precision() {
        assert_eq!(fixed(0.07874, 2), "0.08");
        assert_eq!(fixed(1.0, 1), "1.0");
        assert_eq!(fixed(-0.004, 2), "0.00");
    }

    #[test]
    fn night_label() {
        let current = CurrentConditions { is_day: 0, ..london_current() };
        let view = CurrentView::derive(&current, UnitSystem::Metric);
        assert!(!view.is_day);
        assert_eq!(view.day_night, "Night");
    }

    #[test]
    fn forecast_day_view_formats_summary_and_astro() {
        let day = ForecastDay {
            date: "2024-05-01".into(),
            day: Some(DaySummary {
                maxtemp_c: Some(20.0),
                mintemp_c: Some(10.0),
                maxwind_kph: Some(30.0),
                totalprecip_mm: Some(1.2),
                daily_chance_of_snow: Some(35),
                condition: Some(Condition { text: "Sunny".into(), icon: String::new() }),
                ..Default::default()
            }),
            astro: Some(Astro {
                sunrise: Some("05:30 AM".into()),
                sunset: Some("08:30 PM".into()),
                moonrise: Some("01:10 AM".into()),
                moonset: Some("11:45 AM".into()),
                moon_phase: Some("Waning Crescent".into()),
                moon_illumination: Some(31),
            }),
        };

        let metric = ForecastDayView::derive(&day, UnitSystem::Metric);
        assert_eq!(metric.date, "2024-05-01");
        assert_eq!(metric.day_label, "Wed 1 May");
        assert_eq!(metric.condition, "Sunny");
        assert_eq!(metric.glyph, Glyph::Sun);
        assert_eq!(metric.icon_url, "");
        assert_eq!(metric.max_temp, "20°C");
        assert_eq!(metric.min_temp, "10°C");
        assert_eq!(metric.max_wind, "30 kph");
        assert_eq!(metric.total_precip, "1.2 mm");
        assert_eq!(metric.chance_of_precip, 35);
        assert_eq!(metric.chance_of_precip_text, "35%");
        assert_eq!(metric.sunrise, "05:30 AM");
        assert_eq!(metric.moonset, "11:45 AM");
        assert_eq!(metric.moon_phase, "Waning Crescent");
        assert_eq!(metric.moon_illumination, "31");

        let imperial = ForecastDayView::derive(&day, UnitSystem::Imperial);
        assert_eq!(imperial.max_temp, "68°F");
        assert_eq!(imperial.min_temp, "50°F");
        assert_eq!(imperial.max_wind, "19 mph");
        assert_eq!(imperial.sunrise, metric.sunrise);
    }

    #[test]
    fn empty_forecast_day_uses_zero_and_empty_defaults() {
        let day = ForecastDay { date: "not-a-date".into(), day: None, astro: None };
        let view = ForecastDayView::derive(&day, UnitSystem::Metric);

        assert_eq!(view.day_label, "not-a-date");
        assert_eq!(view.max_temp, "0°C");
        assert_eq!(view.chance_of_precip, 0);
        assert_eq!(view.moon_illumination, "0");
        assert_eq!(view.sunset, "");
        assert_eq!(view.glyph, Glyph::Cloud);
    }

    #[test]
    fn derive_all_preserves_order_and_length() {
        let days: Vec<ForecastDay> = ["2024-05-01", "2024-05-02", "2024-05-03"]
            .into_iter()
            .map(|d| ForecastDay { date: d.into(), ..Default::default() })
            .collect();

        let views = ForecastDayView::derive_all(&days, UnitSystem::Metric);
        let dates: Vec<_> = views.iter().map(|v| v.date.as_str()).collect();
        assert_eq!(dates, ["2024-05-01", "2024-05-02", "2024-05-03"]);
    }
}
