use serde::{Deserialize, Deserializer, Serialize};

use crate::error::WeatherError;

/// Number of forecast days to request. WeatherAPI's free tier allows 1 to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ForecastDays(u8);

impl ForecastDays {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every valid selector value, in ascending order.
    pub fn all() -> impl Iterator<Item = ForecastDays> {
        (Self::MIN..=Self::MAX).map(ForecastDays)
    }
}

impl Default for ForecastDays {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for ForecastDays {
    type Error = WeatherError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(WeatherError::InvalidDays(value))
        }
    }
}

impl From<ForecastDays> for u8 {
    fn from(days: ForecastDays) -> Self {
        days.0
    }
}

impl std::fmt::Display for ForecastDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    /// Free-text location: city name, postcode, "lat,lon", IP, ...
    pub query: String,
    pub days: ForecastDays,
}

impl ForecastRequest {
    pub fn new(query: impl Into<String>, days: ForecastDays) -> Self {
        Self { query: query.into(), days }
    }
}

/// Body of `GET /v1/forecast.json`.
///
/// Sections are optional so that a structurally valid but partial body still
/// decodes; [`WeatherResponse::into_parts`] turns a missing section into an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub location: Option<Location>,
    pub current: Option<CurrentConditions>,
    pub forecast: Option<Forecast>,
}

impl WeatherResponse {
    pub fn into_parts(
        self,
    ) -> Result<(Location, CurrentConditions, Vec<ForecastDay>), WeatherError> {
        let location = self.location.ok_or(WeatherError::IncompleteResponse("location"))?;
        let current = self.current.ok_or(WeatherError::IncompleteResponse("current"))?;
        let forecast = self.forecast.ok_or(WeatherError::IncompleteResponse("forecast"))?;
        Ok((location, current, forecast.forecastday))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub localtime: String,
}

impl Location {
    /// "London, United Kingdom"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub gust_kph: f64,
    pub wind_dir: String,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub precip_mm: f64,
    pub vis_km: f64,
    pub dewpoint_c: f64,
    pub is_day: u8,
}

impl CurrentConditions {
    pub fn is_day(&self) -> bool {
        self.is_day == 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// ISO date, e.g. "2024-05-01".
    #[serde(default)]
    pub date: String,
    pub day: Option<DaySummary>,
    pub astro: Option<Astro>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaySummary {
    pub maxtemp_c: Option<f64>,
    pub mintemp_c: Option<f64>,
    pub maxwind_kph: Option<f64>,
    pub totalprecip_mm: Option<f64>,
    pub avgvis_km: Option<f64>,
    pub daily_chance_of_rain: Option<u8>,
    pub daily_chance_of_snow: Option<u8>,
    pub condition: Option<Condition>,
}

impl DaySummary {
    /// Rain chance, else snow chance, else zero.
    pub fn chance_of_precip(&self) -> u8 {
        self.daily_chance_of_rain.or(self.daily_chance_of_snow).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Astro {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub moonrise: Option<String>,
    pub moonset: Option<String>,
    pub moon_phase: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub moon_illumination: Option<u32>,
}

/// Older API revisions send `moon_illumination` as a quoted number.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_days_rejects_out_of_range() {
        assert!(ForecastDays::try_from(0).is_err());
        assert!(ForecastDays::try_from(4).is_err());
        assert_eq!(ForecastDays::try_from(2).unwrap().get(), 2);
        assert_eq!(ForecastDays::default().get(), 3);
        assert_eq!(ForecastDays::all().count(), 3);
    }

    #[test]
    fn current_fields_default_to_zero_when_absent() {
        let current: CurrentConditions =
            serde_json::from_str(r#"{"temp_c": 12.5, "wind_dir": "SW"}"#).unwrap();

        assert_eq!(current.temp_c, 12.5);
        assert_eq!(current.wind_dir, "SW");
        assert_eq!(current.humidity, 0);
        assert_eq!(current.feelslike_f, 0.0);
        assert!(!current.is_day());
        assert_eq!(current.condition, Condition::default());
    }

    #[test]
    fn chance_of_precip_prefers_rain_then_snow_then_zero() {
        let both = DaySummary {
            daily_chance_of_rain: Some(40),
            daily_chance_of_snow: Some(90),
            ..Default::default()
        };
        assert_eq!(both.chance_of_precip(), 40);

        let snow_only = DaySummary { daily_chance_of_snow: Some(70), ..Default::default() };
        assert_eq!(snow_only.chance_of_precip(), 70);

        assert_eq!(DaySummary::default().chance_of_precip(), 0);
    }

    #[test]
    fn moon_illumination_accepts_number_or_string() {
        let astro: Astro = serde_json::from_str(r#"{"moon_illumination": 85}"#).unwrap();
        assert_eq!(astro.moon_illumination, Some(85));

        let astro: Astro = serde_json::from_str(r#"{"moon_illumination": "42"}"#).unwrap();
        assert_eq!(astro.moon_illumination, Some(42));

        let astro: Astro = serde_json::from_str(r#"{"moon_phase": "Full Moon"}"#).unwrap();
        assert_eq!(astro.moon_illumination, None);
    }

    #[test]
    fn missing_section_is_reported_by_name() {
        let resp = WeatherResponse {
            location: Some(Location::default()),
            current: None,
            forecast: Some(Forecast::default()),
        };
        let err = resp.into_parts().unwrap_err();
        assert!(matches!(err, WeatherError::IncompleteResponse("current")));
    }
}
