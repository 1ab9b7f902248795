use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::{api_key_from_env, validate_api_key},
    error::WeatherError,
    model::{ForecastRequest, WeatherResponse},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

// Keep the key out of logs.
impl std::fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiProvider").field("base_url", &self.base_url).finish()
    }
}

impl WeatherApiProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let api_key = api_key.into();
        validate_api_key(&api_key)?;

        Ok(Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() })
    }

    /// Build from the `WEATHERAPI_KEY` environment variable.
    pub fn from_env() -> Result<Self, WeatherError> {
        Self::new(api_key_from_env()?)
    }

    /// Point the provider at a different API root, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn get_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<WeatherResponse, WeatherError> {
        let days = request.days.to_string();

        tracing::debug!(query = %request.query, days = %days, "requesting forecast");

        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", request.query.as_str()),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "forecast request failed");
            return Err(WeatherError::Http { status, body: truncate_body(&body) });
        }

        let parsed: WeatherResponse = serde_json::from_str(&body)?;

        tracing::debug!(
            days = parsed.forecast.as_ref().map_or(0, |f| f.forecastday.len()),
            "forecast received"
        );

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
