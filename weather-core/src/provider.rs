use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{ForecastRequest, WeatherResponse},
};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// A source of forecast data. The view model only talks to this trait.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_forecast(&self, request: &ForecastRequest)
    -> Result<WeatherResponse, WeatherError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn get_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<WeatherResponse, WeatherError> {
        (**self).get_forecast(request).await
    }
}

/// Construct the WeatherAPI.com provider using the key from the environment.
pub fn provider_from_env() -> Result<Box<dyn WeatherProvider>, WeatherError> {
    Ok(Box::new(WeatherApiProvider::from_env()?))
}
