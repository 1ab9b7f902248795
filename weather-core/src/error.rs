//! Error taxonomy shared by the provider and the view model.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "WEATHERAPI_KEY environment variable is not set. \
         Set it to your WeatherAPI key before running the app."
    )]
    MissingApiKey,

    #[error("Forecast length must be between 1 and 3 days, got {0}")]
    InvalidDays(u8),

    #[error("Failed to reach WeatherAPI.com: {0}")]
    Network(#[from] reqwest::Error),

    #[error("WeatherAPI request failed with status {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Failed to parse WeatherAPI forecast JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("WeatherAPI response is missing the `{0}` section")]
    IncompleteResponse(&'static str),
}

impl WeatherError {
    /// Message shown in the error banner of the front-end.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Http { status, .. } if *status == StatusCode::BAD_REQUEST => {
                "Location not found. Try a different search.".to_string()
            }
            Self::Http { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN =>
            {
                "WeatherAPI rejected the API key.".to_string()
            }
            Self::Http { status, .. } => format!("WeatherAPI error ({status})"),
            Self::Decode(_) | Self::IncompleteResponse(_) => {
                "Received an unexpected response from WeatherAPI.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Configuration errors cannot be recovered by searching again.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_names_the_env_var() {
        let err = WeatherError::MissingApiKey;
        assert!(err.to_string().contains("WEATHERAPI_KEY"));
        assert!(err.is_fatal());
    }

    #[test]
    fn http_errors_map_to_friendly_messages() {
        let err = WeatherError::Http { status: StatusCode::BAD_REQUEST, body: "{}".into() };
        assert!(err.user_message().contains("Location not found"));
        assert!(!err.is_fatal());

        let err = WeatherError::Http { status: StatusCode::FORBIDDEN, body: String::new() };
        assert!(err.user_message().contains("API key"));

        let err = WeatherError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert!(err.user_message().contains("500"));
    }

    #[test]
    fn shape_errors_are_not_fatal() {
        let err = WeatherError::IncompleteResponse("current");
        assert!(err.to_string().contains("`current`"));
        assert!(err.user_message().contains("unexpected response"));
        assert!(!err.is_fatal());
    }
}
