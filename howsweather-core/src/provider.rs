use crate::{
    Config,
    error::WeatherError,
    location::LocationQuery,
    model::{Coordinates, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The two lookups a query needs: geocoding, then current conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Coordinates of the first geocoding candidate for `query`.
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinates, WeatherError>;

    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the OpenWeather provider from config and the environment.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.api_key()?;

    let provider = match &config.base_url {
        Some(base) => OpenWeatherProvider::with_base_url(api_key, base)?,
        None => OpenWeatherProvider::new(api_key),
    };

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_base_url_is_a_config_error() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("not a url".into()),
        };
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(matches!(err, WeatherError::Config(_)));
    }

    #[test]
    fn provider_from_config_accepts_base_override() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://127.0.0.1:8080/".into()),
        };
        assert!(provider_from_config(&cfg).is_ok());
    }
}
