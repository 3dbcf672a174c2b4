use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    error::WeatherError,
    location::LocationQuery,
    model::{Coordinates, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const GEOCODE_PATH: &str = "/geo/1.0/direct";
const CURRENT_PATH: &str = "/data/2.5/weather";
const GEOCODE_LIMIT: &str = "5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, WeatherError> {
        Url::parse(base_url)
            .map_err(|e| WeatherError::Config(format!("invalid base_url '{base_url}': {e}")))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        })
    }

    /// GET `path` with `params` plus the API key; returns the body of a
    /// successful response.
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String, String> {
        let request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("failed to build request: {}", e.without_url()))?;

        debug!(url = %redacted(request.url()), "sending request");

        let res = self
            .http
            .execute(request)
            .await
            .map_err(|e| format!("request failed: {}", e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| format!("failed to read response body: {}", e.without_url()))?;

        if !status.is_success() {
            return Err(format!("status {}: {}", status, truncate_body(&body)));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoCandidate {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    weather: Vec<OwWeather>,
    main: OwMain,
    sys: OwSys,
    timezone: i32,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Option<WeatherSnapshot> {
        let category = self.weather.into_iter().next()?.main;

        Some(WeatherSnapshot {
            category,
            temperature_kelvin: self.main.temp,
            temp_min_kelvin: self.main.temp_min,
            temp_max_kelvin: self.main.temp_max,
            humidity_pct: self.main.humidity,
            sunrise_unix: self.sys.sunrise,
            sunset_unix: self.sys.sunset,
            timezone_offset_seconds: self.timezone,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, query), fields(location = %query.label()))]
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinates, WeatherError> {
        let target = query.geocode_target();
        let q = target.to_string();

        let fail = |reason: String| {
            debug!(geocode = %q, %reason, "geocoding failed");
            WeatherError::Resolution {
                target: q.clone(),
                reason,
            }
        };

        let body = self
            .get(GEOCODE_PATH, &[("q", q.as_str()), ("limit", GEOCODE_LIMIT)])
            .await
            .map_err(fail)?;

        let candidates: Vec<OwGeoCandidate> = serde_json::from_str(&body)
            .map_err(|e| fail(format!("malformed geocoding response: {e}")))?;

        let first = candidates
            .first()
            .ok_or_else(|| fail("no candidates".to_string()))?;

        debug!(count = candidates.len(), lat = first.lat, lon = first.lon, "resolved");

        Ok(Coordinates {
            latitude: first.lat,
            longitude: first.lon,
        })
    }

    #[instrument(skip(self))]
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        let fail = |reason: String| {
            debug!(%reason, "weather lookup failed");
            WeatherError::Fetch {
                coordinates,
                reason,
            }
        };

        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();

        let body = self
            .get(CURRENT_PATH, &[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await
            .map_err(fail)?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| fail(format!("malformed weather response: {e}")))?;

        parsed
            .into_snapshot()
            .ok_or_else(|| fail("response has no weather entries".to_string()))
    }
}

/// Request URL with the API key masked, for logging.
fn redacted(url: &Url) -> Url {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "appid" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
