//! Current-weather lookup against the OpenWeatherMap API.
//!
//! Running without an API key is a supported mode: every lookup then returns
//! a fixed mock report so recommendations stay usable offline and in tests.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use babtory_core::config::WeatherConfig;
use babtory_core::weather::WeatherReport;

/// Mock fallback used whenever the real API is unavailable.
const MOCK_LOCATION: &str = "대구";
const MOCK_CONDITION: &str = "Clear";
const MOCK_DESCRIPTION: &str = "맑음";
const MOCK_TEMPERATURE_C: f64 = 20.0;
const MOCK_HUMIDITY: u8 = 50;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather client could not be constructed: {0}")]
    Build(reqwest::Error),
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("weather payload was malformed: {0}")]
    Payload(String),
}

pub struct WeatherClient {
    http: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    default_lat: f64,
    default_lon: f64,
}

impl WeatherClient {
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(WeatherError::Build)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_lat: config.default_lat,
            default_lon: config.default_lon,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current weather at the given coordinates. Errors when no API key is
    /// configured; use [`current_or_mock`](Self::current_or_mock) for the
    /// degraded mode.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            WeatherError::Payload("no API key configured; only mock weather is available".into())
        })?;

        let url = format!("{}/weather", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", api_key.expose_secret().to_string()),
                ("units", "metric".to_string()),
                ("lang", "kr".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload: OwmResponse = response.json().await?;
        payload.into_report()
    }

    /// Lookup at the configured default coordinates, falling back to the mock
    /// report when the key is missing or the request fails.
    pub async fn current_or_mock(&self) -> WeatherReport {
        self.current_at_or_mock(self.default_lat, self.default_lon).await
    }

    pub async fn current_at_or_mock(&self, lat: f64, lon: f64) -> WeatherReport {
        if self.api_key.is_none() {
            debug!("no weather API key configured, serving mock weather");
            return mock_report();
        }

        match self.current(lat, lon).await {
            Ok(report) => report,
            Err(error) => {
                warn!(%error, "weather lookup failed, serving mock weather");
                mock_report()
            }
        }
    }
}

pub fn mock_report() -> WeatherReport {
    WeatherReport {
        location: MOCK_LOCATION.to_string(),
        condition: MOCK_CONDITION.to_string(),
        description: MOCK_DESCRIPTION.to_string(),
        temperature_c: MOCK_TEMPERATURE_C,
        feels_like_c: MOCK_TEMPERATURE_C,
        humidity: MOCK_HUMIDITY,
        is_mock: true,
    }
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: Option<String>,
    weather: Vec<OwmWeather>,
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

impl OwmResponse {
    fn into_report(self) -> Result<WeatherReport, WeatherError> {
        let head = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Payload("empty `weather` array".into()))?;

        let humidity = if (0.0..=100.0).contains(&self.main.humidity) {
            self.main.humidity.round() as u8
        } else {
            return Err(WeatherError::Payload(format!(
                "humidity out of range: {}",
                self.main.humidity
            )));
        };

        Ok(WeatherReport {
            location: self.name.unwrap_or_else(|| MOCK_LOCATION.to_string()),
            condition: head.main,
            description: head.description,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity,
            is_mock: false,
        })
    }
}
