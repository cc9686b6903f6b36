//! Weather input types for the recommendation engine.
//!
//! Condition tags follow the OpenWeatherMap `weather[0].main` vocabulary
//! (`Clear`, `Rain`, `Snow`, ...); anything unrecognized folds into
//! [`WeatherKind::Other`] and is treated as mild weather by the rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherKind {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Other,
}

impl WeatherKind {
    pub fn parse(condition: &str) -> Self {
        match condition.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" => Self::Rain,
            "drizzle" => Self::Drizzle,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" | "fog" | "haze" => Self::Mist,
            _ => Self::Other,
        }
    }

    /// Rain-like conditions that trigger the rainy-day rules.
    pub fn is_precipitation(self) -> bool {
        matches!(self, Self::Rain | Self::Drizzle | Self::Thunderstorm)
    }
}

/// What the engine needs to know about current weather.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherInput {
    pub kind: WeatherKind,
    pub temperature_c: f64,
}

impl WeatherInput {
    pub fn new(condition: &str, temperature_c: f64) -> Self {
        Self { kind: WeatherKind::parse(condition), temperature_c }
    }
}

/// Full weather lookup result, as produced by the weather client. The engine
/// only consumes the [`WeatherInput`] projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub condition: String,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity: u8,
    pub is_mock: bool,
}

impl WeatherReport {
    pub fn to_input(&self) -> WeatherInput {
        WeatherInput::new(&self.condition, self.temperature_c)
    }
}
