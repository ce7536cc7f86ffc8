use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub city: String,
}

impl WeatherRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// Current conditions for a single location, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub location_name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Metres. Some stations omit it.
    pub visibility_m: Option<u32>,
    /// Condition group as reported by the provider, e.g. "Clear" or "Rain".
    pub condition: String,
    pub description: String,
}
