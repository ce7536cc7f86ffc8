use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    error::SearchError,
    model::{WeatherRequest, WeatherResult},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    pub fn weather_url(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherResult, SearchError> {
        let url = self.weather_url();
        debug!(%url, city, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("APPID", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenWeather request failed");
                SearchError::network(e)
            })?;

        // Error payloads arrive with a non-2xx status but are still JSON carrying `cod`,
        // so the body decides the outcome, not the status.
        let status = res.status();
        let body = res.text().await.map_err(|e| {
            warn!(error = %e, "failed to read OpenWeather response body");
            SearchError::network(e)
        })?;

        debug!(%status, bytes = body.len(), "OpenWeather responded");
        interpret_body(&body)
    }
}

#[derive(Debug, Error)]
#[error("OpenWeather returned cod {code}: {message}")]
struct UnexpectedStatus {
    code: String,
    message: String,
}

/// `cod` is a number on success and a string on errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(i64),
    Text(String),
}

impl OwCode {
    fn normalized(&self) -> String {
        match self {
            OwCode::Number(n) => n.to_string(),
            OwCode::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwEnvelope {
    cod: Option<OwCode>,
    message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<u32>,
}

impl From<OwCurrentResponse> for WeatherResult {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition, description) = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_else(|| ("Unknown".to_string(), "unknown".to_string()));

        WeatherResult {
            location_name: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            temp_min_c: parsed.main.temp_min,
            temp_max_c: parsed.main.temp_max,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            visibility_m: parsed.visibility,
            condition,
            description,
        }
    }
}

/// Classify a raw `/weather` response body.
///
/// `"404"` and `"400"` are domain errors. A payload without `cod`, or with `cod` 200,
/// must carry the full current-weather shape. Anything else, including bodies that are
/// not JSON, counts as a network failure.
pub(crate) fn interpret_body(body: &str) -> Result<WeatherResult, SearchError> {
    let envelope: OwEnvelope = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, body = %truncate_body(body), "OpenWeather body is not JSON");
        SearchError::network(e)
    })?;

    let code = envelope.cod.as_ref().map(OwCode::normalized);
    match code.as_deref() {
        Some("404") => Err(SearchError::NotFound),
        Some("400") => Err(SearchError::BadRequest),
        None | Some("200") => {
            let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(|e| {
                warn!(error = %e, "malformed OpenWeather current payload");
                SearchError::network(e)
            })?;
            Ok(parsed.into())
        }
        Some(other) => {
            let message = envelope
                .message
                .map(|m| match m {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or_default();
            warn!(cod = other, %message, "unexpected OpenWeather status");
            Err(SearchError::network(UnexpectedStatus {
                code: other.to_string(),
                message,
            }))
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherResult, SearchError> {
        self.fetch_current(&request.city).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
