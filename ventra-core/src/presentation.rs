//! Pure mapping from a [`WeatherResult`] to what the view displays.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::model::WeatherResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    Sun,
    Moon,
    Cloud,
    CloudRain,
    CloudLightning,
    Snowflake,
    Wind,
}

/// Icon family per condition group, as `(day, night)`.
fn icon_family(condition: &str) -> Option<(Icon, Icon)> {
    let family = match condition {
        "Clear" => (Icon::Sun, Icon::Moon),
        "Clouds" | "Mist" | "Smoke" | "Haze" | "Dust" | "Fog" | "Sand" | "Ash" => {
            (Icon::Cloud, Icon::Cloud)
        }
        "Rain" | "Drizzle" => (Icon::CloudRain, Icon::CloudRain),
        "Thunderstorm" => (Icon::CloudLightning, Icon::CloudLightning),
        "Snow" => (Icon::Snowflake, Icon::Snowflake),
        "Squall" | "Tornado" => (Icon::Wind, Icon::Wind),
        _ => return None,
    };
    Some(family)
}

/// Unrecognised conditions get the cloud icon.
pub fn icon_for(condition: &str, is_night: bool) -> Icon {
    let (day, night) = icon_family(condition).unwrap_or((Icon::Cloud, Icon::Cloud));
    if is_night { night } else { day }
}

/// Background intensity chosen from the current temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Background {
    /// Nothing loaded yet.
    Default,
    Hot,
    Warm,
    Cool,
    Cold,
}

impl Background {
    pub fn for_temperature(temp_c: f64) -> Self {
        if temp_c > 25.0 {
            Background::Hot
        } else if temp_c > 15.0 {
            Background::Warm
        } else if temp_c > 5.0 {
            Background::Cool
        } else {
            Background::Cold
        }
    }

    pub fn for_weather(weather: Option<&WeatherResult>) -> Self {
        weather.map_or(Background::Default, |w| Self::for_temperature(w.temperature_c))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Background::Default => "default",
            Background::Hot => "hot",
            Background::Warm => "warm",
            Background::Cool => "cool",
            Background::Cold => "cold",
        }
    }
}

impl Display for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rounds halves towards positive infinity, so -2.5 becomes -2.
pub fn round_half_up(value: f64) -> i64 {
    // `value - floor` is exact, unlike `value + 0.5`.
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

pub fn format_celsius(value: f64) -> String {
    format!("{}°C", round_half_up(value))
}

/// e.g. "Friday, October 16, 2026".
pub fn format_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%A, %B %-d, %Y").to_string()
}

/// 12-hour clock with a two-digit hour, e.g. "04:05 PM".
pub fn format_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%I:%M %p").to_string()
}

/// Everything the populated screen shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherView {
    pub location: String,
    pub date: String,
    pub time: String,
    pub icon: Icon,
    pub background: Background,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub visibility: String,
    pub temp_min: String,
    pub temp_max: String,
}

impl WeatherView {
    pub fn new<Tz: TimeZone>(weather: &WeatherResult, is_night: bool, now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: Display,
    {
        let location = if weather.country.is_empty() {
            weather.location_name.clone()
        } else {
            format!("{}, {}", weather.location_name, weather.country)
        };

        let visibility = weather
            .visibility_m
            .map(|m| format!("{:.1} km", f64::from(m) / 1000.0))
            .unwrap_or_else(|| "n/a".to_string());

        Self {
            location,
            date: format_date(now),
            time: format_time(now),
            icon: icon_for(&weather.condition, is_night),
            background: Background::for_temperature(weather.temperature_c),
            temperature: format_celsius(weather.temperature_c),
            description: weather.description.clone(),
            feels_like: format_celsius(weather.feels_like_c),
            humidity: format!("{}%", weather.humidity_pct),
            wind_speed: format!("{} m/s", weather.wind_speed_mps),
            visibility,
            temp_min: format_celsius(weather.temp_min_c),
            temp_max: format_celsius(weather.temp_max_c),
        }
    }
}
