//! Plain-text screens for each UI state.

use std::fmt::Write;

use ventra_core::{AppState, Icon, UiState, WeatherView};

pub const LOADING_TEXT: &str = "Fetching weather data...";

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Sun => "☀",
        Icon::Moon => "☾",
        Icon::Cloud => "☁",
        Icon::CloudRain => "🌧",
        Icon::CloudLightning => "🌩",
        Icon::Snowflake => "❄",
        Icon::Wind => "🌬",
    }
}

pub fn screen(state: &AppState) -> String {
    match state.ui_state() {
        UiState::Loading => format!("{LOADING_TEXT}\n"),
        UiState::Success => state.view().map(|v| weather(&v)).unwrap_or_default(),
        UiState::Error => {
            let message = state.error_message().unwrap_or_default();
            format!("! {message}\n")
        }
        UiState::Idle => welcome(),
    }
}

pub fn welcome() -> String {
    let mut out = String::new();
    out.push_str("☁ Ventra - Weather Experience\n\n");
    out.push_str("Discover weather like never before.\n");
    out.push_str("Real-time temperature, humidity, wind and visibility for any city.\n\n");
    out.push_str("Search for any city to get started (Esc to quit).\n");
    out
}

pub fn weather(view: &WeatherView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", view.location);
    let _ = writeln!(out, "{}  {}", view.date, view.time);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}  {}  {}   [{}]",
        icon_glyph(view.icon),
        view.temperature,
        view.description,
        view.background
    );
    let _ = writeln!(out);

    let details = [
        ("Feels Like", &view.feels_like),
        ("Humidity", &view.humidity),
        ("Wind Speed", &view.wind_speed),
        ("Visibility", &view.visibility),
        ("Min Temp", &view.temp_min),
        ("Max Temp", &view.temp_max),
    ];
    for (label, value) in details {
        let _ = writeln!(out, "  {label:<12}{value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use ventra_core::{ClockTick, SearchError, WeatherResult};

    fn state_at(hour: u32) -> AppState {
        let now = Local
            .with_ymd_and_hms(2026, 10, 16, hour, 15, 0)
            .earliest()
            .unwrap();
        AppState::new(ClockTick::at(now))
    }

    fn sample() -> WeatherResult {
        WeatherResult {
            location_name: "Reykjavik".into(),
            country: "IS".into(),
            temperature_c: -1.5,
            feels_like_c: -6.2,
            temp_min_c: -2.0,
            temp_max_c: 0.4,
            humidity_pct: 93,
            wind_speed_mps: 8.75,
            visibility_m: Some(4500),
            condition: "Snow".into(),
            description: "light snow".into(),
        }
    }

    #[test]
    fn idle_shows_welcome() {
        let screen = screen(&state_at(10));
        assert!(screen.contains("Ventra"));
        assert!(screen.contains("Search for any city"));
    }

    #[test]
    fn loading_shows_spinner_text() {
        let mut state = state_at(10);
        state.set_query("Reykjavik");
        state.begin_search();
        assert_eq!(screen(&state), "Fetching weather data...\n");
    }

    #[test]
    fn error_shows_message() {
        let mut state = state_at(10);
        state.finish_search(Err(SearchError::NotFound));
        assert_eq!(screen(&state), "! City not found. Please try again.\n");
    }

    #[test]
    fn populated_screen_lists_details() {
        let mut state = state_at(20);
        state.finish_search(Ok(sample()));
        let screen = screen(&state);

        assert!(screen.starts_with("Reykjavik, IS\n"));
        assert!(screen.contains("Friday, October 16, 2026  08:15 PM"));
        assert!(screen.contains("❄  -1°C  light snow   [cold]"));
        assert!(screen.contains("Feels Like  -6°C"));
        assert!(screen.contains("Humidity    93%"));
        assert!(screen.contains("Wind Speed  8.75 m/s"));
        assert!(screen.contains("Visibility  4.5 km"));
        assert!(screen.contains("Min Temp    -2°C"));
        assert!(screen.contains("Max Temp    0°C"));
    }
}
