//! Explicit UI state with pure transitions.

use chrono::{DateTime, Local};

use crate::{
    clock::ClockTick,
    error::SearchError,
    model::{WeatherRequest, WeatherResult},
    presentation::{Background, WeatherView},
};

/// Presentation mode derived from [`AppState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    /// Nothing to show yet: the welcome screen.
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub query: String,
    pub weather: Option<WeatherResult>,
    pub loading: bool,
    pub error: Option<SearchError>,
    pub is_night: bool,
    /// Time of the last clock tick.
    pub now: DateTime<Local>,
}

impl AppState {
    pub fn new(tick: ClockTick) -> Self {
        Self {
            query: String::new(),
            weather: None,
            loading: false,
            error: None,
            is_night: tick.is_night,
            now: tick.now,
        }
    }

    pub fn ui_state(&self) -> UiState {
        if self.loading {
            UiState::Loading
        } else if self.weather.is_some() {
            UiState::Success
        } else if self.error.is_some() {
            UiState::Error
        } else {
            UiState::Idle
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// A search needs a non-blank query. Returns the request to issue, or `None` with the
    /// state left untouched.
    pub fn begin_search(&mut self) -> Option<WeatherRequest> {
        let city = self.query.trim();
        if city.is_empty() {
            return None;
        }

        let request = WeatherRequest::new(city);
        self.loading = true;
        self.error = None;
        Some(request)
    }

    /// Apply the outcome of a request. Every failure clears the previous result.
    pub fn finish_search(&mut self, outcome: Result<WeatherResult, SearchError>) {
        self.loading = false;
        match outcome {
            Ok(weather) => {
                self.weather = Some(weather);
                self.error = None;
                self.query.clear();
            }
            Err(err) => {
                self.weather = None;
                self.error = Some(err);
            }
        }
    }

    pub fn apply_tick(&mut self, tick: ClockTick) {
        self.is_night = tick.is_night;
        self.now = tick.now;
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn background(&self) -> Background {
        Background::for_weather(self.weather.as_ref())
    }

    pub fn view(&self) -> Option<WeatherView> {
        self.weather
            .as_ref()
            .map(|w| WeatherView::new(w, self.is_night, &self.now))
    }
}
