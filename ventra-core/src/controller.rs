//! Search controller: owns the state and the provider, runs one search at a time.

use tracing::{info, warn};

use crate::{
    clock::ClockTick,
    error::SearchError,
    model::{WeatherRequest, WeatherResult},
    presentation::WeatherView,
    provider::WeatherProvider,
    state::{AppState, UiState},
};

#[derive(Debug)]
pub struct SearchController {
    provider: Box<dyn WeatherProvider>,
    state: AppState,
}

impl SearchController {
    pub fn new(provider: Box<dyn WeatherProvider>, tick: ClockTick) -> Self {
        Self {
            provider,
            state: AppState::new(tick),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn ui_state(&self) -> UiState {
        self.state.ui_state()
    }

    pub fn view(&self) -> Option<WeatherView> {
        self.state.view()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
    }

    pub fn apply_tick(&mut self, tick: ClockTick) {
        self.state.apply_tick(tick);
    }

    /// Starts a search if the query is not blank. The caller can render the loading
    /// state before awaiting [`SearchController::fetch`].
    pub fn begin_search(&mut self) -> Option<WeatherRequest> {
        self.state.begin_search()
    }

    pub async fn fetch(&self, request: &WeatherRequest) -> Result<WeatherResult, SearchError> {
        info!(city = %request.city, "searching");
        let outcome = self.provider.current_weather(request).await;
        match &outcome {
            Ok(weather) => info!(
                city = %request.city,
                location = %weather.location_name,
                temp = weather.temperature_c,
                "search succeeded"
            ),
            Err(SearchError::Network(cause)) => {
                warn!(city = %request.city, error = %cause, "search failed")
            }
            Err(err) => info!(city = %request.city, error = %err, "search rejected"),
        }
        outcome
    }

    pub fn finish_search(&mut self, outcome: Result<WeatherResult, SearchError>) {
        self.state.finish_search(outcome);
    }

    /// Runs a full search. Errors end up in the state, never in the return value.
    pub async fn search(&mut self) -> UiState {
        if let Some(request) = self.begin_search() {
            let outcome = self.fetch(&request).await;
            self.finish_search(outcome);
        }
        self.ui_state()
    }
}
