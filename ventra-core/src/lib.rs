//! Core library for the `ventra` weather lookup.
//!
//! This crate defines:
//! - The OpenWeather provider behind the [`WeatherProvider`] trait
//! - The search controller and its explicit UI state
//! - Pure presentation mapping (icons, background buckets, display strings)
//! - The day/night ticker
//! - Configuration & credentials handling
//!
//! It is used by `ventra-cli`, but any front end can drive the controller.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod state;

pub use clock::{Clock, ClockTick, DayNightTicker, SystemClock, TICK_PERIOD};
pub use config::Config;
pub use controller::SearchController;
pub use error::SearchError;
pub use model::{WeatherRequest, WeatherResult};
pub use presentation::{Background, Icon, WeatherView};
pub use provider::{ProviderOverrides, WeatherProvider, provider_from_config};
pub use state::{AppState, UiState};
