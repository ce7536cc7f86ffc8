use std::{error::Error as StdError, sync::Arc};

use thiserror::Error;

/// Failures of a city search. Each variant displays as the message shown to the user.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("City not found. Please try again.")]
    NotFound,

    #[error("Please enter a valid city name.")]
    BadRequest,

    /// Transport failure, unreadable body, or an unexpected provider status.
    /// The cause is kept as the error source and never shown in place of the message.
    #[error("Failed to fetch weather data. Please check your internet connection.")]
    Network(#[source] Arc<dyn StdError + Send + Sync>),
}

impl SearchError {
    pub fn network<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Network(Arc::new(cause))
    }
}

/// Errors compare by kind; network causes are not compared.
impl PartialEq for SearchError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Eq for SearchError {}
