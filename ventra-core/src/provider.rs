use crate::{
    Config, SearchError, WeatherRequest, WeatherResult,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current weather conditions.
///
/// Implementations fold every failure into [`SearchError`]; nothing else escapes a search.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherResult, SearchError>;
}

/// Values from the command line or the environment; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ProviderOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Construct the OpenWeather provider from config, applying overrides.
pub fn provider_from_config(
    config: &Config,
    overrides: &ProviderOverrides,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = overrides
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| config.api_key())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No API key configured.\n\
                 Hint: run `ventra configure` or set VENTRA_API_KEY."
            )
        })?;

    let base_url = overrides
        .base_url
        .clone()
        .unwrap_or_else(|| config.base_url.clone());

    Ok(Box::new(OpenWeatherProvider::with_base_url(
        api_key.to_owned(),
        base_url,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg, &ProviderOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("ventra configure"));
    }

    #[test]
    fn blank_override_does_not_count_as_key() {
        let cfg = Config::default();
        let overrides = ProviderOverrides {
            api_key: Some("   ".into()),
            base_url: None,
        };
        assert!(provider_from_config(&cfg, &overrides).is_err());
    }

    #[test]
    fn provider_from_config_works_when_key_is_stored() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg, &ProviderOverrides::default());
        assert!(provider.is_ok());
    }

    #[test]
    fn override_key_is_enough_without_config() {
        let cfg = Config::default();
        let overrides = ProviderOverrides {
            api_key: Some("FROM_ENV".into()),
            base_url: Some("http://localhost:9000".into()),
        };

        let provider =
            provider_from_config(&cfg, &overrides).expect("override key should be used");
        let debug = format!("{provider:?}");
        assert!(debug.contains("http://localhost:9000"));
    }
}
