use crate::{
    Config,
    model::{WeatherCollection, WeatherQuery},
    provider::tomorrow::TomorrowProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod tomorrow;

/// Mode of a single outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Current,
    Forecast,
    Historical,
}

/// A provider adapter turning queries into canonical weather collections.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &WeatherQuery) -> anyhow::Result<WeatherCollection>;

    async fn forecast_weather(&self, query: &WeatherQuery) -> anyhow::Result<WeatherCollection>;

    /// Historical readings around `query.when`. A query without a timestamp
    /// builds a request lacking `startTime`; the vendor may reject it, which
    /// surfaces as a transport failure.
    async fn historical_weather(&self, query: &WeatherQuery) -> anyhow::Result<WeatherCollection>;
}

/// Construct the Tomorrow.io provider from on-disk config.
pub fn tomorrow_from_config(config: &Config) -> anyhow::Result<TomorrowProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for tomorrow.io.\n\
             Hint: add `api_key` under `[tomorrow]` in the config file."
        )
    })?;

    Ok(TomorrowProvider::new(api_key.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tomorrow_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = tomorrow_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn tomorrow_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(tomorrow_from_config(&cfg).is_ok());
    }
}
