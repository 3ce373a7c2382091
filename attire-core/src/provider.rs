use crate::{
    Config, LookupError, WeatherObservation,
    provider::{openweather::OpenWeatherProvider, station::StationProvider},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod openweather;
pub mod station;

/// Request timeout used when a provider has none configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Station,
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Station => "station",
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Station, ProviderId::OpenWeather]
    }

    /// Base URL used when the config does not set one.
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            ProviderId::Station => None,
            ProviderId::OpenWeather => Some(openweather::DEFAULT_BASE_URL),
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderId::OpenWeather)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "station" => Ok(ProviderId::Station),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: station, openweather."
            )),
        }
    }
}

/// Looks up the current weather for a named location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, location: &str) -> Result<WeatherObservation, LookupError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider_config = config.provider_config(id);

    let base_url = provider_config
        .and_then(|cfg| cfg.base_url.as_deref())
        .or_else(|| id.default_base_url())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No base URL configured for provider '{id}'.\n\
                     Hint: run `attire configure {id}` and enter the upstream URL."
            )
        })?;

    let http = build_client(config.provider_timeout(id))?;

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::Station => Box::new(StationProvider::new(base_url.to_owned(), http)),
        ProviderId::OpenWeather => {
            let api_key = config.provider_api_key(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                         Hint: run `attire configure {id}` and enter your API key."
                )
            })?;
            Box::new(OpenWeatherProvider::new(api_key.to_owned(), base_url.to_owned(), http))
        }
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("attire/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// Sends `request` and decodes a successful JSON answer.
async fn fetch_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, LookupError> {
    let res = request
        .send()
        .await
        .map_err(|source| LookupError::Request { provider, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| LookupError::Request { provider, source })?;

    if !status.is_success() {
        return Err(LookupError::Status { provider, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|source| LookupError::Decode { provider, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ProviderConfig};

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn provider_id_parsing_ignores_case() {
        assert_eq!(ProviderId::try_from("OpenWeather").unwrap(), ProviderId::OpenWeather);
        assert_eq!(ProviderId::try_from("STATION").unwrap(), ProviderId::Station);
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn station_without_base_url_is_rejected() {
        let cfg = Config::default();
        let err = provider_from_config(ProviderId::Station, &cfg).unwrap_err();
        assert!(err.to_string().contains("No base URL configured for provider 'station'"));
    }

    #[test]
    fn openweather_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(ProviderId::OpenWeather, &cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider"));
    }

    #[test]
    fn openweather_uses_default_base_url() {
        let mut cfg = Config::default();
        cfg.upsert_provider(
            ProviderId::OpenWeather,
            ProviderConfig { api_key: Some("KEY".into()), ..Default::default() },
        );
        assert!(provider_from_config(ProviderId::OpenWeather, &cfg).is_ok());
    }

    #[test]
    fn default_provider_from_config_errors_when_not_set() {
        let cfg = Config::default();
        let err = default_provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No default provider configured"));
        assert!(msg.contains("Hint: run `attire configure"));
    }

    #[test]
    fn default_provider_from_config_works_when_set_and_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider(
            ProviderId::Station,
            ProviderConfig {
                base_url: Some("http://localhost:9000/weather".into()),
                ..Default::default()
            },
        );

        let provider = default_provider_from_config(&cfg);
        assert!(provider.is_ok());
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundaries() {
        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
