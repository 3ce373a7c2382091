use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{LookupError, WeatherObservation};

use super::{WeatherProvider, fetch_json};

const PROVIDER: &str = "station";

/// Client for a weather station service answering `GET <base_url>?location=<name>`.
#[derive(Debug, Clone)]
pub struct StationProvider {
    base_url: String,
    http: Client,
}

impl StationProvider {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct StationReport {
    main: String,
    location: Option<String>,
    temp_min: f64,
    temp_max: f64,
}

impl StationReport {
    // The station's own temperature figure; kept exactly as the upstream defines it.
    fn temperature(&self) -> f64 {
        (self.temp_min / self.temp_max) * 100.0
    }

    fn into_observation(self) -> Result<WeatherObservation, LookupError> {
        if self.main.is_empty() {
            return Err(LookupError::MissingData { provider: PROVIDER });
        }

        let temperature = self.temperature();
        if !temperature.is_finite() {
            return Err(LookupError::InvalidTemperature { provider: PROVIDER });
        }

        Ok(WeatherObservation::new(self.main, temperature))
    }
}

#[async_trait]
impl WeatherProvider for StationProvider {
    async fn get_weather(&self, location: &str) -> Result<WeatherObservation, LookupError> {
        tracing::debug!(provider = PROVIDER, location, url = %self.base_url, "requesting weather");

        let request = self.http.get(&self.base_url).query(&[("location", location)]);
        let report: StationReport = fetch_json(PROVIDER, request).await?;

        if let Some(reported) = &report.location {
            tracing::debug!(provider = PROVIDER, reported = %reported, "station resolved location");
        }

        report.into_observation()
    }
}
