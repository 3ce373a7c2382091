use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{LookupError, WeatherObservation};

use super::{WeatherProvider, fetch_json};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const PROVIDER: &str = "openweather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, http: Client) -> Self {
        Self { api_key, base_url, http }
    }

    fn current_weather_url(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, location: &str) -> Result<WeatherObservation, LookupError> {
        let url = self.current_weather_url();
        tracing::debug!(provider = PROVIDER, location, url = %url, "requesting weather");

        let request = self.http.get(url).query(&[
            ("q", location),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ]);
        let parsed: OwCurrentResponse = fetch_json(PROVIDER, request).await?;

        // OpenWeather lists the primary condition group first.
        let condition = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .filter(|main| !main.is_empty())
            .ok_or(LookupError::MissingData { provider: PROVIDER })?;

        Ok(WeatherObservation::new(condition, parsed.main.temp))
    }
}
