use std::sync::Arc;

use crate::{AttireError, AttireRecommendation, WeatherProvider, engine};

/// Looks up the weather for a location and turns it into an attire recommendation.
#[derive(Debug, Clone)]
pub struct AttireService {
    provider: Arc<dyn WeatherProvider>,
}

impl AttireService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Blank locations are rejected before the provider is asked; provider
    /// failures are returned as-is.
    pub async fn recommend(&self, location: &str) -> Result<AttireRecommendation, AttireError> {
        if location.trim().is_empty() {
            return Err(AttireError::BadRequest("location must not be empty".into()));
        }

        let observation = self.provider.get_weather(location).await.inspect_err(|e| {
            tracing::warn!(location, error = %e, "weather lookup failed");
        })?;

        let recommendation = engine::recommend(&observation);
        tracing::debug!(
            location,
            condition = %observation.condition,
            temperature = observation.temperature,
            ?recommendation,
            "recommendation ready"
        );

        Ok(recommendation)
    }
}

impl From<Box<dyn WeatherProvider>> for AttireService {
    fn from(provider: Box<dyn WeatherProvider>) -> Self {
        Self::new(Arc::from(provider))
    }
}
