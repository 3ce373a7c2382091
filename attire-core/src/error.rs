use thiserror::Error;

/// A weather source could not produce an observation for a location.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request to {provider} failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} answered with status {status}: {body}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse {provider} response: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} response has no weather condition")]
    MissingData { provider: &'static str },

    #[error("{provider} produced a non-finite temperature")]
    InvalidTemperature { provider: &'static str },
}

/// Failure of a recommendation request.
#[derive(Debug, Error)]
pub enum AttireError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}
