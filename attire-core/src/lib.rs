//! Core library for the `attire` service.
//!
//! This crate defines:
//! - The attire decision table (`engine`)
//! - Abstraction over weather providers and their HTTP clients
//! - The recommendation service and its HTTP router
//! - Configuration & credentials handling
//!
//! It is used by `attire-cli`, but can also be embedded in other binaries or services.

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod model;
pub mod provider;
pub mod service;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::{AttireError, LookupError};
pub use http::router;
pub use model::{AttireRecommendation, Jacket, Legwear, WeatherObservation};
pub use provider::{ProviderId, WeatherProvider};
pub use service::AttireService;
