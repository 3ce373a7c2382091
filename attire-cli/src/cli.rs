use anyhow::Context;
use attire_core::{
    AttireService, Config, ProviderConfig, ProviderId,
    provider::{self, DEFAULT_TIMEOUT_SECS},
};
use clap::{Parser, Subcommand};
use inquire::{
    Confirm, CustomType, Password, Text, error::CustomUserError, validator::Validation,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "attire", version, about = "What to wear for the weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the endpoint and credentials of a weather provider.
    Configure {
        /// Provider short name, e.g. "station" or "openweather".
        provider: String,
    },

    /// Serve `GET /v1/weather?location=<name>` over HTTP.
    Serve {
        /// Address to listen on; defaults to `server.bind_addr` from the config.
        #[arg(long)]
        bind: Option<String>,

        /// Provider to use instead of the configured default.
        #[arg(long)]
        provider: Option<String>,
    },

    /// Print the recommendation for a single location.
    Recommend {
        /// Location name.
        location: String,

        /// Provider to use instead of the configured default.
        #[arg(long)]
        provider: Option<String>,

        /// Print the JSON body served by `GET /v1/weather` instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => {
                let id = ProviderId::try_from(provider.as_str())?;
                let mut config = config_or_default(Config::load());
                configure(&mut config, id)?;
            }
            Command::Serve { bind, provider } => {
                let config = Config::load()?;
                let service = build_service(&config, provider.as_deref())?;
                let addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
                serve(service, &addr).await?;
            }
            Command::Recommend { location, provider, json } => {
                let config = Config::load()?;
                let service = build_service(&config, provider.as_deref())?;
                let recommendation = service.recommend(&location).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&recommendation)?);
                } else {
                    println!("{location}: {recommendation}");
                }
            }
        }

        Ok(())
    }
}

/// `configure` must still work when the stored config is unreadable, since it rewrites it.
fn config_or_default(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|e| {
        println!("Warning: ignoring existing configuration ({e:#}); it will be replaced.");
        Config::default()
    })
}

fn build_service(config: &Config, provider: Option<&str>) -> anyhow::Result<AttireService> {
    let boxed = match provider {
        Some(name) => provider::provider_from_config(ProviderId::try_from(name)?, config)?,
        None => provider::default_provider_from_config(config)?,
    };
    Ok(AttireService::from(boxed))
}

async fn serve(service: AttireService, addr: &str) -> anyhow::Result<()> {
    let app = attire_core::router(service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
    }
}

fn configure(config: &mut Config, id: ProviderId) -> anyhow::Result<()> {
    let existing = config.provider_config(id).cloned().unwrap_or_default();

    let api_key = if id.requires_api_key() {
        let key = Password::new(&format!("{id} API key:"))
            .without_confirmation()
            .prompt()?;
        Some(key.trim().to_string()).filter(|k| !k.is_empty())
    } else {
        existing.api_key.clone()
    };

    let default_url = existing
        .base_url
        .as_deref()
        .or_else(|| id.default_base_url())
        .unwrap_or_default();
    let base_url = Text::new("Base URL:").with_default(default_url).prompt()?;
    let base_url = Some(base_url.trim().to_string())
        .filter(|url| !url.is_empty() && Some(url.as_str()) != id.default_base_url());

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(
            existing.timeout_secs.filter(|secs| *secs > 0).unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
        .with_validator(validate_timeout)
        .prompt()?;

    config.upsert_provider(
        id,
        ProviderConfig { api_key, base_url, timeout_secs: Some(timeout_secs) },
    );

    if config.default_provider_id().ok() != Some(id)
        && Confirm::new(&format!("Make {id} the default provider?"))
            .with_default(false)
            .prompt()?
    {
        config.set_default_provider(id);
    }

    if !config.is_provider_configured(id) {
        println!("Warning: {id} is missing settings and cannot be used yet.");
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn validate_timeout(secs: &u64) -> Result<Validation, CustomUserError> {
    Ok(if *secs == 0 {
        Validation::Invalid("Timeout must be at least 1 second".into())
    } else {
        Validation::Valid
    })
}
