//! Startup wiring shared by the server and the CLI

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use keiba_common::api::{ApiClient, HttpDataSource, MockDataSource, RaceDataSource};
use keiba_common::config::{ProviderConfig, ProviderKind};
use keiba_common::predictions::FileBackend;
use keiba_common::PredictionStore;
use tracing::info;

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins over the configured level.
pub fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Race data provider selected by config
pub fn build_source(config: &ProviderConfig) -> Result<Arc<dyn RaceDataSource>> {
    match config.kind {
        ProviderKind::Mock => {
            info!("Using built-in race data (mock provider)");
            Ok(Arc::new(
                MockDataSource::with_fixtures().with_latency(config.mock_latency()),
            ))
        }
        ProviderKind::Http => {
            let base_url = config
                .base_url
                .as_deref()
                .context("provider.base_url is not configured")?;
            let client = ApiClient::with_timeout(base_url, config.timeout())
                .with_context(|| format!("Invalid provider base URL {}", base_url))?;
            info!("Using race data provider at {}", base_url);
            Ok(Arc::new(HttpDataSource::new(client)))
        }
    }
}

/// File-backed prediction store under `root_folder`
pub fn open_store(root_folder: &Path, key: &str) -> Result<PredictionStore> {
    let backend = FileBackend::new(root_folder)
        .with_context(|| format!("Failed to initialize {}", root_folder.display()))?;
    info!("Prediction marks: {}", backend.path_for(key)?.display());
    Ok(PredictionStore::new(Arc::new(backend), key))
}
