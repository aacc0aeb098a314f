//! keiba-web - race browser HTTP service
//!
//! Serves meetings, race cards, training data and horse search from the
//! configured race data provider, and persists prediction marks under the
//! root folder.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use keiba_common::config::{resolve_root_folder, TomlConfig};
use keiba_web::bootstrap::{build_source, init_tracing, open_store};
use keiba_web::{build_router, AppState};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "keiba-web", version, about = "Race browser HTTP service")]
struct Args {
    /// Config file (defaults to <config dir>/keiba/config.toml)
    #[arg(long, env = "KEIBA_CONFIG")]
    config: Option<PathBuf>,

    /// Folder holding persisted prediction marks
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Port (overrides config)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load_or_default(args.config.as_deref());

    init_tracing(&config.logging.level);

    info!(
        "Starting keiba-web v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    info!("Root folder: {}", root_folder.display());

    let predictions = open_store(&root_folder, &config.predictions.key)?;
    let source = build_source(&config.provider)?;

    let state = AppState::new(source, predictions);
    let app = build_router(state);

    let bind = args.bind.unwrap_or(config.bind);
    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("keiba-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
