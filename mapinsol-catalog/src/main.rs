//! mapinsol-catalog - JSON service over the best-practice CMS
//!
//! Configuration: CLI arguments > `MAPINSOL_*` environment > TOML file >
//! compiled defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mapinsol_catalog::cms::{CmsClient, CmsConfig};
use mapinsol_catalog::{build_router, AppState, Catalog};
use mapinsol_common::config::{ConfigResolver, TomlConfig};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for mapinsol-catalog
#[derive(Parser, Debug)]
#[command(name = "mapinsol-catalog")]
#[command(about = "Best-practice catalog service for the Mapinsol CMS")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "MAPINSOL_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// CMS REST root, e.g. https://example.org/wp-json/wp/v2
    #[arg(long)]
    cms_base_url: Option<String>,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: std::net::IpAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config resolution logs before the configured level is known
    let bootstrap = tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).finish();
    let mut config = tracing::subscriber::with_default(bootstrap, || {
        ConfigResolver::new(args.config.clone()).resolve()
    })
    .context("Failed to resolve configuration")?;

    apply_cli_overrides(&mut config, &args);
    config.validate().context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.logging.level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting mapinsol-catalog v{} (CMS: {})",
        env!("CARGO_PKG_VERSION"),
        config.cms_base_url()
    );
    info!(
        practices_secs = config.revalidate.practices_secs,
        taxonomies_secs = config.revalidate.taxonomies_secs,
        media_secs = config.revalidate.media_secs,
        "Revalidation intervals"
    );

    let client = CmsClient::new(CmsConfig::from(&config)).context("Failed to build CMS client")?;
    let catalog = Catalog::new(client, &config.revalidate);
    let app = build_router(AppState::new(catalog));

    let addr = SocketAddr::new(args.bind, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("mapinsol-catalog listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Command-line values win over everything else
fn apply_cli_overrides(config: &mut TomlConfig, args: &Args) {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(url) = &args.cms_base_url {
        config.cms_base_url = url.clone();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
