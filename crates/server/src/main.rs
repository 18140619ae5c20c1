use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use beamdrop_core::TokenSigner;
use beamdrop_server::api::AppState;
use beamdrop_server::config::BeamdropConfig;
use beamdrop_store::SpoolStore;

/// Environment variable holding the token signing secret. Takes precedence
/// over the config file value.
const SECRET_ENV: &str = "BEAMDROP_TOKEN_SECRET";

/// Beamdrop LAN file handoff server.
#[derive(Parser, Debug)]
#[command(name = "beamdrop-server", about = "QR-linked, token-gated file handoff over the LAN")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "beamdrop.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber from RUST_LOG or default to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration from the TOML file, or use defaults if it is absent.
    let config: BeamdropConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        info!(path = %cli.config, "config file not found, using defaults");
        BeamdropConfig::default()
    };

    // Resolve the signing secret: environment, then config, then a random
    // per-process value.
    let secret = match std::env::var(SECRET_ENV) {
        Ok(s) if !s.is_empty() => s,
        _ => config.token.secret.clone().unwrap_or_else(|| {
            warn!(
                "no signing secret configured; generated a random one, \
                 outstanding links will not survive a restart"
            );
            format!(
                "{}{}",
                uuid::Uuid::new_v4().simple(),
                uuid::Uuid::new_v4().simple()
            )
        }),
    };

    let signer = match &config.token.previous_secret {
        Some(previous) => TokenSigner::with_previous(&secret, previous),
        None => TokenSigner::new(&secret),
    };

    let store = SpoolStore::open(&config.storage.spool_dir)?;
    info!(spool_dir = %store.root().display(), "spool directory ready");

    let state = AppState {
        signer: Arc::new(signer),
        store: Arc::new(store),
        public_port: cli.port.unwrap_or(config.server.port),
        external_url: config.server.external_url.clone(),
        max_upload_bytes: config.server.max_upload_bytes,
    };
    let app = beamdrop_server::api::router(state);

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "beamdrop-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("beamdrop-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
