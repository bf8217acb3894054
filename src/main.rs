//! TerraFlow backend gateway entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use terraflow_backend::api::{create_router, AppState};
use terraflow_backend::config::{Config, LogFormat};
use terraflow_backend::metrics;
use terraflow_backend::utils::shutdown_signal;

/// TerraFlow backend gateway.
#[derive(Parser, Debug)]
#[command(name = "terraflow-backend")]
#[command(about = "Liveness probe and origin-gated config relay for the TerraFlow dashboard")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        /// HTTP listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so LOG_FORMAT and RUST_LOG apply
    let config = Config::load()?;

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("terraflow_backend=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let json = config.log_format() == LogFormat::Json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TERRAFLOW BACKEND - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    let origins = config.allowed_origins();
    let firebase = config.firebase();

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Allowed Origins ({}):", origins.len());
    for origin in origins.iter() {
        println!("    - {}", origin);
    }
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("  Log Format: {}", config.log_format());
    println!("  Client credentials:");
    for (name, value) in [
        ("apiKey", &firebase.api_key),
        ("authDomain", &firebase.auth_domain),
        ("databaseURL", &firebase.database_url),
        ("projectId", &firebase.project_id),
        ("storageBucket", &firebase.storage_bucket),
        ("messagingSenderId", &firebase.messaging_sender_id),
        ("appId", &firebase.app_id),
    ] {
        println!("    {:<18} {}", name, if value.is_empty() { "(unset)" } else { "set" });
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn cmd_serve(config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    let mut config = config;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let mut app_state = AppState::new(&config);

    if app_state.origins.is_empty() {
        warn!("ALLOWED_ORIGINS has no usable entries; no origin will receive CORS headers");
    } else {
        info!(origins = ?app_state.origins.iter().collect::<Vec<_>>(), "Origin allowlist loaded");
    }

    if config.metrics_enabled {
        let handle = metrics::install_recorder()?;
        app_state = app_state.with_metrics(handle);
        info!("Metrics exposed on /metrics");
    }

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        e
    })?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
