//! Main entry point for the Quarry Exporter
//!
//! This is the production entry point that initializes and runs the
//! exporter with proper error handling, logging, and graceful shutdown.

use anyhow::Result;
use clap::Parser;
use quarry_exporter::collector::{Collector, MetricsServer};
use quarry_exporter::config::{AppConfig, WorldSettings};
use quarry_exporter::utils::until_next_daily;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Hour and minute (local time) at which the name cache is flushed
const FLUSH_HOUR: u32 = 1;
const FLUSH_MINUTE: u32 = 0;

/// Quarry Exporter - Minecraft server and player statistics for Prometheus
#[derive(Parser)]
#[command(
    name = "quarry-exporter",
    version,
    about = "A Prometheus exporter for Minecraft server and player statistics",
    long_about = "Quarry Exporter reads per-player world data (stats, playerdata, advancements, \
                 quest progress) and server-wide RCON state (tick timings, entity counts, online \
                 players, Dynmap render statistics), and exposes everything as labeled Prometheus \
                 counters on a pull-based /metrics endpoint."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Metrics port override
    #[arg(short, long, value_name = "PORT", help = "Override metrics server port")]
    port: Option<u16>,

    /// World root override
    #[arg(
        short,
        long,
        value_name = "DIR",
        help = "Override the world root directory (stats, playerdata, advancements, betterquesting)"
    )]
    world: Option<PathBuf>,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without starting the exporter"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display startup information
fn display_startup_banner(config: &AppConfig) {
    info!("Quarry Exporter {}", quarry_exporter::VERSION);
    info!("   Log level: {}", config.server.log_level);
    info!(
        "   Metrics: http://{}:{}/metrics",
        config.server.listen_host, config.server.listen_port
    );
    info!("   Stats dir: {}", config.world.stats_dir.display());
    match &config.rcon {
        Some(rcon) => info!("   RCON is enabled for {}", rcon.address()),
        None => info!("   RCON is disabled, server metrics will be skipped"),
    }
    info!(
        "   Integrations: forge={} dynmap={}",
        config.integrations.forge, config.integrations.dynmap
    );
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.server.log_level = log_level.clone();
    }
    if let Some(port) = args.port {
        config.server.listen_port = port;
    }
    if let Some(world) = &args.world {
        config.world = WorldSettings::from_root(Path::new(world));
    }

    Ok(config)
}

/// Flush the name cache once per day at the fixed wall-clock time
async fn cache_flush_task(collector: Arc<Mutex<Collector>>) {
    loop {
        tokio::time::sleep(until_next_daily(FLUSH_HOUR, FLUSH_MINUTE)).await;
        collector.lock().await.flush_names();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.server.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without starting the exporter");
        return Ok(());
    }

    let collector = match Collector::from_config(&config) {
        Ok(collector) => Arc::new(Mutex::new(collector)),
        Err(e) => {
            error!("Failed to initialize collector: {}", e);
            std::process::exit(1);
        }
    };

    let flush_task = tokio::spawn(cache_flush_task(collector.clone()));

    let server = Arc::new(MetricsServer::new(
        config.server.listen_host.clone(),
        config.server.listen_port,
        collector,
    ));
    let server_task = {
        let server = server.clone();
        tokio::spawn(async move {
            if let Err(e) = server.start().await {
                error!("Metrics server failed: {}", e);
            }
        })
    };

    wait_for_shutdown_signal().await;

    info!("Shutdown signal received, stopping exporter...");
    flush_task.abort();
    server.stop();
    let _ = server_task.await;

    info!("Quarry Exporter stopped");
    Ok(())
}
