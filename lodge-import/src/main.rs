//! lodge-import - Property Import Service
//!
//! Imports nested JSON property documents into the lodge database, either
//! over HTTP (`serve`) or once from a file (`import`).

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lodge_common::config::{load_config, resolve_database_path, TomlConfig};
use lodge_common::db::init_database;
use lodge_common::events::EventBus;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use lodge_import::{AppState, PropertyImporter, SqliteStore};

/// Events buffered per SSE subscriber before it starts lagging
const EVENT_BUS_CAPACITY: usize = 100;

/// Command-line arguments for lodge-import
#[derive(Parser, Debug)]
#[command(name = "lodge-import")]
#[command(about = "Property import service for lodge")]
#[command(version)]
struct Cli {
    /// Config file (overrides LODGE_CONFIG and the per-user default)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides LODGE_DATABASE and the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP import service
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Import one document and print the result as JSON
    Import {
        /// Owning tenant id
        #[arg(long)]
        tenant: Uuid,

        /// Path to the JSON document
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path = resolve_database_path(cli.database.as_deref(), &config);
    info!("Database: {}", db_path.display());

    let db_pool = init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    match cli.command {
        Command::Serve { port } => serve(config, db_pool, port).await,
        Command::Import { tenant, file } => {
            let success = import_file(&config, db_pool, tenant, &file).await?;
            if !success {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

async fn serve(config: TomlConfig, db_pool: sqlx::SqlitePool, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.port);

    info!("Starting lodge-import (Property Import) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
    let state = AppState::new(db_pool, event_bus, config.import.max_listed_warnings);
    let app = lodge_import::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind_address, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// One-shot import; returns the `success` flag of the result
async fn import_file(
    config: &TomlConfig,
    db_pool: sqlx::SqlitePool,
    tenant_id: Uuid,
    file: &std::path::Path,
) -> Result<bool> {
    let raw = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let importer = PropertyImporter::new(SqliteStore::new(db_pool))
        .with_max_listed_warnings(config.import.max_listed_warnings);

    let result = importer.import(tenant_id, &raw).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(result.success)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
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
