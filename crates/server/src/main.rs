use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use pictor_blob_fs::FsBlobStore;
use pictor_server::api::AppState;
use pictor_server::config::PictorConfig;

/// Pictor image service HTTP server.
#[derive(Parser, Debug)]
#[command(name = "pictor-server", about = "HTTP server for the Pictor image service")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "pictor.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run database migrations for the configured index backend, then exit.
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config: PictorConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        info!(path = %cli.config, "config file not found, using defaults");
        toml::from_str("")?
    };

    if let Some(Commands::Migrate) = cli.command {
        return run_migrate(&config).await;
    }

    // Create the metadata index backend.
    let index = pictor_server::index_factory::create_index(&config.index).await?;
    info!(backend = %config.index.backend, "metadata index initialized");

    // Create the filesystem blob store (creates the storage root if absent).
    let blob = FsBlobStore::new(&config.storage.root).await?;
    info!(root = %config.storage.root, "blob store initialized");

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let public_url = config
        .server
        .public_url
        .clone()
        .unwrap_or_else(|| format!("http://{host}:{port}"));

    let state = AppState {
        blob: Arc::new(blob),
        index,
        policy: config.storage.upload_policy(),
        public_url,
        uploads_dir: Some(config.storage.root.clone()),
    };
    let app = pictor_server::api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "pictor-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("pictor-server shut down");
    Ok(())
}

/// Run the `migrate` subcommand: initialize the index schema and exit.
async fn run_migrate(config: &PictorConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(backend = %config.index.backend, "running index backend migrations...");
    let _index = pictor_server::index_factory::create_index(&config.index).await?;
    info!(backend = %config.index.backend, "index backend migrations complete");
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
