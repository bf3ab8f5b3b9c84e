pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod view;

use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use clients::ApiClient;
pub use config::Config;
use db::Store;
use services::RecordStore;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Runs the CLI with the config `main` loaded from `source`.
pub async fn run(config: Config, source: Option<PathBuf>) -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&config);
    match &source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    match cli.command {
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
        Some(Commands::Serve) => run_server(config).await,
        Some(Commands::List(args)) => cli::cmd_list(&config, &args).await,
        Some(Commands::Add(fields)) => cli::cmd_add(&config, &fields).await,
        Some(Commands::Edit { id, fields }) => cli::cmd_edit(&config, &id, &fields).await,
        Some(Commands::Remove { id, yes }) => cli::cmd_remove(&config, &id, yes).await,
        Some(Commands::Init) => cli::cmd_init(),
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    // stdout belongs to command output
    let registry = tracing_subscriber::registry().with(env_filter);
    if config.general.log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Opens the store CLI commands work against: the remote server when
/// `client.remote_url` is set, the local database otherwise.
pub async fn open_store(config: &Config) -> anyhow::Result<Box<dyn RecordStore>> {
    if let Some(remote) = &config.client.remote_url {
        let client = ApiClient::new(
            remote,
            Duration::from_secs(config.client.request_timeout_seconds),
        )?;
        debug!("Using remote store at {}", client.base_url());
        return Ok(Box::new(client));
    }

    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    Ok(Box::new(store))
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    if !config.server.enabled {
        warn!("Server is disabled in config ([server] enabled = false)");
        return Ok(());
    }

    info!("watchlog v{} starting server...", env!("CARGO_PKG_VERSION"));

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(state).await;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let server_handle = tokio::spawn(async move {
        info!("🌐 API running at http://{}", addr);
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    info!("Server running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}
