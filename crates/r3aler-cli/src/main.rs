//! r3aler: terminal front-end for the R3ÆLƎR AI chat client.
//!
//! Runs the session controller in typed-only mode: no speech adapters are
//! injected, so voice commands report themselves unavailable.

mod cli;
mod repl;
mod settings;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use r3aler_client::{FileTokenStore, HttpBackend, SessionController};
use r3aler_common::{ConfigError, R3alerError};
use r3aler_config::R3alerConfig;

fn load_config(args: &cli::Args) -> (R3alerConfig, Option<ConfigError>) {
    let loaded = match &args.config {
        Some(path) => r3aler_config::load_config_from(path),
        None => r3aler_config::load_config(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (R3alerConfig::default(), Some(e)),
    }
}

fn init_logging(args: &cli::Args, config: &R3alerConfig) {
    let filter = match args.log_level.as_deref() {
        Some(directive) => EnvFilter::try_new(directive)
            .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_filter())),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_filter())),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: cli::Args, config: R3alerConfig) -> Result<(), R3alerError> {
    let backend = HttpBackend::new(settings::backend_config(&config, args.base_url.as_deref()))?;
    let store = FileTokenStore::new(settings::token_path(&config)?);
    tracing::info!(path = %store.path().display(), "using token store");

    let controller = Arc::new(
        SessionController::new(Arc::new(backend), Arc::new(store))
            .with_options(settings::controller_options(&config)),
    );
    let printer = repl::spawn_transcript_printer(controller.subscribe());

    if controller.restore_session().await.is_some() {
        println!("session restored");
    } else {
        println!("not signed in; use /login <user> <pass>");
    }

    repl::run(Arc::clone(&controller))
        .await
        .map_err(|e| R3alerError::Other(format!("stdin: {e}")))?;

    printer.abort();
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    let (config, config_error) = load_config(&args);
    init_logging(&args, &config);

    tracing::info!("r3aler v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if let Err(e) = run(args, config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
