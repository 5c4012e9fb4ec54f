//! Persist Preference Editor
//!
//! Console inspector for the game's stored preferences

mod command;
mod session;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use persist_registry::{game, Registry};
use persist_store::JsonFileStore;
use session::Session;
use settings::EditorSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "persist-editor")]
#[command(about = "Browse and edit stored game preferences")]
#[command(version)]
struct Cli {
    /// Preference file (defaults to the platform config directory)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Editor settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("Persist Editor v{}", persist_registry::VERSION);

    let settings = match &cli.config {
        Some(path) => EditorSettings::load(path)?,
        None => EditorSettings::default(),
    };

    let store_path = cli
        .store
        .or(settings.store_path)
        .unwrap_or_else(JsonFileStore::default_path);
    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("failed to open {}", store_path.display()))?;
    tracing::info!("Editing {}", store_path.display());

    let registry = Registry::with_config(game::schema().clone(), store, settings.registry);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(registry, stdin.lock(), stdout.lock());
    session.run()?;

    if session.into_registry().store().is_dirty() {
        tracing::warn!("exiting with unsaved store writes");
    }

    Ok(())
}
