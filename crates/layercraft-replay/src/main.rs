//! Replays recorded input against a design document.

mod runner;
mod script;

use clap::Parser;
use layercraft_core::{DesignDocument, EditorConfig, FileVersionStore};
use runner::{ReplayError, Runner};
use script::Script;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "layercraft-replay", version, about = "Replay recorded editor input against a design document")]
struct Cli {
    /// Script of input events and host actions (JSON)
    script: PathBuf,

    /// Starting document (JSON). Defaults to an empty frame.
    #[arg(short, long)]
    document: Option<PathBuf>,

    /// Editor configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save every commit as a version under this directory
    #[arg(long, value_name = "DIR", conflicts_with = "persist")]
    store: Option<PathBuf>,

    /// Save every commit as a version in the default data directory
    #[arg(long)]
    persist: bool,

    /// Campaign id used for saved versions
    #[arg(long, default_value = "replay")]
    campaign: String,

    /// Start from the campaign's latest saved version instead of --document
    #[arg(long)]
    restore: bool,

    /// Write the final document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn read_file(path: &Path) -> Result<String, ReplayError> {
    std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn run(cli: &Cli) -> Result<(), ReplayError> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let document = match &cli.document {
        Some(path) => DesignDocument::from_json(&read_file(path)?)?,
        None => DesignDocument::default(),
    };
    let script = Script::load(&cli.script)?;

    let store = match (&cli.store, cli.persist) {
        (Some(dir), _) => Some(FileVersionStore::new(dir.clone())?),
        (None, true) => Some(FileVersionStore::default_location()?),
        (None, false) => None,
    };

    let mut runner = Runner::new(document, config);
    if let Some(store) = store {
        log::info!("Saving versions of '{}' to {}", cli.campaign, store.base_path().display());
        runner.persist_to(Arc::new(store), &cli.campaign);
        if cli.restore {
            let version = runner.restore_latest()?;
            log::info!("Restored version {version}");
        }
    } else if cli.restore {
        log::warn!("--restore needs --store or --persist, ignoring");
    }

    let summary = runner.run(&script)?;
    log::info!(
        "Replayed {} steps: {} commits, {} versions saved",
        summary.steps,
        summary.commits,
        summary.versions_saved
    );

    let json = runner.editor().committed_document().to_json()?;
    match &cli.output {
        Some(path) => std::fs::write(path, json).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?,
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Replaying {}", cli.script.display());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
