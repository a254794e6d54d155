//! Import command - preview a confirmation and save its records into a trip.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{info, warn};

use itin_core::models::entities::Trip;
use itin_core::{ImportCategory, ImportOrchestrator, JsonStore, RecordStore, StoreError};

use super::output::{format_items, OutputFormat};
use super::{load_config, read_document};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ImportKind {
    /// Flight segments
    Flight,
    /// Hotel stays
    Lodging,
    /// Bus/train legs and car rentals
    Transportation,
}

impl From<ImportKind> for ImportCategory {
    fn from(kind: ImportKind) -> Self {
        match kind {
            ImportKind::Flight => ImportCategory::Flight,
            ImportKind::Lodging => ImportCategory::Lodging,
            ImportKind::Transportation => ImportCategory::Transportation,
        }
    }
}

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// What the document contains
    #[arg(short, long, value_enum)]
    kind: ImportKind,

    /// Trip the records belong to
    #[arg(short, long)]
    trip: String,

    /// Record store file (default: from config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Save without asking; otherwise only the preview is shown
    #[arg(short, long)]
    yes: bool,

    /// Print the extracted text to stderr
    #[arg(long)]
    show_text: bool,
}

pub fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let text = read_document(&args.input, &config)?;

    if args.show_text {
        eprintln!("{}", style("--- extracted text ---").dim());
        eprintln!("{}", text);
        eprintln!("{}", style("----------------------").dim());
    }

    let orchestrator = ImportOrchestrator::from_config(&config);
    let preview = orchestrator.preview(args.kind.into(), &text);

    if preview.is_empty() {
        eprintln!(
            "{} No {} bookings recognized in {}. Enter the booking manually.",
            style("!").yellow(),
            preview.category.as_str(),
            args.input.display()
        );
        return Ok(());
    }

    println!("{}", format_items(&preview.items, OutputFormat::Text)?);

    if !args.yes {
        println!(
            "{} Preview only: rerun with --yes to save {} record(s) into trip {}",
            style("ℹ").blue(),
            preview.len(),
            args.trip
        );
        return Ok(());
    }

    let store_path = args
        .store
        .unwrap_or_else(|| resolve_store_path(&config.store.path));
    let mut store = JsonStore::open(&store_path)?;
    info!("Using record store {}", store_path.display());

    match store.get::<Trip>(args.trip.trim()) {
        Ok(_) => {}
        Err(StoreError::NotFound { .. }) => {
            warn!("Trip {} does not exist in {}", args.trip, store_path.display());
        }
        Err(e) => return Err(e.into()),
    }

    let summary = orchestrator.commit(&preview, &args.trip, &mut store)?;

    println!(
        "{} Saved {} record(s) into trip {}",
        style("✓").green(),
        summary.total(),
        summary.trip_id
    );
    for (label, ids) in [
        ("flights", &summary.flights),
        ("lodging", &summary.lodging),
        ("ground transport", &summary.ground_transport),
        ("car rentals", &summary.car_rentals),
    ] {
        if !ids.is_empty() {
            println!("  {}: {}", label, ids.join(", "));
        }
    }

    Ok(())
}

/// Relative store paths from the config live in the user data directory.
fn resolve_store_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("itin")
        .join(path)
}
