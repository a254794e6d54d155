//! Subcommands and the input handling they share.

pub mod batch;
pub mod config;
pub mod import;
pub mod output;
pub mod parse;

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use itin_core::models::config::ItinConfig;
use itin_core::pdf::{PdfExtractor, PdfProcessor, PdfType};
use itin_core::{ImportParser, PreviewItem, PreviewRecord};

/// Which records to look for in a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordKind {
    /// Flight segments
    Flight,
    /// Hotel stays
    Lodging,
    /// Bus and train legs
    Ground,
    /// Car rentals
    Car,
    /// Bus/train legs and car rentals
    Transportation,
}

/// Load the configuration file, or defaults when no path is given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ItinConfig> {
    let config = match config_path {
        Some(path) => ItinConfig::from_file(Path::new(path))?,
        None => ItinConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Text of a confirmation: the text layer of a PDF, or the file itself.
///
/// A PDF without usable text yields an empty string so the caller can fall
/// back to manual entry.
pub fn read_document(path: &Path, config: &ItinConfig) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "pdf" {
        return Ok(fs::read_to_string(path)?);
    }

    let data = fs::read(path)?;
    let mut extractor = PdfExtractor::new().with_min_text_length(config.pdf.min_text_length);
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    let content = extractor.extract_all()?;
    if content.pdf_type == PdfType::Empty {
        warn!(
            "{} has no usable text layer (scanned document?)",
            path.display()
        );
        return Ok(String::new());
    }

    Ok(content.text)
}

/// Parse `text` for the requested kind, or for every kind when `None`.
pub fn parse_items(parser: &ImportParser, kind: Option<RecordKind>, text: &str) -> Vec<PreviewItem> {
    let wants = |k: RecordKind| kind.is_none() || kind == Some(k);

    let mut records = Vec::new();
    if wants(RecordKind::Flight) {
        records.extend(parser.parse_flights(text).into_iter().map(PreviewRecord::Flight));
    }
    if wants(RecordKind::Lodging) {
        records.extend(parser.parse_lodging(text).into_iter().map(PreviewRecord::Lodging));
    }
    if wants(RecordKind::Ground) || kind == Some(RecordKind::Transportation) {
        records.extend(
            parser
                .parse_ground_transport(text)
                .into_iter()
                .map(PreviewRecord::GroundTransport),
        );
    }
    if wants(RecordKind::Car) || kind == Some(RecordKind::Transportation) {
        records.extend(
            parser
                .parse_car_rentals(text)
                .into_iter()
                .map(PreviewRecord::CarRental),
        );
    }

    records.into_iter().map(PreviewItem::new).collect()
}
