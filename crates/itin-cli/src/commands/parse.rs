//! Parse command - extract bookings from a single confirmation.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use itin_core::ImportParser;

use super::output::{format_items, OutputFormat};
use super::{load_config, parse_items, read_document, RecordKind};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Kind of booking to look for (default: all)
    #[arg(short, long, value_enum)]
    kind: Option<RecordKind>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the extracted text to stderr
    #[arg(long)]
    show_text: bool,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Parsing file: {}", args.input.display());
    let text = read_document(&args.input, &config)?;

    if args.show_text {
        eprintln!("{}", style("--- extracted text ---").dim());
        eprintln!("{}", text);
        eprintln!("{}", style("----------------------").dim());
    }

    let parser = ImportParser::from_config(&config.import);
    let items = parse_items(&parser, args.kind, &text);

    if items.is_empty() {
        eprintln!(
            "{} No bookings recognized in {}.",
            style("!").yellow(),
            args.input.display()
        );
        if !args.show_text {
            eprintln!("  Rerun with --show-text to inspect the extracted text, or enter the booking manually.");
        } else {
            eprintln!("  Enter the booking manually.");
        }
        return Ok(());
    }

    let output = format_items(&items, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let flagged = items.iter().filter(|i| !i.needs_review.is_empty()).count();
    if flagged > 0 {
        eprintln!(
            "{} {} of {} record(s) have fields to check",
            style("ℹ").blue(),
            flagged,
            items.len()
        );
    }

    debug!("Total parse time: {:?}", start.elapsed());

    Ok(())
}
