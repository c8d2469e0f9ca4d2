//! Lines command - extract fields from OCR output with one region per line.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use panx_core::extract::LineExtractor;
use panx_core::models::config::LayoutMode;

use super::output::{emit, format_records, report_issues, OutputFormat};
use super::{load_config, read_input};

/// Arguments for the lines command.
#[derive(Args)]
pub struct LinesArgs {
    /// Input text file, one OCR region per line ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Locate fields by label lines instead of fixed offsets
    #[arg(long)]
    labeled: bool,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

pub fn run(args: LinesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());
    let text = read_input(&args.input)?;
    let lines: Vec<&str> = text.lines().collect();

    let mut extractor = LineExtractor::from_config(&config.lines);
    if args.labeled {
        extractor = extractor.with_layout_mode(LayoutMode::Labeled);
    }

    let table = extractor
        .extract(&lines)
        .map_err(|e| anyhow::anyhow!("Extraction failed: {}", e))?;

    if args.validate {
        for record in table.rows() {
            report_issues(record);
        }
    }

    let content = format_records(table.rows(), args.format)?;
    emit(&content, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
