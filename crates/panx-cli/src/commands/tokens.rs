//! Tokens command - extract fields from a pipe-delimited OCR string.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use panx_core::extract::TokenExtractor;

use super::output::{emit, format_records, report_issues, OutputFormat};
use super::{load_config, read_input};

/// Arguments for the tokens command.
#[derive(Args)]
pub struct TokensArgs {
    /// Input text file holding the delimited string ("-" for stdin)
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Delimited string given directly
    #[arg(short, long)]
    text: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Exit with an error unless every field was found
    #[arg(long)]
    strict: bool,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

pub fn run(args: TokensArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let input = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            info!("Processing file: {}", path.display());
            read_input(path)?
        }
        (None, None) => anyhow::bail!("Either an input file or --text is required"),
    };

    let result = TokenExtractor::from_config(&config.tokens).extract(input.trim_end());

    for diagnostic in &result.diagnostics {
        eprintln!("{} {}", style("!").yellow(), diagnostic);
    }

    if args.strict && !result.is_complete() {
        anyhow::bail!("Extraction incomplete: {:?}", result.outcome());
    }

    if args.validate {
        report_issues(&result.record);
    }

    let content = format_records(std::slice::from_ref(&result.record), args.format)?;
    emit(&content, args.output.as_deref())
}
