//! Output formatting shared by the extraction commands.

use std::fs;
use std::path::Path;

use console::style;

use panx_core::models::record::{IdentityRecord, COLUMNS};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_records(records: &[IdentityRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => match records {
            [record] => Ok(serde_json::to_string(record)?),
            _ => Ok(serde_json::to_string(records)?),
        },
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(records
            .iter()
            .map(format_text)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn format_csv(records: &[IdentityRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.write_record(record.to_row())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &IdentityRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("ID Type:        {}\n", record.id_type));
    output.push_str(&format!("ID:             {}\n", record.id));
    output.push_str(&format!("Name:           {}\n", record.name));
    output.push_str(&format!("Father's Name:  {}\n", record.father_name));
    output.push_str(&format!("DOB:            {}\n", record.dob));

    output
}

/// Write to `output` if given, otherwise print.
pub fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(output_path) = output {
        fs::write(output_path, content)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content.trim_end());
    }
    Ok(())
}

/// Print record validation issues to stderr.
pub fn report_issues(record: &IdentityRecord) {
    let issues = record.validate();
    if !issues.is_empty() {
        eprintln!("{}", style("Validation issues:").yellow());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
    }
}
