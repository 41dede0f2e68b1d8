use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{write_json, OutputFormat};
use crate::matching::audit::{audit, audit_findings, AuditFinding};
use crate::parsing::reports::parse_reports_text;

#[derive(Args)]
pub struct AuditArgs {
    /// Annotated reports, as written by `annotate`
    #[arg(required = true)]
    pub input: PathBuf,

    /// Write the flagged reports to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute audit subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the output
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AuditArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let reports = parse_reports_text(&text)
        .with_context(|| format!("Invalid annotated reports in {}", args.input.display()))?;

    if verbose {
        eprintln!("Auditing {} reports", reports.len());
    }

    let findings = audit_findings(&reports);

    if let Some(output) = &args.output {
        write_json(output, &audit(&reports))?;
    }

    match format {
        OutputFormat::Text => print_text_findings(&args, reports.len(), &findings),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input": args.input.display().to_string(),
                "reports": reports.len(),
                "flagged": findings.len(),
                "findings": findings,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("index\taccessions");
            for finding in &findings {
                println!("{}\t{}", finding.index, finding.accessions.join(","));
            }
        }
    }

    Ok(())
}

fn print_text_findings(args: &AuditArgs, total: usize, findings: &[AuditFinding]) {
    println!("Audit Results");
    println!("{}", "=".repeat(60));
    println!("\nInput: {}", args.input.display());
    println!("  Reports: {total}");
    println!("  Unmatched citing ClinVar: {}", findings.len());

    if findings.is_empty() {
        return;
    }

    println!();
    for finding in findings {
        if finding.accessions.is_empty() {
            println!("  #{}", finding.index);
        } else {
            println!("  #{}: {}", finding.index, finding.accessions.join(", "));
        }
    }
}
