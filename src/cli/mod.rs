//! Command-line interface for clinvar-match.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Match a directory of variant reports against a ClinVar VCF
//! - **audit**: Re-run the recall audit on a previously annotated file
//!
//! ## Usage
//!
//! ```text
//! # Annotate reports and write both output files
//! clinvar-match annotate --clinvar clinvar.vcf.gz --variants ./variant_data
//!
//! # Machine-readable run summary
//! clinvar-match annotate --clinvar clinvar.vcf.gz --variants ./variant_data --format json
//!
//! # Audit an existing annotated file
//! clinvar-match audit final_variant_clinvar_data.json
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

pub mod annotate;
pub mod audit;

#[derive(Parser)]
#[command(name = "clinvar-match")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Annotate variant reports with matching ClinVar records")]
#[command(
    long_about = "clinvar-match cross-references externally produced variant reports with a ClinVar VCF.\n\nEach report is matched by GRCh37 position and allele, or by dbSNP id, and annotated with:\n- A snapshot of the first matching ClinVar record\n- Whether that record carries an informative clinical significance\n- A GenNotes editor link\n\nReports that cite a ClinVar accession in their summary but found no match are listed separately."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match variant reports against ClinVar and write annotated output
    Annotate(annotate::AnnotateArgs),

    /// List unmatched reports that cite a ClinVar accession
    Audit(audit::AuditArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Write `value` as pretty-printed JSON
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
