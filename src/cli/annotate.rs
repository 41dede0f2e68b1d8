use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::cli::{write_json, OutputFormat};
use crate::core::clinical::significance_label;
use crate::core::variant::VariantReport;
use crate::matching::audit::audit;
use crate::matching::engine::{MatchStats, MatchingConfig, MatchingEngine};
use crate::matching::enrichment::DEFAULT_GENOME_BUILD;
use crate::parsing::clinvar::parse_clinvar_file;
use crate::parsing::reports::load_variant_reports;

#[derive(Args)]
pub struct AnnotateArgs {
    /// ClinVar VCF file (plain or .gz)
    #[arg(long, required = true)]
    pub clinvar: PathBuf,

    /// Directory of variant report JSON files
    #[arg(long, required = true)]
    pub variants: PathBuf,

    /// Where to write the annotated reports
    #[arg(short, long, default_value = "final_variant_clinvar_data.json")]
    pub output: PathBuf,

    /// Where to write unmatched reports that cite a ClinVar accession
    #[arg(long, default_value = "clinvar_in_variant.json")]
    pub audit_output: PathBuf,

    /// Genome build tag used in GenNotes links
    #[arg(long, default_value = DEFAULT_GENOME_BUILD)]
    pub build: String,

    /// Match reports in parallel
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    generated_at: String,
    clinvar: String,
    variants: String,
    clinical_records: usize,
    stats: MatchStats,
    match_rate: f64,
    notable: usize,
    /// Submissions on matched records, keyed by significance label
    significance: BTreeMap<String, usize>,
    /// Distinct RCV accessions on matched records
    linked_accessions: usize,
    audit_flagged: usize,
    output: String,
    audit_output: String,
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if either input cannot be read or an output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let records = parse_clinvar_file(&args.clinvar)
        .with_context(|| format!("Failed to read ClinVar data from {}", args.clinvar.display()))?;

    if verbose {
        eprintln!("Parsed {} ClinVar records", records.len());
    }

    let reports = load_variant_reports(&args.variants).with_context(|| {
        format!("Failed to load variant reports from {}", args.variants.display())
    })?;

    if verbose {
        eprintln!("Loaded {} variant reports", reports.len());
    }

    if records.is_empty() {
        eprintln!("Warning: ClinVar file holds no records, no report can match.");
    }

    let config = MatchingConfig {
        genome_build: args.build.clone(),
        parallel: args.parallel,
    };
    let engine = MatchingEngine::with_config(&records, config);
    let outcome = engine.match_reports(&reports);
    let flagged = audit(&outcome.reports);

    write_json(&args.output, &outcome.reports)?;
    write_json(&args.audit_output, &flagged)?;

    let summary = RunSummary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        clinvar: args.clinvar.display().to_string(),
        variants: args.variants.display().to_string(),
        clinical_records: records.len(),
        stats: outcome.stats,
        match_rate: outcome.stats.match_rate(),
        notable: outcome
            .reports
            .iter()
            .filter(|r| r.is_notable == Some(true))
            .count(),
        significance: significance_counts(&outcome.reports),
        linked_accessions: linked_accessions(&outcome.reports),
        audit_flagged: flagged.len(),
        output: args.output.display().to_string(),
        audit_output: args.audit_output.display().to_string(),
    };

    match format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn significance_counts(reports: &[VariantReport]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in reports.iter().filter_map(|r| r.clinical_match.as_ref()) {
        for submission in record.submissions() {
            let label = significance_label(&submission.significance)
                .map_or_else(|| submission.significance.clone(), str::to_string);
            *counts.entry(label).or_insert(0) += 1;
        }
    }
    counts
}

fn linked_accessions(reports: &[VariantReport]) -> usize {
    reports
        .iter()
        .filter_map(|r| r.clinical_match.as_ref())
        .flat_map(|record| record.accessions())
        .collect::<BTreeSet<_>>()
        .len()
}

fn print_text_summary(summary: &RunSummary) {
    println!("Annotation Results");
    println!("{}", "=".repeat(60));

    println!("\nClinVar: {}", summary.clinvar);
    println!("  Records: {}", summary.clinical_records);

    println!("\nVariant reports: {}", summary.variants);
    println!("  Total: {}", summary.stats.total);
    println!("  Eligible: {}", summary.stats.eligible);
    println!(
        "  Matched: {} / {} ({:.1}%)",
        summary.stats.matched,
        summary.stats.eligible,
        summary.match_rate * 100.0
    );
    println!("  Clinically notable: {}", summary.notable);
    println!("  Linked ClinVar accessions: {}", summary.linked_accessions);
    println!("  Unmatched citing ClinVar: {}", summary.audit_flagged);

    if !summary.significance.is_empty() {
        println!("\nSignificance of matched submissions:");
        for (label, count) in &summary.significance {
            println!("  {label}: {count}");
        }
    }

    println!("\nWrote {}", summary.output);
    println!("Wrote {}", summary.audit_output);
}

fn print_tsv_summary(summary: &RunSummary) {
    println!("total\teligible\tmatched\tmatch_rate\tnotable\taudit_flagged");
    println!(
        "{}\t{}\t{}\t{:.4}\t{}\t{}",
        summary.stats.total,
        summary.stats.eligible,
        summary.stats.matched,
        summary.match_rate,
        summary.notable,
        summary.audit_flagged,
    );
}
