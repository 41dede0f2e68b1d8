//! # clinvar-match
//!
//! A library for cross-referencing externally produced variant reports with
//! the ClinVar clinical-significance database.
//!
//! Variant reports arrive from many producers with a loose, partially
//! optional schema: some carry GRCh37 coordinates, some only dbSNP ids, some
//! just a free-text summary. `clinvar-match` joins each report to the first
//! ClinVar record that describes the same variant and annotates it with a
//! snapshot of that record, a "clinically notable" flag and a GenNotes
//! editor link.
//!
//! ## Features
//!
//! - **Positional matching**: chromosome (any spelling), position and alternate allele
//! - **Identifier matching**: dbSNP ids when coordinates are missing
//! - **First match wins**: deterministic, order-based selection
//! - **Recall audit**: flags unmatched reports whose summary cites a ClinVar accession
//! - **Non-destructive**: the engine annotates copies, never the caller's input
//!
//! ## Example
//!
//! ```rust,no_run
//! use clinvar_match::MatchingEngine;
//! use clinvar_match::matching::audit::audit;
//! use clinvar_match::parsing::{clinvar::parse_clinvar_file, reports::load_variant_reports};
//! use std::path::Path;
//!
//! let records = parse_clinvar_file(Path::new("clinvar.vcf.gz")).unwrap();
//! let reports = load_variant_reports(Path::new("variant_data")).unwrap();
//!
//! let engine = MatchingEngine::new(&records);
//! let outcome = engine.match_reports(&reports);
//! println!("Matched: {} / {}", outcome.stats.matched, outcome.stats.eligible);
//!
//! for report in audit(&outcome.reports) {
//!     println!("Missed: {:?}", report.summary());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Chromosome keys, clinical records and variant reports
//! - [`matching`]: Matching engine, enrichment and audit
//! - [`parsing`]: ClinVar VCF and variant-report readers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::chromosome::{normalize, Chromosome};
pub use core::clinical::{AlleleDetail, ClinicalRecord, Submission};
pub use core::types::RecordError;
pub use core::variant::VariantReport;
pub use matching::engine::{MatchOutcome, MatchStats, MatchingConfig, MatchingEngine};
