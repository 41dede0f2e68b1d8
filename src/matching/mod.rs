//! Variant-to-ClinVar matching, enrichment and recall audit.
//!
//! - [`MatchingEngine`](engine::MatchingEngine): annotates variant reports with clinical records
//! - [`enrichment`]: notability flag and GenNotes editor links for matched reports
//! - [`audit`]: finds unmatched reports whose summary cites a ClinVar accession
//!
//! ## Matching Algorithm
//!
//! For each report, in input order, the clinical records are scanned in
//! dataset order. A record matches when either holds:
//!
//! 1. **Positional**: same normalized chromosome, same position, and the
//!    report's variant allele is one of the record's alternate alleles
//! 2. **Identifier**: the record's dbSNP id is listed on the report
//!
//! The first matching record wins. There is no scoring and no preference of
//! one clause over the other across records.
//!
//! ## Example
//!
//! ```rust
//! use clinvar_match::{ClinicalRecord, MatchingEngine, VariantReport};
//!
//! let records = vec![ClinicalRecord::new("1", 1000, "A", ["G"]).with_cross_reference_id("rs123")];
//! let report = VariantReport::default().with_field("dbSNP IDs", serde_json::json!(["rs123"]));
//!
//! let engine = MatchingEngine::new(&records);
//! let outcome = engine.match_reports(&[report]);
//!
//! assert!(outcome.reports[0].clinical_match.is_some());
//! assert_eq!(outcome.stats.matched, 1);
//! ```

pub mod audit;
pub mod engine;
pub mod enrichment;
