//! Readers for the two input datasets.
//!
//! - **ClinVar VCF** ([`clinvar`]): plain or gzip-compressed, one
//!   [`ClinicalRecord`](crate::core::clinical::ClinicalRecord) per data line
//! - **Variant reports** ([`reports`]): a directory of JSON files, loaded in
//!   file-name order
//!
//! ## Example
//!
//! ```rust,no_run
//! use clinvar_match::parsing::{clinvar::parse_clinvar_file, reports::load_variant_reports};
//! use std::path::Path;
//!
//! let records = parse_clinvar_file(Path::new("clinvar.vcf.gz")).unwrap();
//! let reports = load_variant_reports(Path::new("variant_data")).unwrap();
//! ```
//!
//! ## ClinVar INFO Fields
//!
//! | Key | Description | Required |
//! |-----|-------------|----------|
//! | RS  | dbSNP id without the `rs` prefix | No |
//! | CLNALLE | Allele indexes the CLN* lists refer to | No |
//! | CLNSIG  | Significance codes, `,` per allele, `\|` per submission | No |
//! | CLNACC  | RCV accessions aligned with CLNSIG | No |

use thiserror::Error;

pub mod clinvar;
pub mod reports;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Too many records: {0} exceeds maximum allowed")]
    TooManyRecords(usize),
}
