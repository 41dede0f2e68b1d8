//! Core data types for cross-referencing variant reports with ClinVar.
//!
//! - [`Chromosome`](chromosome::Chromosome): canonical chromosome key
//! - [`ClinicalRecord`](clinical::ClinicalRecord): one ClinVar entry with per-allele submissions
//! - [`VariantReport`](variant::VariantReport): one externally produced report, loosely typed
//! - [`RecordError`](types::RecordError): why a record cannot take part in a comparison
//!
//! ## Chromosome Naming
//!
//! The two datasets spell chromosomes differently:
//!
//! | Source | Chromosome 1 | Mitochondrial |
//! |--------|--------------|---------------|
//! | UCSC   | chr1         | chrM          |
//! | NCBI   | 1            | MT            |
//!
//! All spellings normalize to the same [`Chromosome`](chromosome::Chromosome)
//! key before positions are compared.

pub mod chromosome;
pub mod clinical;
pub mod types;
pub mod variant;
