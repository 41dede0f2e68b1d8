use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::chromosome::{normalize, Chromosome};
use crate::core::clinical::ClinicalRecord;
use crate::core::variant::VariantReport;
use crate::matching::enrichment::{self, DEFAULT_GENOME_BUILD};

/// Configuration for the matching engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Genome build tag embedded in external links
    pub genome_build: String,
    /// Match reports on the rayon thread pool
    pub parallel: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            genome_build: DEFAULT_GENOME_BUILD.to_string(),
            parallel: false,
        }
    }
}

/// Counters describing one matching run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Reports considered
    pub total: usize,
    /// Reports with positional or identifier fields
    pub eligible: usize,
    /// Reports that received a clinical match
    pub matched: usize,
}

impl MatchStats {
    /// Fraction of eligible reports that matched (0 when none were eligible)
    #[must_use]
    pub fn match_rate(&self) -> f64 {
        if self.eligible == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.matched as f64 / self.eligible as f64
        }
    }

    fn record(&mut self, status: ReportStatus) {
        self.total += 1;
        match status {
            ReportStatus::Ineligible => {}
            ReportStatus::Unmatched => self.eligible += 1,
            ReportStatus::Matched => {
                self.eligible += 1;
                self.matched += 1;
            }
        }
    }
}

/// Result of running the engine over a batch of reports
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Annotated copies of the input reports, in input order
    pub reports: Vec<VariantReport>,
    pub stats: MatchStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportStatus {
    Ineligible,
    Unmatched,
    Matched,
}

/// The main matching engine.
///
/// Holds the clinical dataset by reference; it is never copied or mutated.
pub struct MatchingEngine<'a> {
    records: &'a [ClinicalRecord],
    /// Normalized chromosome of each record, `None` if the label is unknown
    chromosomes: Vec<Option<Chromosome>>,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(records: &'a [ClinicalRecord]) -> Self {
        Self::with_config(records, MatchingConfig::default())
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(records: &'a [ClinicalRecord], config: MatchingConfig) -> Self {
        let chromosomes = records
            .iter()
            .enumerate()
            .map(|(index, record)| match normalize(&record.chromosome) {
                Ok(chrom) => Some(chrom),
                Err(e) => {
                    debug!(index, error = %e, "Clinical record can only match by identifier");
                    None
                }
            })
            .collect();

        Self {
            records,
            chromosomes,
            config,
        }
    }

    /// Annotate copies of `reports` with their first matching clinical record.
    ///
    /// The input is left untouched, so the same reports can be matched again
    /// against the same or a different dataset.
    pub fn match_reports(&self, reports: &[VariantReport]) -> MatchOutcome {
        let annotated: Vec<(VariantReport, ReportStatus)> = if self.config.parallel {
            reports.par_iter().map(|r| self.annotate(r)).collect()
        } else {
            reports.iter().map(|r| self.annotate(r)).collect()
        };

        let mut stats = MatchStats::default();
        let mut out = Vec::with_capacity(annotated.len());
        for (report, status) in annotated {
            stats.record(status);
            out.push(report);
        }

        info!(
            matched = stats.matched,
            eligible = stats.eligible,
            total = stats.total,
            "Associated variant reports with clinical records"
        );

        MatchOutcome {
            reports: out,
            stats,
        }
    }

    /// Find the first clinical record, in dataset order, that matches `report`
    /// positionally or by dbSNP identifier.
    #[must_use]
    pub fn find_match(&self, report: &VariantReport) -> Option<&'a ClinicalRecord> {
        let positional = match report.positional_key() {
            Some(Ok(key)) => Some(key),
            Some(Err(e)) => {
                debug!(error = %e, "Positional match not possible for report");
                None
            }
            None => None,
        };
        let ids = report.cross_reference_ids();

        if positional.is_none() && ids.is_empty() {
            return None;
        }

        let records = self.records;
        records
            .iter()
            .zip(&self.chromosomes)
            .find(|(record, chrom)| {
                positional
                    .as_ref()
                    .is_some_and(|key| key.matches(record, **chrom))
                    || record
                        .cross_reference_id
                        .as_ref()
                        .is_some_and(|id| ids.contains(id))
            })
            .map(|(record, _)| record)
    }

    fn annotate(&self, report: &VariantReport) -> (VariantReport, ReportStatus) {
        let mut annotated = report.clone();

        if !report.is_eligible() {
            return (annotated, ReportStatus::Ineligible);
        }

        match self.find_match(report) {
            Some(record) => {
                annotated.clinical_match = Some(record.clone());
                enrichment::enrich(&mut annotated, record, &self.config.genome_build);
                (annotated, ReportStatus::Matched)
            }
            None => (annotated, ReportStatus::Unmatched),
        }
    }
}
