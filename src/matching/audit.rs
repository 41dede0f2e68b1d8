//! Recall check on the matching engine.
//!
//! Some reports cite a ClinVar accession in their free-text summary but carry
//! no usable positional or dbSNP fields, so the structured matcher cannot find
//! them. This pass lists those reports without touching them.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::core::variant::VariantReport;

/// URL path fragment that marks a ClinVar RCV accession in free text
pub const CLINVAR_ACCESSION_PATTERN: &str = "/clinvar/RCV";

fn accession_regex() -> &'static Regex {
    static ACCESSION: OnceLock<Regex> = OnceLock::new();
    ACCESSION.get_or_init(|| {
        Regex::new(r"/clinvar/(RCV\d+(?:\.\d+)?)").expect("accession pattern is a valid regex")
    })
}

/// Whether free text cites a ClinVar accession
#[must_use]
pub fn references_clinvar_accession(text: &str) -> bool {
    text.contains(CLINVAR_ACCESSION_PATTERN)
}

/// A report the matcher probably should have matched
#[must_use]
pub fn is_missed_match(report: &VariantReport) -> bool {
    !report.has_clinical_match() && report.summary().is_some_and(references_clinvar_accession)
}

/// Reports whose summary cites a ClinVar accession but which received no
/// clinical match, in input order.
#[must_use]
pub fn audit(reports: &[VariantReport]) -> Vec<&VariantReport> {
    reports.iter().filter(|r| is_missed_match(r)).collect()
}

/// RCV accessions cited in `text`, in order of appearance
#[must_use]
pub fn accessions_in(text: &str) -> Vec<String> {
    accession_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// One flagged report with the accessions its summary cites
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditFinding {
    /// Position of the report in the audited sequence
    pub index: usize,
    pub accessions: Vec<String>,
}

/// Like [`audit`], but reports where each flagged report sits and what it cites
#[must_use]
pub fn audit_findings(reports: &[VariantReport]) -> Vec<AuditFinding> {
    reports
        .iter()
        .enumerate()
        .filter(|(_, r)| is_missed_match(r))
        .map(|(index, r)| AuditFinding {
            index,
            accessions: r.summary().map(accessions_in).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clinical::ClinicalRecord;
    use crate::core::variant::{CROSS_REFERENCE_FIELD, SUMMARY_FIELD};
    use serde_json::json;

    const CITING: &str =
        "See <a href=\"http://www.ncbi.nlm.nih.gov/clinvar/RCV000019224\">ClinVar</a> for details";

    fn summary(text: &str) -> VariantReport {
        VariantReport::default().with_field(SUMMARY_FIELD, text)
    }

    #[test]
    fn test_flags_unmatched_citing_reports() {
        let reports = vec![summary(CITING)];
        let flagged = audit(&reports);
        assert_eq!(flagged.len(), 1);
        assert!(std::ptr::eq(flagged[0], &reports[0]));
    }

    #[test]
    fn test_matched_reports_are_never_flagged() {
        let mut matched = summary(CITING);
        matched.clinical_match = Some(ClinicalRecord::new("1", 1, "A", ["C"]));
        assert!(audit(&[matched]).is_empty());
    }

    #[test]
    fn test_requires_summary_and_pattern() {
        let reports = vec![
            VariantReport::default().with_field(CROSS_REFERENCE_FIELD, json!(["rs1"])),
            summary("No ClinVar citation here"),
            summary("mentions clinvar/RCV without the leading slash"),
            VariantReport::default().with_field(SUMMARY_FIELD, json!(42)),
        ];
        assert!(audit(&reports).is_empty());
    }

    #[test]
    fn test_preserves_order_and_input() {
        let reports = vec![
            summary("a /clinvar/RCV000000001"),
            summary("nothing"),
            summary("b /clinvar/RCV000000002"),
        ];
        let before = reports.clone();

        let flagged: Vec<_> = audit(&reports)
            .into_iter()
            .filter_map(VariantReport::summary)
            .collect();
        assert_eq!(flagged, vec!["a /clinvar/RCV000000001", "b /clinvar/RCV000000002"]);
        assert_eq!(reports, before);
    }

    #[test]
    fn test_accessions_in() {
        assert_eq!(
            accessions_in("x /clinvar/RCV000019224.3 y /clinvar/RCV000000042 z /clinvar/RCVabc"),
            vec!["RCV000019224.3", "RCV000000042"]
        );
        assert!(accessions_in("no accessions").is_empty());
    }

    #[test]
    fn test_audit_findings() {
        let reports = vec![summary("nothing"), summary(CITING)];
        assert_eq!(
            audit_findings(&reports),
            vec![AuditFinding {
                index: 1,
                accessions: vec!["RCV000019224".to_string()],
            }]
        );
    }
}
