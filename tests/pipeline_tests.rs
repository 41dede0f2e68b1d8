//! End-to-end tests of the library pipeline: ClinVar VCF + report directory
//! through matching, enrichment and audit.

use std::path::Path;

use clinvar_match::matching::audit::{audit, audit_findings};
use clinvar_match::matching::enrichment::GennotesLink;
use clinvar_match::parsing::clinvar::parse_clinvar_file;
use clinvar_match::parsing::reports::load_variant_reports;
use clinvar_match::{normalize, MatchStats, MatchingConfig, MatchingEngine, VariantReport};
use serde_json::json;

const CLINVAR_VCF: &str = "##fileformat=VCFv4.1
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
1\t1000\trs1000\tA\tG\t.\t.\tRS=1000;CLNALLE=1;CLNSIG=5;CLNACC=RCV000000001.1
2\t2000\trs123\tC\tT\t.\t.\tRS=123;CLNALLE=1;CLNSIG=2|3;CLNACC=RCV000000002.1|RCV000000003.1
chrUn\t5\trs5\tA\tC\t.\t.\tRS=5
3\t3000\t.\tG\tA,C\t.\t.\tCLNALLE=2;CLNSIG=4
";

fn write_fixture(dir: &Path) {
    std::fs::write(dir.join("clinvar.vcf"), CLINVAR_VCF).unwrap();

    let variants = dir.join("variants");
    std::fs::create_dir(&variants).unwrap();
    let reports = [
        (
            "01_positional.json",
            json!({
                "Build 37 Chromosome": "chr1",
                "Build 37 Position": "1000",
                "Build 37 Variant Allele": "G",
                "Gene": "GENE1",
            }),
        ),
        (
            "02_identifier.json",
            json!({ "dbSNP IDs": ["rs123", "rs456"] }),
        ),
        (
            "03_audit.json",
            json!({
                "Summary": "Reported in <a href=\"http://www.ncbi.nlm.nih.gov/clinvar/RCV000000009/\">ClinVar</a>",
            }),
        ),
        (
            "04_multiallelic.json",
            json!({
                "Build 37 Chromosome": 3,
                "Build 37 Position": 3000,
                "Build 37 Variant Allele": "C",
            }),
        ),
        (
            "05_unmatched.json",
            json!({
                "Build 37 Chromosome": "4",
                "Build 37 Position": "4000",
                "Build 37 Variant Allele": "T",
                "Summary": "no citation",
            }),
        ),
        (
            "06_only_unknown_chrom_id.json",
            json!({ "dbSNP IDs": "rs5" }),
        ),
    ];
    for (name, value) in reports {
        std::fs::write(variants.join(name), value.to_string()).unwrap();
    }
}

fn run_pipeline(
    dir: &Path,
    config: MatchingConfig,
) -> (Vec<VariantReport>, clinvar_match::MatchOutcome) {
    let records = parse_clinvar_file(&dir.join("clinvar.vcf")).unwrap();
    let reports = load_variant_reports(&dir.join("variants")).unwrap();
    let outcome = MatchingEngine::with_config(&records, config).match_reports(&reports);
    (reports, outcome)
}

#[test]
fn test_pipeline_annotates_reports() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let (reports, outcome) = run_pipeline(dir.path(), MatchingConfig::default());
    assert_eq!(reports.len(), 6);
    assert_eq!(
        outcome.stats,
        MatchStats {
            total: 6,
            eligible: 5,
            matched: 4,
        }
    );

    let positional = &outcome.reports[0];
    let matched = positional.clinical_match.as_ref().unwrap();
    assert_eq!(matched.cross_reference_id.as_deref(), Some("rs1000"));
    assert_eq!(positional.is_notable, Some(true));
    let link = GennotesLink::parse(positional.external_link.as_deref().unwrap()).unwrap();
    assert_eq!(link.genome_build, "b37");
    assert_eq!(link.position, 1000);
    assert_eq!(link.alternate_alleles, vec!["G"]);

    // Benign and likely benign only
    let identifier = &outcome.reports[1];
    assert_eq!(
        identifier.clinical_match.as_ref().unwrap().cross_reference_id.as_deref(),
        Some("rs123")
    );
    assert_eq!(identifier.is_notable, Some(false));

    assert!(outcome.reports[2].clinical_match.is_none());

    let multi = &outcome.reports[3];
    assert_eq!(multi.clinical_match.as_ref().unwrap().position, 3000);
    assert_eq!(multi.is_notable, Some(true));

    assert!(outcome.reports[4].clinical_match.is_none());

    // The clinical record has an unknown chromosome but still joins by id
    let unknown_chrom = outcome.reports[5].clinical_match.as_ref().unwrap();
    assert!(normalize(&unknown_chrom.chromosome).is_err());
}

#[test]
fn test_pipeline_audit() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let (_, outcome) = run_pipeline(dir.path(), MatchingConfig::default());
    let flagged = audit(&outcome.reports);
    assert_eq!(flagged.len(), 1);
    assert!(flagged[0].summary().unwrap().contains("/clinvar/RCV000000009"));
    assert!(flagged.iter().all(|r| r.clinical_match.is_none()));

    let findings = audit_findings(&outcome.reports);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].index, 2);
    assert_eq!(findings[0].accessions, vec!["RCV000000009"]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let records = parse_clinvar_file(&dir.path().join("clinvar.vcf")).unwrap();
    let reports = load_variant_reports(&dir.path().join("variants")).unwrap();
    let original = serde_json::to_string(&reports).unwrap();

    let engine = MatchingEngine::new(&records);
    let first = serde_json::to_string(&engine.match_reports(&reports).reports).unwrap();
    let second = serde_json::to_string(&engine.match_reports(&reports).reports).unwrap();

    assert_eq!(first, second);
    assert_eq!(serde_json::to_string(&reports).unwrap(), original);
    assert_ne!(first, original);
}

#[test]
fn test_pipeline_parallel_equivalent() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let (_, serial) = run_pipeline(dir.path(), MatchingConfig::default());
    let (_, parallel) = run_pipeline(
        dir.path(),
        MatchingConfig {
            parallel: true,
            ..MatchingConfig::default()
        },
    );
    assert_eq!(serial.reports, parallel.reports);
    assert_eq!(serial.stats, parallel.stats);
}

#[test]
fn test_annotated_output_reloads() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let (_, outcome) = run_pipeline(dir.path(), MatchingConfig::default());
    let written = serde_json::to_string_pretty(&outcome.reports).unwrap();
    let reloaded = clinvar_match::parsing::reports::parse_reports_text(&written).unwrap();

    assert_eq!(reloaded, outcome.reports);
    assert_eq!(audit(&reloaded).len(), 1);
}
