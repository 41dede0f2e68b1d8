//! Command-line tests for the `annotate` and `audit` subcommands.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

const CLINVAR_VCF: &str = "##fileformat=VCFv4.1
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
1\t1000\trs1000\tA\tG\t.\t.\tRS=1000;CLNALLE=1;CLNSIG=5;CLNACC=RCV000000001.1
";

fn write_inputs(dir: &Path) {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = GzEncoder::new(
        std::fs::File::create(dir.join("clinvar.vcf.gz")).unwrap(),
        Compression::default(),
    );
    encoder.write_all(CLINVAR_VCF.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let variants = dir.join("variants");
    std::fs::create_dir(&variants).unwrap();
    std::fs::write(
        variants.join("a.json"),
        json!({
            "Build 37 Chromosome": "chr1",
            "Build 37 Position": "1000",
            "Build 37 Variant Allele": "G",
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        variants.join("b.json"),
        json!({ "Summary": "See /clinvar/RCV000000077 for details" }).to_string(),
    )
    .unwrap();
}

fn cmd() -> Command {
    Command::cargo_bin("clinvar-match").unwrap()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_annotate_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let output = dir.path().join("final.json");
    let audit_output = dir.path().join("audit.json");

    cmd()
        .arg("annotate")
        .arg("--clinvar")
        .arg(dir.path().join("clinvar.vcf.gz"))
        .arg("--variants")
        .arg(dir.path().join("variants"))
        .arg("--output")
        .arg(&output)
        .arg("--audit-output")
        .arg(&audit_output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Annotation Results"))
        .stdout(predicate::str::contains("Matched: 1 / 1"))
        .stdout(predicate::str::contains("Linked ClinVar accessions: 1"))
        .stdout(predicate::str::contains("  Pathogenic: 1"));

    let annotated = read_json(&output);
    let annotated = annotated.as_array().unwrap();
    assert_eq!(annotated.len(), 2);
    assert_eq!(annotated[0]["is_notable"], json!(true));
    assert_eq!(annotated[0]["clinical_match"]["cross_reference_id"], json!("rs1000"));
    assert!(annotated[0]["external_link"]
        .as_str()
        .unwrap()
        .contains("build=b37&chrom=1&pos=1000"));
    assert!(annotated[1].get("clinical_match").is_none());

    let flagged = read_json(&audit_output);
    assert_eq!(flagged.as_array().unwrap().len(), 1);
}

#[test]
fn test_annotate_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let assert = cmd()
        .args(["--format", "json", "annotate", "--parallel", "--build", "b38"])
        .arg("--clinvar")
        .arg(dir.path().join("clinvar.vcf.gz"))
        .arg("--variants")
        .arg(dir.path().join("variants"))
        .arg("--output")
        .arg(dir.path().join("final.json"))
        .arg("--audit-output")
        .arg(dir.path().join("audit.json"))
        .assert()
        .success();

    let summary: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(summary["stats"]["total"], json!(2));
    assert_eq!(summary["stats"]["eligible"], json!(1));
    assert_eq!(summary["stats"]["matched"], json!(1));
    assert_eq!(summary["audit_flagged"], json!(1));
    assert_eq!(summary["significance"], json!({ "Pathogenic": 1 }));
    assert_eq!(summary["linked_accessions"], json!(1));

    let annotated = read_json(&dir.path().join("final.json"));
    assert!(annotated[0]["external_link"].as_str().unwrap().contains("build=b38"));
}

#[test]
fn test_audit_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("final.json");
    std::fs::write(
        &input,
        json!([
            { "Summary": "nothing" },
            { "Summary": "x /clinvar/RCV000000077.2 y" },
            {
                "Summary": "/clinvar/RCV000000078",
                "clinical_match": {
                    "chromosome": "1",
                    "position": 5,
                    "reference_allele": "A",
                    "alternate_alleles": ["C"]
                }
            }
        ])
        .to_string(),
    )
    .unwrap();
    let output = dir.path().join("flagged.json");

    cmd()
        .args(["--format", "tsv", "audit"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1\tRCV000000077.2"))
        .stdout(predicate::str::contains("RCV000000078").not());

    let flagged = read_json(&output);
    assert_eq!(flagged.as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_variant_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    cmd()
        .arg("annotate")
        .arg("--clinvar")
        .arg(dir.path().join("clinvar.vcf.gz"))
        .arg("--variants")
        .arg(dir.path().join("nope"))
        .arg("--output")
        .arg(dir.path().join("final.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load variant reports"));
}
