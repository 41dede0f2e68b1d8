//! Parser for ClinVar VCF files.
//!
//! Each data line becomes one [`ClinicalRecord`]. Per-allele submissions are
//! rebuilt from the `CLNALLE`, `CLNSIG` and `CLNACC` INFO fields:
//!
//! `CLNALLE=1;CLNSIG=5|4;CLNACC=RCV000019224.3|RCV000034675.1`
//!
//! Malformed data lines are logged and skipped so one bad line cannot abort
//! the whole run.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::{debug, info, warn};

use crate::core::clinical::{resolve_significance, AlleleDetail, ClinicalRecord, Submission};
use crate::parsing::ParseError;
use crate::utils::validation::{
    check_record_limit, is_valid_rsid, normalize_rsid, MAX_CLINICAL_RECORDS,
};

const VCF_FIXED_COLUMNS: usize = 8;

/// Parse a ClinVar VCF file; `.gz` files are decompressed on the fly
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or decompressed, or
/// `ParseError::TooManyRecords` if the record limit is exceeded.
pub fn parse_clinvar_file(path: &Path) -> Result<Vec<ClinicalRecord>, ParseError> {
    let file = File::open(path)?;
    let is_gzip = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    debug!(path = %path.display(), is_gzip, "Reading ClinVar data");

    if is_gzip {
        parse_clinvar_reader(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        parse_clinvar_reader(BufReader::new(file))
    }
}

/// Parse ClinVar VCF text
///
/// # Errors
///
/// Returns `ParseError::TooManyRecords` if the record limit is exceeded.
pub fn parse_clinvar_text(text: &str) -> Result<Vec<ClinicalRecord>, ParseError> {
    parse_clinvar_reader(text.as_bytes())
}

/// Parse ClinVar VCF lines from any buffered reader, skipping header lines
///
/// # Errors
///
/// Returns `ParseError::Io` on read failures, or `ParseError::TooManyRecords`
/// if the record limit is exceeded.
pub fn parse_clinvar_reader<R: BufRead>(reader: R) -> Result<Vec<ClinicalRecord>, ParseError> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_clinvar_line(&line) {
            Ok(record) => {
                if check_record_limit(records.len(), MAX_CLINICAL_RECORDS).is_some() {
                    return Err(ParseError::TooManyRecords(records.len()));
                }
                records.push(record);
            }
            Err(e) => {
                skipped += 1;
                // Line numbers in logs are 1-based
                warn!(line = i + 1, error = %e, "Skipping malformed ClinVar line");
            }
        }
    }

    info!(records = records.len(), skipped, "Parsed ClinVar data");
    Ok(records)
}

/// Parse a single ClinVar VCF data line
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the line has fewer than 8 columns,
/// an empty chromosome or reference allele, or a position that is not a
/// positive integer.
pub fn parse_clinvar_line(line: &str) -> Result<ClinicalRecord, ParseError> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() < VCF_FIXED_COLUMNS {
        return Err(ParseError::InvalidFormat(format!(
            "Expected {VCF_FIXED_COLUMNS} columns, found {}",
            fields.len()
        )));
    }

    let chromosome = fields[0].trim();
    if chromosome.is_empty() {
        return Err(ParseError::InvalidFormat("Empty chromosome".to_string()));
    }

    let position: u64 = match fields[1].trim().parse() {
        Ok(pos) if pos > 0 => pos,
        _ => {
            return Err(ParseError::InvalidFormat(format!(
                "Invalid position: '{}'",
                fields[1]
            )))
        }
    };

    let reference = fields[3].trim();
    if reference.is_empty() {
        return Err(ParseError::InvalidFormat("Empty reference allele".to_string()));
    }

    let alts: Vec<&str> = match fields[4].trim() {
        "" | "." => Vec::new(),
        alt => alt.split(',').collect(),
    };

    let info = parse_info(fields[7]);

    let cross_reference_id = fields[2]
        .split(';')
        .find(|id| is_valid_rsid(id))
        .map(str::to_string)
        .or_else(|| {
            info.get("RS")
                .and_then(|rs| rs.split(',').find_map(normalize_rsid))
        });

    let mut record = ClinicalRecord::new(chromosome, position, reference, alts.iter().copied());
    record.cross_reference_id = cross_reference_id;
    record.alleles = allele_details(reference, &alts, &info);

    Ok(record)
}

/// Split an INFO column into key/value pairs; flags map to an empty value
fn parse_info(info: &str) -> HashMap<&str, &str> {
    info.split(';')
        .filter(|entry| !entry.is_empty() && *entry != ".")
        .map(|entry| entry.split_once('=').unwrap_or((entry, "")))
        .collect()
}

fn allele_details(reference: &str, alts: &[&str], info: &HashMap<&str, &str>) -> Vec<AlleleDetail> {
    let Some(clnsig) = info.get("CLNSIG") else {
        return Vec::new();
    };

    let accession_groups: Vec<&str> = info
        .get("CLNACC")
        .map(|acc| acc.split(',').collect())
        .unwrap_or_default();

    // Which allele each comma-separated CLN* slot describes.
    // CLNALLE indexes: 0 is REF, 1.. are ALT, -1 means not present.
    let slot_alleles: Vec<Option<&str>> = match info.get("CLNALLE") {
        Some(clnalle) => clnalle
            .split(',')
            .map(|idx| match idx.trim().parse::<i64>() {
                Ok(0) => Some(reference),
                Ok(n) if n > 0 => usize::try_from(n - 1).ok().and_then(|i| alts.get(i).copied()),
                _ => None,
            })
            .collect(),
        None => alts.iter().map(|alt| Some(*alt)).collect(),
    };

    clnsig
        .split(',')
        .enumerate()
        .filter_map(|(slot, sigs)| {
            let Some(allele) = slot_alleles.get(slot).copied().flatten() else {
                debug!(slot, "CLNSIG entry refers to no allele on this line");
                return None;
            };

            let accessions: Vec<&str> = accession_groups
                .get(slot)
                .map(|group| group.split('|').collect())
                .unwrap_or_default();

            let records = sigs
                .split('|')
                .enumerate()
                .filter(|(_, sig)| !sig.is_empty() && *sig != ".")
                .map(|(i, sig)| {
                    let submission = Submission::new(resolve_significance(sig));
                    match accessions.get(i) {
                        Some(acc) if !acc.is_empty() && *acc != "." => {
                            submission.with_accession(*acc)
                        }
                        _ => submission,
                    }
                })
                .collect();

            Some(AlleleDetail {
                allele: allele.to_string(),
                records,
            })
        })
        .collect()
}
