use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::core::variant::VariantReport;
use crate::parsing::ParseError;
use crate::utils::validation::{check_record_limit, MAX_VARIANT_REPORTS};

/// Load every `*.json` variant report in `dir`.
///
/// Files are read in lexicographic file-name order so that repeated runs see
/// the reports in the same order. A file may hold a single report object or
/// an array of them.
///
/// # Errors
///
/// Returns `ParseError::Io` if the directory or a file cannot be read,
/// `ParseError::Json` naming the file that failed to parse, or
/// `ParseError::TooManyRecords` if the report limit is exceeded.
pub fn load_variant_reports(dir: &Path) -> Result<Vec<VariantReport>, ParseError> {
    let paths = report_paths(dir)?;
    let mut reports = Vec::new();

    for path in &paths {
        let text = std::fs::read_to_string(path)?;
        let parsed = parse_reports_text(&text).map_err(|source| ParseError::Json {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), reports = parsed.len(), "Loaded variant reports");

        for report in parsed {
            if check_record_limit(reports.len(), MAX_VARIANT_REPORTS).is_some() {
                return Err(ParseError::TooManyRecords(reports.len()));
            }
            reports.push(report);
        }
    }

    info!(files = paths.len(), reports = reports.len(), "Parsed variant data");
    Ok(reports)
}

/// JSON files directly inside `dir`, sorted by file name
fn report_paths(dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Parse JSON text holding one report object or an array of report objects
///
/// # Errors
///
/// Returns the underlying `serde_json::Error` if the text is not valid JSON
/// or an element is not an object.
pub fn parse_reports_text(text: &str) -> Result<Vec<VariantReport>, serde_json::Error> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value::<VariantReport>)
            .collect(),
        value => Ok(vec![serde_json::from_value(value)?]),
    }
}
