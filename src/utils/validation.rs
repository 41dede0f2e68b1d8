//! Centralized validation and helper functions.

/// Maximum number of clinical records read from one ClinVar file
pub const MAX_CLINICAL_RECORDS: usize = 10_000_000;

/// Maximum number of variant reports loaded from one directory
pub const MAX_VARIANT_REPORTS: usize = 1_000_000;

/// Validate that a string is a dbSNP reference SNP identifier (`rs` + digits).
///
/// # Examples
///
/// ```
/// use clinvar_match::utils::validation::is_valid_rsid;
///
/// assert!(is_valid_rsid("rs80357906"));
/// assert!(!is_valid_rsid("rs"));
/// assert!(!is_valid_rsid("80357906"));
/// assert!(!is_valid_rsid("."));
/// ```
#[must_use]
pub fn is_valid_rsid(s: &str) -> bool {
    s.strip_prefix("rs")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Normalize a dbSNP identifier to `rs<digits>`.
///
/// Accepts `rs123`, `RS123` or a bare `123` (as written in the ClinVar `RS`
/// INFO field). Returns None for anything else.
#[must_use]
pub fn normalize_rsid(s: &str) -> Option<String> {
    let s = s.trim();
    let lower = s.to_ascii_lowercase();
    if is_valid_rsid(&lower) {
        return Some(lower);
    }
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return Some(format!("rs{s}"));
    }
    None
}

/// Check if adding another record would exceed `max`.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_record_limit(records.len(), MAX_CLINICAL_RECORDS).is_some() {
///     return Err(...);
/// }
/// records.push(new_record); // Safe to add
/// ```
#[must_use]
pub fn check_record_limit(count: usize, max: usize) -> Option<String> {
    if count >= max {
        Some(format!(
            "Too many records: adding another would exceed maximum of {max}"
        ))
    } else {
        None
    }
}
