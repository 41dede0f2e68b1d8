use serde::{Deserialize, Serialize};

/// Significance codes that carry no clinical interpretation
/// (uncertain, not provided, benign, likely benign, other)
pub const UNINFORMATIVE_SIGNIFICANCE: [&str; 5] = ["0", "1", "2", "3", "255"];

/// Whether a significance code carries a clinical interpretation.
#[must_use]
pub fn is_informative_significance(code: &str) -> bool {
    !UNINFORMATIVE_SIGNIFICANCE.contains(&code)
}

/// Human-readable label for a ClinVar significance code
#[must_use]
pub fn significance_label(code: &str) -> Option<&'static str> {
    match code {
        "0" => Some("Uncertain significance"),
        "1" => Some("Not provided"),
        "2" => Some("Benign"),
        "3" => Some("Likely benign"),
        "4" => Some("Likely pathogenic"),
        "5" => Some("Pathogenic"),
        "6" => Some("Drug response"),
        "7" => Some("Histocompatibility"),
        "255" => Some("Other"),
        _ => None,
    }
}

/// Code for "other", assigned to textual terms with no code of their own
const OTHER_SIGNIFICANCE: &str = "255";

/// Textual terms that carry an interpretation but have no single code
const CONFLICTING_TERMS: [&str; 2] = ["conflicting_interpretations", "conflicting_classifications"];

/// Lowercase, underscore-joined form of a textual term. A leading `_` marks a
/// secondary value in newer releases (`_other`) and is dropped.
fn normalize_term(term: &str) -> String {
    term.trim()
        .trim_start_matches('_')
        .to_ascii_lowercase()
        .replace(' ', "_")
}

/// Map a single textual CLNSIG term (as written by newer ClinVar releases) to
/// its numeric code. Combined and unrecognized terms are returned as `None`.
#[must_use]
pub fn significance_code_from_term(term: &str) -> Option<&'static str> {
    match normalize_term(term).as_str() {
        "uncertain_significance" => Some("0"),
        "not_provided" => Some("1"),
        "benign" => Some("2"),
        "likely_benign" => Some("3"),
        "likely_pathogenic" => Some("4"),
        "pathogenic" => Some("5"),
        "drug_response" => Some("6"),
        "histocompatibility" => Some("7"),
        "other" => Some("255"),
        _ => None,
    }
}

/// Resolve one CLNSIG value to the code stored on a [`Submission`].
///
/// Numeric codes pass through. Textual values may combine terms with `/`
/// (`Benign/Likely_benign`); the first part with an informative code wins,
/// otherwise the first mapped part. Conflicting-interpretation terms are kept
/// verbatim and stay informative. Anything else becomes the "other" code.
#[must_use]
pub fn resolve_significance(value: &str) -> String {
    let value = value.trim();
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value.to_string();
    }

    let normalized = normalize_term(value);
    if CONFLICTING_TERMS.iter().any(|term| normalized.starts_with(term)) {
        return value.trim_start_matches('_').to_string();
    }

    let codes: Vec<&'static str> = value
        .split('/')
        .filter_map(significance_code_from_term)
        .collect();
    codes
        .iter()
        .copied()
        .find(|code| is_informative_significance(code))
        .or_else(|| codes.first().copied())
        .unwrap_or(OTHER_SIGNIFICANCE)
        .to_string()
}

/// One clinical submission attached to an allele
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Significance code (CLNSIG)
    pub significance: String,

    /// ClinVar accession (RCV) for this submission, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
}

impl Submission {
    pub fn new(significance: impl Into<String>) -> Self {
        Self {
            significance: significance.into(),
            accession: None,
        }
    }

    #[must_use]
    pub fn with_accession(mut self, accession: impl Into<String>) -> Self {
        self.accession = Some(accession.into());
        self
    }

    #[must_use]
    pub fn is_informative(&self) -> bool {
        is_informative_significance(&self.significance)
    }
}

/// Per-allele clinical detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlleleDetail {
    /// The allele sequence these submissions describe
    pub allele: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Submission>,
}

impl AlleleDetail {
    pub fn new(allele: impl Into<String>) -> Self {
        Self {
            allele: allele.into(),
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_submission(mut self, submission: Submission) -> Self {
        self.records.push(submission);
        self
    }
}

/// One entry of the clinical-significance database.
///
/// Records are built once at ingestion and shared read-only by the matching
/// engine; a report that matches gets its own clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    /// Chromosome label as written in the source
    pub chromosome: String,

    /// 1-based position
    pub position: u64,

    pub reference_allele: String,

    /// Alternate alleles, in source order without duplicates
    pub alternate_alleles: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alleles: Vec<AlleleDetail>,

    /// dbSNP identifier (e.g. `rs123`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_reference_id: Option<String>,
}

impl ClinicalRecord {
    pub fn new<I, S>(
        chromosome: impl Into<String>,
        position: u64,
        reference_allele: impl Into<String>,
        alternate_alleles: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut alts: Vec<String> = Vec::new();
        for alt in alternate_alleles {
            let alt = alt.into();
            if !alts.contains(&alt) {
                alts.push(alt);
            }
        }

        Self {
            chromosome: chromosome.into(),
            position,
            reference_allele: reference_allele.into(),
            alternate_alleles: alts,
            alleles: Vec::new(),
            cross_reference_id: None,
        }
    }

    #[must_use]
    pub fn with_cross_reference_id(mut self, id: impl Into<String>) -> Self {
        self.cross_reference_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_allele(mut self, allele: AlleleDetail) -> Self {
        self.alleles.push(allele);
        self
    }

    /// Check whether `allele` is one of this record's alternate alleles
    #[must_use]
    pub fn has_alternate(&self, allele: &str) -> bool {
        self.alternate_alleles.iter().any(|alt| alt == allele)
    }

    /// All submissions across all alleles
    pub fn submissions(&self) -> impl Iterator<Item = &Submission> {
        self.alleles.iter().flat_map(|a| a.records.iter())
    }

    /// RCV accessions referenced by this record's submissions
    pub fn accessions(&self) -> impl Iterator<Item = &str> {
        self.submissions().filter_map(|s| s.accession.as_deref())
    }
}
