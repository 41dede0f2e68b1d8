use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::chromosome::{normalize, Chromosome};
use crate::core::clinical::ClinicalRecord;
use crate::core::types::RecordError;

/// Report field holding the GRCh37 chromosome
pub const CHROMOSOME_FIELD: &str = "Build 37 Chromosome";
/// Report field holding the GRCh37 1-based position
pub const POSITION_FIELD: &str = "Build 37 Position";
/// Report field holding the observed allele
pub const VARIANT_ALLELE_FIELD: &str = "Build 37 Variant Allele";
/// Report field holding dbSNP identifiers
pub const CROSS_REFERENCE_FIELD: &str = "dbSNP IDs";
/// Report field holding free-text commentary
pub const SUMMARY_FIELD: &str = "Summary";

/// An externally produced variant report.
///
/// The upstream schema is heterogeneous, so the source fields are kept as an
/// untyped map and read through strict-optional accessors. Annotations added
/// by the matching engine live in typed slots and serialize next to the
/// source fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariantReport {
    /// Source fields, carried through untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    /// Snapshot of the matched clinical record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_match: Option<ClinicalRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_notable: Option<bool>,

    /// Deep link into the external curation tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
}

/// Parsed positional coordinates of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalKey {
    pub chromosome: Chromosome,
    pub position: u64,
    pub variant_allele: String,
}

impl PositionalKey {
    /// Check this key against a clinical record whose chromosome has already
    /// been normalized (`None` when the record's label is unknown).
    #[must_use]
    pub fn matches(&self, record: &ClinicalRecord, record_chromosome: Option<Chromosome>) -> bool {
        record_chromosome == Some(self.chromosome)
            && record.position == self.position
            && record.has_alternate(&self.variant_allele)
    }
}

impl VariantReport {
    #[must_use]
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up a source field, treating JSON `null` as absent
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    fn scalar_field(&self, key: &str) -> Option<String> {
        match self.field(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn chromosome(&self) -> Option<String> {
        self.scalar_field(CHROMOSOME_FIELD)
    }

    #[must_use]
    pub fn variant_allele(&self) -> Option<String> {
        self.scalar_field(VARIANT_ALLELE_FIELD)
    }

    /// Parse the position field, which upstream producers write either as a
    /// string or as a number.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MalformedRecord` if the value is not a positive
    /// integer.
    pub fn position(&self) -> Option<Result<u64, RecordError>> {
        let value = self.field(POSITION_FIELD)?;
        let parsed = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Some(match parsed {
            Some(pos) if pos > 0 => Ok(pos),
            _ => Err(RecordError::malformed(format!(
                "{POSITION_FIELD} '{value}' is not a positive integer"
            ))),
        })
    }

    /// dbSNP identifiers listed on the report, in source order.
    ///
    /// Accepts an array of strings or a single comma/whitespace separated
    /// string; empty entries are dropped.
    #[must_use]
    pub fn cross_reference_ids(&self) -> Vec<String> {
        match self.field(CROSS_REFERENCE_FIELD) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.field(SUMMARY_FIELD).and_then(Value::as_str)
    }

    /// All three positional fields are present
    #[must_use]
    pub fn is_positionally_addressable(&self) -> bool {
        self.field(CHROMOSOME_FIELD).is_some()
            && self.field(POSITION_FIELD).is_some()
            && self.field(VARIANT_ALLELE_FIELD).is_some()
    }

    /// At least one dbSNP identifier is present
    #[must_use]
    pub fn is_identifier_addressable(&self) -> bool {
        !self.cross_reference_ids().is_empty()
    }

    /// Whether any join strategy can be attempted for this report
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.is_positionally_addressable() || self.is_identifier_addressable()
    }

    /// Parse the positional fields into a comparable key.
    ///
    /// Returns `None` when the report is not positionally addressable.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownChromosome` or
    /// `RecordError::MalformedRecord` when the fields are present but unusable.
    pub fn positional_key(&self) -> Option<Result<PositionalKey, RecordError>> {
        if !self.is_positionally_addressable() {
            return None;
        }

        Some(self.parse_positional_key())
    }

    fn parse_positional_key(&self) -> Result<PositionalKey, RecordError> {
        let chromosome = self.chromosome().ok_or_else(|| {
            RecordError::malformed(format!("{CHROMOSOME_FIELD} is not a scalar"))
        })?;
        let chromosome = normalize(&chromosome)?;
        let position = self.position().unwrap_or_else(|| {
            Err(RecordError::malformed(format!("{POSITION_FIELD} is missing")))
        })?;
        let variant_allele = self.variant_allele().ok_or_else(|| {
            RecordError::malformed(format!("{VARIANT_ALLELE_FIELD} is not a scalar"))
        })?;

        Ok(PositionalKey {
            chromosome,
            position,
            variant_allele,
        })
    }

    #[must_use]
    pub fn has_clinical_match(&self) -> bool {
        self.clinical_match.is_some()
    }
}
