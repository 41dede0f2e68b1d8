use thiserror::Error;

/// Why a single record cannot take part in a comparison.
///
/// Neither variant is fatal for a run: the matching engine degrades the
/// affected record to "does not match" and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Unknown chromosome: '{0}'")]
    UnknownChromosome(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

impl RecordError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }
}
