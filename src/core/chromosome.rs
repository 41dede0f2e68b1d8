use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::types::RecordError;

const CHROM_X: u8 = 23;
const CHROM_Y: u8 = 24;
const CHROM_MT: u8 = 25;

/// Canonical key for a human chromosome.
///
/// The key is an ordinal: autosomes map to 1-22, then X, Y and the
/// mitochondrial genome. Two labels naming the same chromosome always produce
/// the same key regardless of spelling, so keys can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Chromosome(u8);

impl Chromosome {
    /// Parse a chromosome label in any accepted spelling.
    ///
    /// Accepted: an optional `chr` prefix (any case) followed by `1`-`22`,
    /// `X`, `Y`, `M` or `MT` (any case). Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownChromosome` if the label names no known
    /// chromosome.
    pub fn parse(label: &str) -> Result<Self, RecordError> {
        let lower = label.trim().to_ascii_lowercase();
        let bare = lower.strip_prefix("chr").unwrap_or(&lower);

        let ordinal = match bare {
            "x" => CHROM_X,
            "y" => CHROM_Y,
            "m" | "mt" => CHROM_MT,
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                match digits.parse::<u8>() {
                    Ok(n @ 1..=22) => n,
                    _ => return Err(RecordError::UnknownChromosome(label.to_string())),
                }
            }
            _ => return Err(RecordError::UnknownChromosome(label.to_string())),
        };

        Ok(Self(ordinal))
    }

    /// Ordinal position of this chromosome (1-22 autosomes, 23 X, 24 Y, 25 MT)
    #[must_use]
    pub fn ordinal(self) -> u8 {
        self.0
    }
}

/// Normalize a chromosome label to its canonical key.
///
/// # Errors
///
/// Returns `RecordError::UnknownChromosome` for unrecognised labels.
pub fn normalize(label: &str) -> Result<Chromosome, RecordError> {
    Chromosome::parse(label)
}

impl FromStr for Chromosome {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Displays the NCBI spelling (`1`, `X`, `MT`)
impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            CHROM_X => write!(f, "X"),
            CHROM_Y => write!(f, "Y"),
            CHROM_MT => write!(f, "MT"),
            n => write!(f, "{n}"),
        }
    }
}
