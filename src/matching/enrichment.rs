use crate::core::clinical::{ClinicalRecord, Submission};
use crate::core::types::RecordError;
use crate::core::variant::VariantReport;

/// Base URL of the GenNotes variant editor
pub const GENNOTES_EDIT_URL: &str = "https://gennotes.herokuapp.com/genevieve-edit/";

/// Genome build tag used when none is configured
pub const DEFAULT_GENOME_BUILD: &str = "b37";

/// A record is notable when any submission on any allele carries an
/// informative significance code. Records without submissions are not.
#[must_use]
pub fn is_notable(record: &ClinicalRecord) -> bool {
    record.submissions().any(Submission::is_informative)
}

/// Fill in the derived fields of a matched report
pub fn enrich(report: &mut VariantReport, record: &ClinicalRecord, genome_build: &str) {
    report.is_notable = Some(is_notable(record));
    report.external_link = Some(GennotesLink::from_record(record, genome_build).to_url());
}

/// Deep link into the GenNotes editor for one clinical record.
///
/// Every value is percent-encoded; alternate alleles are encoded one by one
/// and joined with a literal comma so [`GennotesLink::parse`] can split them
/// back apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GennotesLink {
    pub genome_build: String,
    pub chromosome: String,
    pub position: u64,
    pub reference_allele: String,
    pub alternate_alleles: Vec<String>,
}

impl GennotesLink {
    #[must_use]
    pub fn from_record(record: &ClinicalRecord, genome_build: &str) -> Self {
        Self {
            genome_build: genome_build.to_string(),
            chromosome: record.chromosome.clone(),
            position: record.position,
            reference_allele: record.reference_allele.clone(),
            alternate_alleles: record.alternate_alleles.clone(),
        }
    }

    #[must_use]
    pub fn to_url(&self) -> String {
        let alts: Vec<String> = self
            .alternate_alleles
            .iter()
            .map(|a| urlencoding::encode(a).into_owned())
            .collect();

        format!(
            "{GENNOTES_EDIT_URL}?build={}&chrom={}&pos={}&ref_allele={}&var_allele={}",
            urlencoding::encode(&self.genome_build),
            urlencoding::encode(&self.chromosome),
            self.position,
            urlencoding::encode(&self.reference_allele),
            alts.join(","),
        )
    }

    /// Recover the link fields from a URL produced by [`GennotesLink::to_url`].
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MalformedRecord` if the URL does not point at the
    /// editor, a parameter is missing, or a value fails to decode.
    pub fn parse(url: &str) -> Result<Self, RecordError> {
        let query = url
            .strip_prefix(GENNOTES_EDIT_URL)
            .and_then(|rest| rest.strip_prefix('?'))
            .ok_or_else(|| RecordError::malformed(format!("Not a GenNotes editor link: {url}")))?;

        let mut genome_build = None;
        let mut chromosome = None;
        let mut position = None;
        let mut reference_allele = None;
        let mut alternate_alleles = None;

        for pair in query.split('&') {
            let Some((key, raw)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "build" => genome_build = Some(decode(raw)?),
                "chrom" => chromosome = Some(decode(raw)?),
                "pos" => {
                    position = Some(raw.parse::<u64>().map_err(|_| {
                        RecordError::malformed(format!("Invalid position in link: '{raw}'"))
                    })?);
                }
                "ref_allele" => reference_allele = Some(decode(raw)?),
                "var_allele" => {
                    let alts = if raw.is_empty() {
                        Vec::new()
                    } else {
                        raw.split(',').map(decode).collect::<Result<Vec<_>, _>>()?
                    };
                    alternate_alleles = Some(alts);
                }
                _ => {}
            }
        }

        let missing = |name: &str| RecordError::malformed(format!("Link is missing '{name}'"));
        Ok(Self {
            genome_build: genome_build.ok_or_else(|| missing("build"))?,
            chromosome: chromosome.ok_or_else(|| missing("chrom"))?,
            position: position.ok_or_else(|| missing("pos"))?,
            reference_allele: reference_allele.ok_or_else(|| missing("ref_allele"))?,
            alternate_alleles: alternate_alleles.ok_or_else(|| missing("var_allele"))?,
        })
    }
}

fn decode(raw: &str) -> Result<String, RecordError> {
    urlencoding::decode(raw)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| RecordError::malformed(format!("Invalid encoding in link: {e}")))
}
