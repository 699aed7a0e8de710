mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use super::domain::Award;
use parser::ParseFailure;

#[derive(Debug)]
pub enum AwardImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for AwardImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AwardImportError::Io(err) => write!(f, "failed to read award catalogue: {}", err),
            AwardImportError::Csv(err) => write!(f, "invalid award CSV data: {}", err),
            AwardImportError::InvalidRow { line, reason } => {
                write!(f, "award CSV line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for AwardImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AwardImportError::Io(err) => Some(err),
            AwardImportError::Csv(err) => Some(err),
            AwardImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for AwardImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AwardImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl AwardImportError {
    fn from_parse(failure: ParseFailure) -> Self {
        match failure {
            ParseFailure::Csv(err) => Self::Csv(err),
            ParseFailure::Row(row) => Self::InvalidRow {
                line: row.line,
                reason: row.reason,
            },
        }
    }
}

/// Bulk loader for admin-maintained award spreadsheets.
pub struct AwardCsvImporter;

impl AwardCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Award>, AwardImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let awards = Self::from_reader(file)?;
        info!(path = %path.display(), count = awards.len(), "award catalogue imported");
        Ok(awards)
    }

    /// Parse awards in file order. A repeated ID keeps its first row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Award>, AwardImportError> {
        let mut seen = HashSet::new();
        let mut awards = Vec::new();

        for award in parser::parse_awards(reader).map_err(AwardImportError::from_parse)? {
            if !seen.insert(award.id.clone()) {
                warn!(award_id = %award.id, "skipping duplicate award row");
                continue;
            }
            awards.push(award);
        }

        Ok(awards)
    }
}
