//! Loading job postings and candidate profiles from JSON or CSV exports.

mod parser;

pub use parser::parse_instant;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::compatibility::domain::{CandidateProfile, JobPosting};

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, message: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read catalog: {}", err),
            CatalogError::Json(err) => write!(f, "invalid JSON catalog data: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid CSV catalog data: {}", err),
            CatalogError::InvalidRow { line, message } => {
                write!(f, "invalid catalog row on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// In-memory snapshot of the postings a profile is ranked against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobCatalog {
    jobs: Vec<JobPosting>,
}

impl JobCatalog {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self { jobs }
    }

    /// Reads `.csv` files as CSV and everything else as a JSON array.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_json_reader(file)
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let jobs: Vec<JobPosting> = serde_json::from_reader(reader)?;
        Ok(Self::new(jobs))
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(Self::new(parser::parse_postings(reader)?))
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn into_jobs(self) -> Vec<JobPosting> {
        self.jobs
    }

    pub fn find(&self, id: &str) -> Option<&JobPosting> {
        let id = id.trim();
        self.jobs.iter().find(|job| job.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<CandidateProfile, CatalogError> {
    let file = BufReader::new(File::open(path)?);
    profile_from_reader(file)
}

pub fn profile_from_reader<R: Read>(reader: R) -> Result<CandidateProfile, CatalogError> {
    Ok(serde_json::from_reader(reader)?)
}
