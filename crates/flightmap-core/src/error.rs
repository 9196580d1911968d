use std::io;
use std::path::PathBuf;

use flightmap_parser::DecodeError;
use thiserror::Error;

use crate::store::Dataset;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read CSV header of {}: {source}", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no header line", .path.display())]
    EmptyHeader { path: PathBuf },

    #[error("failed to read CSV record at line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// A single line that did not make it into the output. Never fatal to the
/// rest of the file.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Read(#[from] SourceError),

    #[error("failed to parse CSV record at line {line} {record:?}: {source}")]
    Decode {
        line: u64,
        record: Vec<String>,
        #[source]
        source: DecodeError,
    },
}

impl RecordError {
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Read(SourceError::Read { line, .. }) | Self::Decode { line, .. } => Some(*line),
            Self::Read(_) => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to load {dataset}: {source}")]
pub struct LoadError {
    pub dataset: Dataset,
    #[source]
    pub source: SourceError,
}
