//! The [`CoverageError`] `enum` definition and error messages.
//!
use crate::Position;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// The [`CoverageError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum CoverageError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Source '{path}' is unavailable: {reason}")]
    SourceUnavailable { path: String, reason: String },
    #[error("Signal file read error: {0}")]
    SignalRead(String),
    #[error("TSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    // Parsing related errors
    #[error("Integer parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("Float parsing error: {0}")]
    ParseFloatError(#[from] ParseFloatError),
    #[error("Depth record has {found} columns, expected {expected}.\nLine: {line}")]
    MalformedDepthRecord {
        expected: usize,
        found: usize,
        line: String,
    },
    #[error("Invalid strand '{0}': must be either '+', '-', '.' or '*'")]
    InvalidStrand(String),
    #[error("Invalid region string '{0}': expected 'seqname:start-end' or 'seqname:start-end:strand'")]
    InvalidRegionString(String),
    #[error("Invalid log transform '{0}': expected one of '2', '10', 'e'")]
    InvalidLogTransform(String),

    // Region errors
    #[error("Range invalid: start ({0}) must be less than end ({1})")]
    InvalidGenomicRange(Position, Position),
    #[error("Sequence '{seqname}' is not in the index of '{path}'")]
    RegionOutOfBounds { seqname: String, path: String },

    // Sample label errors
    #[error("The number of columns [{columns}] must equal the number of labels [{labels}]")]
    LabelMismatch { columns: usize, labels: usize },
    #[error("Sample label '{0}' is duplicated")]
    DuplicateLabel(String),
    #[error("No samples to load for region {region} (requested: {requested:?})")]
    EmptyLabelSet {
        region: String,
        requested: Vec<String>,
    },

    #[cfg(feature = "ndarray")]
    #[error("Could not write .npy file: {0}")]
    NpyWriteError(#[from] ndarray_npy::WriteNpyError),
}
