//! Error types for ocrcheck.

use std::fmt;
use std::path::PathBuf;

use ocrcheck_ocr::OcrError;
use thiserror::Error;

/// Result type for ocrcheck operations.
pub type Result<T> = std::result::Result<T, CheckError>;

/// Which of the two compared sequences an element came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Current,
    Reference,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Current => f.write_str("current"),
            Side::Reference => f.write_str("reference"),
        }
    }
}

/// Position of an element inside one of the compared sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLocation {
    pub side: Side,
    pub index: usize,
}

impl fmt::Display for ElementLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} element {}", self.side, self.index + 1)
    }
}

fn location_suffix(location: &Option<ElementLocation>) -> String {
    location
        .map(|l| format!(" in {l}"))
        .unwrap_or_default()
}

/// Error type for ocrcheck operations.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The reference path does not resolve to an existing file.
    #[error(
        "reference file not found: {} (absolute path: {}); check that the file exists and that its name is spelled correctly, letter case included",
        .path.display(),
        .absolute.display()
    )]
    ReferenceFileMissing { path: PathBuf, absolute: PathBuf },

    /// The target image does not exist.
    #[error("image not found: {}", .0.display())]
    ImageFileMissing(PathBuf),

    /// The reference file exists but is not a valid list of text elements.
    #[error("failed to load reference {}: {message}", .path.display())]
    ReferenceParseError { path: PathBuf, message: String },

    /// A bounding box without exactly four corners.
    #[error(
        "malformed bounding box{}: expected 4 points, got {points}",
        location_suffix(.location)
    )]
    MalformedBoundingBox {
        points: usize,
        location: Option<ElementLocation>,
    },

    /// Scoring parameters that cannot produce scores in [0, 1].
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("recognition failed: {0}")]
    Recognition(#[from] OcrError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CheckError {
    /// Attach the element position to a bounding box error; other errors pass through.
    pub fn at(self, side: Side, index: usize) -> Self {
        match self {
            CheckError::MalformedBoundingBox { points, .. } => CheckError::MalformedBoundingBox {
                points,
                location: Some(ElementLocation { side, index }),
            },
            other => other,
        }
    }
}
