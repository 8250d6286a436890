//! Loading of stored reference result sets.
//!
//! A reference file is a JSON array of `{"text", "bbox", "confidence"?}` objects, the
//! same layout `ocrcheck recognize` prints. It is only ever read.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::element::TextElement;
use crate::error::{CheckError, Result};

/// Fails with [`CheckError::ReferenceFileMissing`] when `path` is not an existing file.
pub fn ensure_reference_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    Err(CheckError::ReferenceFileMissing {
        path: path.to_path_buf(),
        absolute: absolute_path(path),
    })
}

pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<Vec<TextElement>> {
    let path = path.as_ref();
    ensure_reference_exists(path)?;

    let contents = std::fs::read_to_string(path).map_err(|e| CheckError::ReferenceParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let elements = parse_reference(&contents).map_err(|e| CheckError::ReferenceParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    info!(path = %path.display(), elements = elements.len(), "loaded reference file");
    Ok(elements)
}

pub fn parse_reference(contents: &str) -> serde_json::Result<Vec<TextElement>> {
    serde_json::from_str(contents)
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
