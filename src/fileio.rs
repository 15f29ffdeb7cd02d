//! Whole-file reads and writes shared by the encode and decode jobs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PipelineError;
use crate::limits::Limits;

/// Fail early with `PathNotFound` and apply the size limit.
fn check_input(path: &Path, limits: &Limits) -> Result<(), PipelineError> {
    if !path.exists() {
        return Err(PipelineError::PathNotFound(path.to_path_buf()));
    }
    let size = fs::metadata(path)
        .map_err(|e| PipelineError::io("inspecting", path, e))?
        .len();
    limits.check_input(path, size)
}

pub(crate) fn read_bytes(path: &Path, limits: &Limits) -> Result<Vec<u8>, PipelineError> {
    check_input(path, limits)?;
    let data = fs::read(path).map_err(|e| PipelineError::io("reading", path, e))?;
    debug!(path = %path.display(), bytes = data.len(), "read input");
    Ok(data)
}

/// Read a file that must be valid UTF-8.
pub(crate) fn read_text(path: &Path, limits: &Limits) -> Result<String, PipelineError> {
    check_input(path, limits)?;
    let text = fs::read_to_string(path).map_err(|e| PipelineError::io("reading", path, e))?;
    debug!(path = %path.display(), chars = text.len(), "read input text");
    Ok(text)
}

pub(crate) fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), PipelineError> {
    let contents = contents.as_ref();
    fs::write(path, contents).map_err(|e| PipelineError::io("writing", path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

/// Absolute form of a path, resolving symlinks when the path exists.
pub(crate) fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
