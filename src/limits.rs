//! Input size limits for the file pipelines.

use std::path::Path;

use crate::error::PipelineError;

/// Resource limits applied before an input file is read.
///
/// Both pipelines hold the whole file in memory, so a size cap is the only
/// guard against feeding them something enormous. All limits are optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input file size in bytes.
    pub max_input_bytes: Option<u64>,
}

impl Limits {
    /// No restrictions.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_input_bytes(mut self, max: u64) -> Self {
        self.max_input_bytes = Some(max);
        self
    }

    /// Check an input size against the limit.
    pub fn check_input(&self, path: &Path, size: u64) -> Result<(), PipelineError> {
        match self.max_input_bytes {
            Some(limit) if size > limit => Err(PipelineError::LimitExceeded {
                path: path.to_path_buf(),
                size,
                limit,
            }),
            _ => Ok(()),
        }
    }
}
