//! Image file → base64 text file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::PipelineError;
use crate::fileio;
use crate::limits::Limits;
use crate::{ImageFormat, codec};

/// Output path used when none is given.
pub const DEFAULT_ENCODE_OUTPUT: &str = "output.txt";

/// Summary of a finished encode.
#[derive(Clone, Debug, Serialize)]
pub struct EncodeReport {
    /// Absolute path of the image that was read.
    pub input_path: PathBuf,
    /// Absolute path of the text file that was written.
    pub output_path: PathBuf,
    pub input_bytes: usize,
    /// Length of the base64 text, which is pure ASCII.
    pub encoded_chars: usize,
}

/// Encode job builder.
///
/// # Example
///
/// ```no_run
/// use b64image::EncodeJob;
///
/// let report = EncodeJob::new("photo.jpg").with_output("photo.txt").run()?;
/// println!("{} chars", report.encoded_chars);
/// # Ok::<(), b64image::PipelineError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EncodeJob {
    input: PathBuf,
    output: PathBuf,
    limits: Limits,
}

impl EncodeJob {
    /// Encode `input` into [`DEFAULT_ENCODE_OUTPUT`].
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_ENCODE_OUTPUT),
            limits: Limits::none(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Read, encode, write. A missing input fails before anything is written.
    pub fn run(self) -> Result<EncodeReport, PipelineError> {
        let payload = fileio::read_bytes(&self.input, &self.limits)?;
        if ImageFormat::detect(&payload).is_none() {
            debug!(path = %self.input.display(), "input has no recognized image signature");
        }

        let encoded = codec::encode(&payload);
        fileio::write(&self.output, &encoded)?;

        Ok(EncodeReport {
            input_path: fileio::resolve(&self.input),
            output_path: fileio::resolve(&self.output),
            input_bytes: payload.len(),
            encoded_chars: encoded.len(),
        })
    }
}
