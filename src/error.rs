//! Error types for the codec, the image prober, and the file pipelines.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::ImageFormat;

/// Base64 text could not be turned back into bytes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The cleaned, padded text is not valid standard base64.
    #[error("malformed base64 ({cleaned_len} chars after cleanup): {source}")]
    Malformed {
        cleaned_len: usize,
        #[source]
        source: base64::DecodeError,
    },
}

/// Image introspection failed. Never fatal to a pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// Magic bytes match no known image format.
    #[error("unrecognized image format")]
    UnrecognizedFormat,
    /// Format was recognized but the header ended before the dimensions.
    #[error("{} header is truncated or has no dimensions", .0.name())]
    MissingDimensions(ImageFormat),
    /// The file to inspect could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file pipeline (encode or decode) could not complete.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// Input file does not exist. Nothing has been written.
    #[error("input file does not exist: {}", .0.display())]
    PathNotFound(PathBuf),
    /// Input file is larger than the configured limit.
    #[error("{} is {size} bytes, over the {limit} byte limit", .path.display())]
    LimitExceeded { path: PathBuf, size: u64, limit: u64 },
    /// Reading or writing a file failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The input text is not decodable base64.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl PipelineError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        PipelineError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = PipelineError::PathNotFound(PathBuf::from("missing.jpg"));
        assert_eq!(err.to_string(), "input file does not exist: missing.jpg");

        let err = PipelineError::io(
            "reading",
            "in.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "reading in.txt: denied");
    }

    #[test]
    fn probe_error_uses_format_tag() {
        let err = ProbeError::MissingDimensions(ImageFormat::Jpeg);
        assert_eq!(err.to_string(), "JPEG header is truncated or has no dimensions");
    }

    #[test]
    fn decode_error_keeps_source() {
        let err = crate::codec::decode("@@@@").unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
        let err = PipelineError::from(err);
        assert!(err.to_string().starts_with("malformed base64"));
    }
}
