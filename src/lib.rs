//! # b64image
//!
//! Move image files through text-only channels as base64, and check what
//! came out the other end.
//!
//! - [`codec`] encodes bytes to standard base64 and decodes text that may be
//!   line-wrapped, sprinkled with whitespace, or missing its `=` padding.
//! - [`EncodeJob`] and [`DecodeJob`] run the file-to-file pipelines.
//! - [`info::from_bytes`] reads format and dimensions from an image header
//!   without decoding pixels.
//!
//! ## Usage
//!
//! ```rust
//! use b64image::codec;
//!
//! let text = codec::encode(b"\xFF\xD8\xFF\xE0ABCDEF");
//! assert_eq!(text, "/9j/4EFCQ0RFRg==");
//!
//! let wrapped = "/9j/4EFC\nQ0RFRg";
//! assert_eq!(codec::decode(wrapped)?, b"\xFF\xD8\xFF\xE0ABCDEF");
//! # Ok::<(), b64image::DecodeError>(())
//! ```

#![forbid(unsafe_code)]

pub mod codec;
mod decode;
mod encode;
mod error;
mod fileio;
mod format;
pub mod info;
mod limits;
pub mod probe;

pub use decode::{
    DEFAULT_DECODE_OUTPUT, DecodeJob, DecodeReport, HEAD_LEN, JpegMarkers, Preview, TAIL_LEN,
};
pub use encode::{DEFAULT_ENCODE_OUTPUT, EncodeJob, EncodeReport};
pub use error::{DecodeError, PipelineError, ProbeError};
pub use format::ImageFormat;
pub use info::ImageInfo;
pub use limits::Limits;
pub use probe::ProbeResult;
