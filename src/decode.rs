//! Base64 text file → binary file, with a best-effort image preview.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::fileio;
use crate::info::{self, ImageInfo};
use crate::limits::Limits;
use crate::{ImageFormat, codec};

/// Output path used when none is given, relative to the working directory.
pub const DEFAULT_DECODE_OUTPUT: &str = "debug_image.jpg";

/// Leading bytes shown in the report.
pub const HEAD_LEN: usize = 4;
/// Trailing bytes shown in the report.
pub const TAIL_LEN: usize = 2;

/// Result of inspecting the written file as an image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Preview {
    /// The header was readable.
    Image(ImageInfo),
    /// Inspection failed; the decode itself still succeeded.
    Unavailable { reason: String },
    /// Inspection was turned off.
    Skipped,
}

impl Preview {
    pub fn image(&self) -> Option<&ImageInfo> {
        match self {
            Preview::Image(info) => Some(info),
            _ => None,
        }
    }
}

/// JPEG start/end marker check for payloads that begin like a JPEG.
///
/// A payload cut short in transfer keeps its SOI but loses the trailing EOI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct JpegMarkers {
    /// Starts with `FF D8`.
    pub soi: bool,
    /// Ends with `FF D9`.
    pub eoi: bool,
}

impl JpegMarkers {
    /// Some only when the payload starts with a JPEG SOI marker.
    pub fn check(payload: &[u8]) -> Option<Self> {
        payload.starts_with(&[0xFF, 0xD8]).then(|| JpegMarkers {
            soi: true,
            eoi: payload.ends_with(&[0xFF, 0xD9]),
        })
    }

    pub fn is_complete(&self) -> bool {
        self.soi && self.eoi
    }
}

/// Summary of a finished decode.
#[derive(Clone, Debug, Serialize)]
pub struct DecodeReport {
    /// Where the bytes were written, as given to the job.
    pub output_path: PathBuf,
    pub byte_len: usize,
    /// Lower-case hex of up to the first [`HEAD_LEN`] bytes.
    pub head_hex: String,
    /// Lower-case hex of up to the last [`TAIL_LEN`] bytes.
    pub tail_hex: String,
    pub jpeg_markers: Option<JpegMarkers>,
    pub preview: Preview,
}

impl DecodeReport {
    fn new(output_path: PathBuf, payload: &[u8], preview: Preview) -> Self {
        let head = &payload[..payload.len().min(HEAD_LEN)];
        let tail = &payload[payload.len().saturating_sub(TAIL_LEN)..];
        DecodeReport {
            output_path,
            byte_len: payload.len(),
            head_hex: hex(head),
            tail_hex: hex(tail),
            jpeg_markers: JpegMarkers::check(payload),
            preview,
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode job builder.
///
/// # Example
///
/// ```no_run
/// use b64image::DecodeJob;
///
/// let report = DecodeJob::new("output.txt").with_output("restored.jpg").run()?;
/// if let Some(image) = report.preview.image() {
///     println!("{} {}x{}", image.format, image.width, image.height);
/// }
/// # Ok::<(), b64image::PipelineError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeJob {
    input: PathBuf,
    output: PathBuf,
    introspect: bool,
    limits: Limits,
}

impl DecodeJob {
    /// Decode `input` into [`DEFAULT_DECODE_OUTPUT`], with preview enabled.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_DECODE_OUTPUT),
            introspect: true,
            limits: Limits::none(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Turn the image preview on or off.
    pub fn with_introspection(mut self, enabled: bool) -> Self {
        self.introspect = enabled;
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

    /// Read, decode, write, then preview.
    ///
    /// Read and decode failures are returned. Preview failures end up in
    /// [`DecodeReport::preview`] and never fail the job.
    pub fn run(self) -> Result<DecodeReport, PipelineError> {
        let text = fileio::read_text(&self.input, &self.limits)?;
        let payload = codec::decode(&text)?;
        debug!(chars = text.len(), bytes = payload.len(), "decoded base64");
        fileio::write(&self.output, &payload)?;

        let preview = if self.introspect {
            preview(&self.output)
        } else {
            Preview::Skipped
        };
        Ok(DecodeReport::new(self.output, &payload, preview))
    }
}

fn preview(path: &Path) -> Preview {
    match info::from_path(path) {
        Ok(image) => {
            let named = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(ImageFormat::from_extension);
            if named.is_some_and(|f| f != image.format) {
                warn!(
                    path = %path.display(),
                    format = %image.format,
                    "decoded image format does not match the output extension"
                );
            }
            Preview::Image(image)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "image preview unavailable");
            Preview::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_input(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("input.txt");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn decodes_known_payload() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "/9j/4EFCQ0RFRg==\n");
        let output = dir.path().join("out.jpg");

        let report = DecodeJob::new(&input).with_output(&output).run().unwrap();

        let written = fs::read(&output).unwrap();
        assert_eq!(written, b"\xFF\xD8\xFF\xE0ABCDEF");
        assert_eq!(report.byte_len, written.len());
        assert_eq!(report.head_hex, "ffd8ffe0");
        assert_eq!(report.tail_hex, "4546");
        assert_eq!(report.output_path, output);
        assert_eq!(report.jpeg_markers, Some(JpegMarkers { soi: true, eoi: false }));
        // SOI and APP0 only: recognized as JPEG but no frame header.
        assert!(matches!(report.preview, Preview::Unavailable { ref reason } if reason.contains("JPEG")));
    }

    #[test]
    fn wrapped_and_unpadded_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "  /9j/\r\n4EFC Q0RF\n\tRg\n");
        let output = dir.path().join("out.bin");

        let report = DecodeJob::new(&input)
            .with_output(&output)
            .with_introspection(false)
            .run()
            .unwrap();

        assert_eq!(fs::read(&output).unwrap(), b"\xFF\xD8\xFF\xE0ABCDEF");
        assert_eq!(report.preview, Preview::Skipped);
    }

    #[test]
    fn malformed_input_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "/9j/4E$CQ0RFRg==");
        let output = dir.path().join("out.jpg");

        let err = DecodeJob::new(&input).with_output(&output).run().unwrap_err();

        assert!(matches!(err, PipelineError::Decode(_)));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = DecodeJob::new(dir.path().join("absent.txt"))
            .with_output(dir.path().join("out.jpg"))
            .run()
            .unwrap_err();
        assert!(matches!(err, PipelineError::PathNotFound(_)));
    }

    #[test]
    fn real_image_header_is_previewed() {
        let dir = tempfile::tempdir().unwrap();
        let gif = b"GIF89a\x40\x01\xF0\x00\x00\x00\x00;";
        let input = write_input(dir.path(), &codec::encode(gif));
        let output = dir.path().join("out.gif");

        let report = DecodeJob::new(&input).with_output(&output).run().unwrap();

        let image = report.preview.image().unwrap();
        assert_eq!(image.format, ImageFormat::Gif);
        assert_eq!(image.dimensions(), (320, 240));
        assert_eq!(report.jpeg_markers, None);
    }

    #[test]
    fn empty_payload_has_empty_hex() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "\n");
        let output = dir.path().join("out.jpg");

        let report = DecodeJob::new(&input).with_output(&output).run().unwrap();

        assert_eq!(report.byte_len, 0);
        assert_eq!(report.head_hex, "");
        assert_eq!(report.tail_hex, "");
        assert!(matches!(report.preview, Preview::Unavailable { .. }));
        assert_eq!(fs::metadata(&output).unwrap().len(), 0);
    }

    #[test]
    fn single_byte_payload() {
        let report = DecodeReport::new(PathBuf::from("x"), &[0xAB], Preview::Skipped);
        assert_eq!(report.head_hex, "ab");
        assert_eq!(report.tail_hex, "ab");
    }

    #[test]
    fn default_output_is_fixed_name() {
        let job = DecodeJob::new("anything.txt");
        assert_eq!(job.output_path(), Path::new(DEFAULT_DECODE_OUTPUT));
        assert_eq!(DecodeJob::new("other/name.b64").output_path(), Path::new("debug_image.jpg"));
    }

    #[test]
    fn jpeg_marker_check() {
        assert_eq!(JpegMarkers::check(b"PNG"), None);
        let full = JpegMarkers::check(&[0xFF, 0xD8, 0x00, 0xFF, 0xD9]).unwrap();
        assert!(full.is_complete());
        let cut = JpegMarkers::check(&[0xFF, 0xD8, 0x00]).unwrap();
        assert!(!cut.is_complete());
    }

    #[test]
    fn preview_serializes_with_status_tag() {
        let json = serde_json::to_value(Preview::Unavailable {
            reason: "nope".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["reason"], "nope");
    }
}
