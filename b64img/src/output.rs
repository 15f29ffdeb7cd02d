//! Human-readable report text.

use std::fmt::Write as _;

use b64image::{DecodeReport, EncodeReport, HEAD_LEN, JpegMarkers, Preview, TAIL_LEN};

/// Group digits in threes with commas: `1234567` → `1,234,567`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn encode_summary(report: &EncodeReport) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Encoding complete");
    let _ = writeln!(s, "Input image:  {}", report.input_path.display());
    let _ = writeln!(s, "Output text:  {}", report.output_path.display());
    let _ = writeln!(
        s,
        "Characters:   {} chars",
        group_thousands(report.encoded_chars)
    );
    s
}

fn marker_line(markers: &JpegMarkers) -> String {
    let state = |ok: bool| if ok { "ok" } else { "missing" };
    format!(
        "JPEG markers: SOI {}, EOI {}",
        state(markers.soi),
        state(markers.eoi)
    )
}

pub fn decode_summary(report: &DecodeReport) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Saved image to: {}", report.output_path.display());
    let _ = writeln!(s, "Size: {} bytes", report.byte_len);
    let _ = writeln!(s, "First {HEAD_LEN} bytes: {}", report.head_hex);
    let _ = writeln!(s, "Last {TAIL_LEN} bytes: {}", report.tail_hex);
    if let Some(markers) = &report.jpeg_markers {
        let _ = writeln!(s, "{}", marker_line(markers));
    }
    match &report.preview {
        Preview::Image(image) => {
            let _ = writeln!(s, "Format: {}", image.format);
            let _ = writeln!(s, "Dimensions: ({}, {})", image.width, image.height);
        }
        Preview::Unavailable { reason } => {
            let _ = writeln!(s, "Warning: could not open image: {reason}");
        }
        Preview::Skipped => {}
    }
    s
}
