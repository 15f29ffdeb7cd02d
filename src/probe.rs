//! Header-only image probing.
//!
//! Reads the format, dimensions and bit depth straight out of a file's leading
//! bytes. Nothing is decoded, so a truncated or partially corrupt payload
//! still reports whatever its header carries, and a payload that is not an
//! image at all is rejected without touching a codec.

use serde::Serialize;

use crate::error::ProbeError;
use crate::format::ImageFormat;

/// What a header parse managed to recover.
///
/// `width`, `height` and `bit_depth` stay `None` when the data ends before
/// the field, or when the header is malformed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ProbeResult {
    pub format: ImageFormat,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Bits per sample, when the header states it.
    pub bit_depth: Option<u8>,
    /// How far into the data the parser had to look.
    pub bytes_examined: usize,
}

impl ProbeResult {
    fn empty(format: ImageFormat) -> Self {
        ProbeResult {
            format,
            width: None,
            height: None,
            bit_depth: None,
            bytes_examined: 0,
        }
    }

    fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Both dimensions, if the header carried them.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width?, self.height?))
    }
}

/// Detect the format and parse whatever header fields are present.
pub fn probe(data: &[u8]) -> Result<ProbeResult, ProbeError> {
    let format = ImageFormat::detect(data).ok_or(ProbeError::UnrecognizedFormat)?;
    Ok(probe_format(data, format))
}

/// Parse header fields for a format the caller already knows.
///
/// Never fails; missing data shows up as `None` fields.
pub fn probe_format(data: &[u8], format: ImageFormat) -> ProbeResult {
    match format {
        ImageFormat::Jpeg => probe_jpeg(data),
        ImageFormat::Png => probe_png(data),
        ImageFormat::Gif => probe_gif(data),
        ImageFormat::WebP => probe_webp(data),
        ImageFormat::Bmp => probe_bmp(data),
        ImageFormat::Avif => probe_avif(data),
    }
}

fn be_u16(data: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_be_bytes(data.get(at..at + 2)?.try_into().ok()?))
}

fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_be_bytes(data.get(at..at + 4)?.try_into().ok()?))
}

fn le_u16(data: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_le_bytes(data.get(at..at + 2)?.try_into().ok()?))
}

fn le_u32(data: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(data.get(at..at + 4)?.try_into().ok()?))
}

fn le_u24(data: &[u8], at: usize) -> Option<u32> {
    let b = data.get(at..at + 3)?;
    Some(u32::from(b[0]) | u32::from(b[1]) << 8 | u32::from(b[2]) << 16)
}

// PNG: 8-byte signature, then IHDR (length, "IHDR", width, height, depth, ...).

fn probe_png(data: &[u8]) -> ProbeResult {
    let mut result = ProbeResult::empty(ImageFormat::Png);
    result.bytes_examined = data.len().min(25);

    if data.get(12..16) != Some(b"IHDR".as_slice()) {
        return result;
    }
    if let (Some(w), Some(h), Some(&depth)) = (be_u32(data, 16), be_u32(data, 20), data.get(24)) {
        result = result.with_size(w, h);
        result.bit_depth = Some(depth);
    }
    result
}

// GIF: 6-byte version header, then logical screen width/height as LE u16.

fn probe_gif(data: &[u8]) -> ProbeResult {
    let mut result = ProbeResult::empty(ImageFormat::Gif);
    result.bytes_examined = data.len().min(10);

    if let (Some(w), Some(h)) = (le_u16(data, 6), le_u16(data, 8)) {
        result = result.with_size(w.into(), h.into());
        result.bit_depth = Some(8);
    }
    result
}

// WebP: RIFF container, first chunk at offset 12 decides the layout.
//   VP8X: canvas size minus one, 24-bit LE at 24 and 27
//   VP8 : keyframe start code 9D 01 2A at 23, 14-bit LE sizes at 26 and 28
//   VP8L: signature 0x2F at 20, sizes minus one packed into 28 bits at 21

fn probe_webp(data: &[u8]) -> ProbeResult {
    let mut result = ProbeResult::empty(ImageFormat::WebP);
    result.bytes_examined = data.len().min(30);

    match data.get(12..16) {
        Some(b"VP8X") => {
            if let (Some(w), Some(h)) = (le_u24(data, 24), le_u24(data, 27)) {
                result = result.with_size(w + 1, h + 1);
                result.bit_depth = Some(8);
            }
        }
        Some(b"VP8 ") => {
            if data.get(23..26) == Some([0x9D, 0x01, 0x2A].as_slice()) {
                if let (Some(w), Some(h)) = (le_u16(data, 26), le_u16(data, 28)) {
                    result = result.with_size((w & 0x3FFF).into(), (h & 0x3FFF).into());
                    result.bit_depth = Some(8);
                }
            }
        }
        Some(b"VP8L") => {
            if data.get(20) == Some(&0x2F) {
                if let Some(bits) = le_u32(data, 21) {
                    let w = (bits & 0x3FFF) + 1;
                    let h = ((bits >> 14) & 0x3FFF) + 1;
                    result = result.with_size(w, h);
                    result.bit_depth = Some(8);
                }
            }
        }
        _ => {}
    }
    result
}

// JPEG: walk marker segments after SOI until a SOFn segment, which holds
// precision, height and width. Scanning stops at SOS or EOI.

fn is_sof(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC)
}

fn probe_jpeg(data: &[u8]) -> ProbeResult {
    let mut result = ProbeResult::empty(ImageFormat::Jpeg);
    let mut pos = 2;

    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            break;
        }
        // Fill bytes: any number of FF before the marker code.
        while pos + 1 < data.len() && data[pos + 1] == 0xFF {
            pos += 1;
        }
        let Some(&marker) = data.get(pos + 1) else {
            break;
        };
        pos += 2;

        match marker {
            0x00 | 0x01 | 0xD0..=0xD7 => continue,
            0xD9 | 0xDA => break,
            _ => {}
        }

        let Some(seg_len) = be_u16(data, pos) else {
            break;
        };
        if is_sof(marker) {
            if let (Some(&precision), Some(h), Some(w)) =
                (data.get(pos + 2), be_u16(data, pos + 3), be_u16(data, pos + 5))
            {
                result = result.with_size(w.into(), h.into());
                result.bit_depth = Some(precision);
                result.bytes_examined = pos + 7;
                return result;
            }
            break;
        }
        if seg_len < 2 {
            break;
        }
        pos += usize::from(seg_len);
    }

    result.bytes_examined = pos.min(data.len());
    result
}

// BMP: 14-byte file header, then a DIB header whose size selects the layout.
// The 12-byte OS/2 core header stores u16 sizes; everything newer stores
// signed i32 sizes, with a negative height meaning top-down rows.

fn probe_bmp(data: &[u8]) -> ProbeResult {
    let mut result = ProbeResult::empty(ImageFormat::Bmp);
    result.bytes_examined = data.len().min(30);

    let Some(dib_len) = le_u32(data, 14) else {
        return result;
    };
    if dib_len == 12 {
        if let (Some(w), Some(h), Some(bpp)) = (le_u16(data, 18), le_u16(data, 20), le_u16(data, 24))
        {
            result = result.with_size(w.into(), h.into());
            result.bit_depth = u8::try_from(bpp).ok();
        }
    } else if let (Some(w), Some(h), Some(bpp)) =
        (le_u32(data, 18), le_u32(data, 22), le_u16(data, 28))
    {
        let w = (w as i32).unsigned_abs();
        let h = (h as i32).unsigned_abs();
        result = result.with_size(w, h);
        result.bit_depth = u8::try_from(bpp).ok();
    }
    result
}

// AVIF (ISOBMFF): top-level `meta` (a FullBox) → `iprp` → `ipco` → `ispe`,
// where `ispe` is version/flags followed by BE u32 width and height.

fn probe_avif(data: &[u8]) -> ProbeResult {
    let mut result = ProbeResult::empty(ImageFormat::Avif);

    let Some((meta, meta_end)) = find_box(data, b"meta") else {
        result.bytes_examined = data.len();
        return result;
    };
    result.bytes_examined = meta_end.min(data.len());

    let ispe = meta
        .get(4..)
        .and_then(|inner| find_box(inner, b"iprp"))
        .and_then(|(iprp, _)| find_box(iprp, b"ipco"))
        .and_then(|(ipco, _)| find_box(ipco, b"ispe"));
    if let Some((ispe, _)) = ispe {
        if let (Some(w), Some(h)) = (be_u32(ispe, 4), be_u32(ispe, 8)) {
            result = result.with_size(w, h);
        }
    }
    result
}

/// Find a box by type among sibling boxes. Returns (content, end offset).
fn find_box<'a>(data: &'a [u8], box_type: &[u8; 4]) -> Option<(&'a [u8], usize)> {
    let mut pos = 0usize;

    while pos + 8 <= data.len() {
        let size = be_u32(data, pos)?;
        let btype = &data[pos + 4..pos + 8];

        let (header_len, box_len) = match size {
            0 => (8, data.len() - pos),
            1 => {
                let hi = be_u32(data, pos + 8)?;
                let lo = be_u32(data, pos + 12)?;
                let ext = u64::from(hi) << 32 | u64::from(lo);
                (16, usize::try_from(ext).ok()?)
            }
            n => (8, n as usize),
        };
        if box_len < header_len {
            return None;
        }

        let start = pos + header_len;
        let end = pos.checked_add(box_len)?;
        if btype == box_type {
            let content_end = end.min(data.len());
            return data.get(start..content_end).map(|c| (c, end));
        }
        pos = end;
    }
    None
}
