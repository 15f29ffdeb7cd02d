//! Image metadata for a whole file: format plus pixel dimensions.

use std::path::Path;

use serde::Serialize;

use crate::error::ProbeError;
use crate::format::ImageFormat;
use crate::probe;

/// Format and dimensions of an image, as stated by its header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bit_depth: Option<u8>,
}

impl ImageInfo {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Probe in-memory data. Fails unless both dimensions are present.
pub fn from_bytes(data: &[u8]) -> Result<ImageInfo, ProbeError> {
    let result = probe::probe(data)?;
    let (width, height) = result
        .dimensions()
        .ok_or(ProbeError::MissingDimensions(result.format))?;
    Ok(ImageInfo {
        format: result.format,
        width,
        height,
        bit_depth: result.bit_depth,
    })
}

/// Read a file and probe it.
pub fn from_path(path: &Path) -> Result<ImageInfo, ProbeError> {
    let data = std::fs::read(path).map_err(|source| ProbeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_bytes(&data)
}
