//! Whitespace-tolerant base64 codec.
//!
//! Encoding always produces unwrapped text in the standard alphabet with `=`
//! padding. Decoding accepts text that has been line-wrapped, pasted with
//! stray spaces, or carrying too little or too much `=` padding, and repairs
//! it before handing it to the standard-alphabet decoder.

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::{Engine, alphabet};

use crate::error::DecodeError;

/// Padding character appended during repair.
pub const PAD: char = '=';

/// Standard alphabet, canonical padding, stray bits after the last byte ignored.
const DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Encode a payload as standard base64 text with no embedded whitespace.
pub fn encode(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

/// Decode base64 text, ignoring whitespace anywhere and normalizing the
/// trailing padding.
///
/// Missing or excess `=` at the end is fixed up, and non-zero bits after the
/// last encoded byte are ignored. Characters outside the standard alphabet
/// and a cleaned length of `4k + 1` are rejected.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let mut cleaned = strip_whitespace(text);
    cleaned.truncate(cleaned.trim_end_matches(PAD).len());
    let padded = repair_padding(cleaned);
    DECODER
        .decode(padded.as_bytes())
        .map_err(|source| DecodeError::Malformed {
            cleaned_len: padded.len(),
            source,
        })
}

/// Remove every whitespace character, not just the leading and trailing ones.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Number of `=` characters needed to bring `len` up to a multiple of 4.
pub fn padding_needed(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Append the padding a cleaned base64 string is missing.
pub fn repair_padding(mut cleaned: String) -> String {
    let pad = padding_needed(cleaned.len());
    cleaned.extend(std::iter::repeat_n(PAD, pad));
    cleaned
}
