//! Decoding of the downloaded list: comment stripping and base64.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::error::FwdListError;

/// Standard alphabet; the published list is padded but mirrors are not
/// always consistent about it.
const LIST_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Marker for comment lines in the raw (encoded) list
const COMMENT_MARKER: char = '!';

/// Strip comment lines, base64-decode the rest and return it as UTF-8 text.
///
/// The payload is usually wrapped at 64 columns, so all whitespace is
/// removed before decoding.
///
/// # Examples
/// ```
/// use fwdlist::decoder::decode;
/// let raw = "! Checksum: abc\naGVsbG8=\n";
/// assert_eq!(decode(raw).unwrap(), "hello");
/// ```
pub fn decode(raw: &str) -> Result<String, FwdListError> {
    let payload: String = raw
        .lines()
        .filter(|line| !line.trim_start().starts_with(COMMENT_MARKER))
        .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
        .collect();

    let bytes = LIST_ENGINE
        .decode(payload.as_bytes())
        .map_err(|e| FwdListError::Decode(format!("invalid base64: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| FwdListError::Decode(format!("invalid UTF-8: {}", e)))
}
