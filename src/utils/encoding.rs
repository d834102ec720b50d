use crate::error::{HwpError, Result};
use encoding_rs::UTF_16LE;

/// Decode a raw UTF-16LE byte buffer (used by the `PrvText` preview stream).
pub fn utf16le_to_string(data: &[u8]) -> Result<String> {
    let (cow, _, had_errors) = UTF_16LE.decode(data);
    if had_errors {
        return Err(HwpError::Encoding("invalid UTF-16LE data".to_string()));
    }
    Ok(cow.into_owned())
}
