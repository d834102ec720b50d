//! Version/format triage (SPEC_FULL §B): sniff a byte buffer and decide
//! which of the three input paths (HWP 5.x binary, HWPX, legacy HWP 3.x)
//! should handle it, without committing to a full parse.

use std::fs;
use std::path::Path;

use crate::error::Result;

const HWP5_SIGNATURE: &[u8] = b"HWP Document File";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const HWP3_SIGNATURE: &[u8] = b"HWP Document File V3.00 \x1a\x01\x02\x03\x04\x05";
const OLE2_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Hwp5,
    Hwpx,
    Hwp3,
    Unknown,
}

/// Sniffs a file on disk by reading just enough of its head to classify it.
pub fn sniff_file(path: impl AsRef<Path>) -> Result<Format> {
    let bytes = fs::read(path)?;
    Ok(sniff_bytes(&bytes))
}

/// Sniffs an in-memory buffer. HWP 5.x is an OLE2 compound file carrying a
/// `FileHeader` stream whose first bytes are the ASCII signature; we can't
/// open the OLE2 directory here without pulling in `cfb`, so the OLE2
/// magic number plus signature bytes appearing anywhere in the leading
/// sectors is treated as a strong-enough signal for triage purposes (the
/// real signature check happens when the HWP5 path actually opens the
/// container).
pub fn sniff_bytes(bytes: &[u8]) -> Format {
    if bytes.starts_with(HWP3_SIGNATURE) {
        return Format::Hwp3;
    }

    if bytes.len() >= 8 && bytes[..8] == OLE2_MAGIC {
        return Format::Hwp5;
    }

    if bytes.starts_with(ZIP_MAGIC) {
        return Format::Hwpx;
    }

    if bytes.windows(HWP5_SIGNATURE.len()).any(|w| w == HWP5_SIGNATURE) {
        return Format::Hwp5;
    }

    Format::Unknown
}
