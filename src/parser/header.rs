use crate::error::{HwpError, Result};
use crate::model::Version;

const HWP_SIGNATURE: &[u8] = b"HWP Document File";
const HEADER_LEN: usize = 256;

/// The fixed-layout `FileHeader` stream (spec §4.1): 32-byte signature,
/// packed version, flags word, then reserved padding out to 256 bytes.
#[derive(Debug, Clone, Copy)]
pub struct FileHeader {
    pub version: Version,
    pub flags: u32,
}

impl FileHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(HwpError::Truncated(format!(
                "FileHeader must be {HEADER_LEN} bytes, got {}",
                data.len()
            )));
        }

        if &data[..HWP_SIGNATURE.len()] != HWP_SIGNATURE {
            return Err(HwpError::NotHwp5("signature mismatch".to_string()));
        }

        // Bytes 32..36: little-endian u32 packing (build, rev, minor, major)
        // from low byte to high byte.
        let version_word = u32::from_le_bytes(data[32..36].try_into().unwrap());
        let version = Version {
            major: ((version_word >> 24) & 0xFF) as u8,
            minor: ((version_word >> 16) & 0xFF) as u8,
            revision: ((version_word >> 8) & 0xFF) as u8,
            build: (version_word & 0xFF) as u8,
        };

        let flags = u32::from_le_bytes(data[36..40].try_into().unwrap());

        Ok(Self { version, flags })
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & 0x01 != 0
    }

    pub fn is_encrypted(&self) -> bool {
        self.flags & 0x02 != 0
    }

    pub fn is_distributed(&self) -> bool {
        self.flags & 0x04 != 0
    }
}
