use crate::error::{HwpError, Result};
use flate2::read::DeflateDecoder;
use std::io::Read;

/// Default bound on decompressed/compressed size, per spec §4.2.
pub const DEFAULT_MAX_EXPANSION_RATIO: u32 = 100;

const CHUNK: usize = 16 * 1024;
const MIN_LIMIT: u64 = 4096;

/// Decompress a raw-DEFLATE body-section stream (no zlib wrapper, no trailer),
/// refusing to grow the output past `max_expansion_ratio` times the input size.
pub fn decompress_stream(data: &[u8], max_expansion_ratio: u32) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let limit = (data.len() as u64)
        .saturating_mul(max_expansion_ratio as u64)
        .max(MIN_LIMIT);

    let mut decoder = DeflateDecoder::new(data);
    let mut out = Vec::with_capacity(data.len());
    let mut buf = [0u8; CHUNK];

    loop {
        let n = decoder
            .read(&mut buf)
            .map_err(|e| HwpError::MalformedRecord(format!("deflate stream corrupt: {e}")))?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
        if out.len() as u64 > limit {
            return Err(HwpError::DecodeLimit(format!(
                "decompressed size exceeded {max_expansion_ratio}x input ({} bytes)",
                data.len()
            )));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::DeflateEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn round_trips_small_payload() {
        let original = b"Hello, HWP!".repeat(20);
        let compressed = deflate(&original);
        let out = decompress_stream(&compressed, DEFAULT_MAX_EXPANSION_RATIO).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn empty_input_passes_through() {
        assert_eq!(decompress_stream(&[], DEFAULT_MAX_EXPANSION_RATIO).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_pathological_expansion() {
        let original = vec![0u8; 1_000_000];
        let compressed = deflate(&original);
        let err = decompress_stream(&compressed, 1).unwrap_err();
        assert!(matches!(err, HwpError::DecodeLimit(_)));
    }
}
