//! Structural text extraction for Korean HWP 5.x and HWPX word-processor
//! documents. The core is the HWP 5.x binary record-stream decoder
//! (`parser`); HWPX and legacy HWP 3.x are thin collaborator paths sharing
//! the same `model::Document` output.

pub mod batch;
pub mod error;
pub mod hwpx;
pub mod legacy;
pub mod model;
pub mod parser;
pub mod reader;
pub mod serializer;
pub mod triage;
pub mod utils;

use std::path::Path;

pub use crate::error::{HwpError, Result};
pub use crate::model::Document;

use crate::parser::{assemble_document, FileHeader};
use crate::reader::CfbReader;
use crate::triage::{sniff_file, Format};
use crate::utils::compression::DEFAULT_MAX_EXPANSION_RATIO;

/// The core's one tunable (spec §4.2): bounds decompression expansion.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub max_expansion_ratio: u32,
    pub converter_bin: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_expansion_ratio: DEFAULT_MAX_EXPANSION_RATIO,
            converter_bin: "hwp2text".to_string(),
        }
    }
}

/// Extracts a HWP 5.x binary document from an open byte stream.
pub fn extract_hwp5<R: std::io::Read + std::io::Seek>(
    reader: R,
    options: &ExtractOptions,
) -> Result<Document> {
    let mut container = CfbReader::new(reader)?;
    let header_bytes = container.read_stream("FileHeader")?;
    let header = FileHeader::parse(&header_bytes)?;

    if header.is_encrypted() {
        return Err(HwpError::Encrypted);
    }

    assemble_document(&header, &mut container, options.max_expansion_ratio)
}

/// Triages `path` and routes it to whichever of the three input paths
/// matches (spec §6's external interfaces, SPEC_FULL §B).
pub fn extract_file(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<Document> {
    let path = path.as_ref();
    match sniff_file(path)? {
        Format::Hwp5 => {
            let file = std::fs::File::open(path)?;
            extract_hwp5(file, options)
        }
        Format::Hwpx => hwpx::HwpxReader::from_file(path),
        Format::Hwp3 => legacy::extract_via_converter(path, &options.converter_bin),
        Format::Unknown => Err(HwpError::NotHwp5(format!(
            "{}: not a recognised HWP document",
            path.display()
        ))),
    }
}
