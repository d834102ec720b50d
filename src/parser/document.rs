//! Document assembler (spec §4.6): enumerates `BodyText/Section{n}` streams,
//! orders them numerically, and runs each through decompression, record
//! decoding, and section assembly independently.

use tracing::warn;

use crate::error::Result;
use crate::model::Document;
use crate::parser::header::FileHeader;
use crate::parser::section::SectionAssembler;
use crate::reader::StreamContainer;
use crate::utils::compression::{decompress_stream, DEFAULT_MAX_EXPANSION_RATIO};

const SECTION_STREAM_PREFIX: &str = "BodyText/Section";

/// Parses every numeric `BodyText/SectionN` stream name out of a container's
/// stream listing, tolerant of a leading `/` some `cfb` path renderings add,
/// and returns `(index, stream_name)` pairs sorted by numeric index.
fn ordered_section_streams(container: &dyn StreamContainer) -> Vec<(u32, String)> {
    let mut sections: Vec<(u32, String)> = container
        .list_streams()
        .into_iter()
        .filter_map(|name| {
            let trimmed = name.trim_start_matches('/');
            let suffix = trimmed.strip_prefix(SECTION_STREAM_PREFIX)?;
            suffix.parse::<u32>().ok().map(|index| (index, name))
        })
        .collect();

    sections.sort_by_key(|(index, _)| *index);
    sections.dedup_by_key(|(index, _)| *index);
    sections
}

/// Builds the full `Document` from a parsed `FileHeader` and an open stream
/// container, using `max_expansion_ratio` to bound decompression (spec
/// §4.2).
pub fn assemble_document(
    header: &FileHeader,
    container: &mut dyn StreamContainer,
    max_expansion_ratio: u32,
) -> Result<Document> {
    let mut sections = Vec::new();

    for (index, name) in ordered_section_streams(container) {
        let raw = container.read_stream(&name)?;

        let decoded = if header.is_compressed() {
            match decompress_stream(&raw, max_expansion_ratio) {
                Ok(decoded) => decoded,
                Err(err) => {
                    warn!(section = index, error = %err, "skipping section: decompression failed");
                    continue;
                }
            }
        } else {
            raw
        };

        sections.push(SectionAssembler::new(index).assemble(decoded));
    }

    Ok(Document {
        version: header.version,
        compressed: header.is_compressed(),
        encrypted: header.is_encrypted(),
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockContainer {
        streams: HashMap<String, Vec<u8>>,
    }

    impl StreamContainer for MockContainer {
        fn list_streams(&self) -> Vec<String> {
            self.streams.keys().cloned().collect()
        }

        fn read_stream(&mut self, name: &str) -> Result<Vec<u8>> {
            self.streams
                .get(name)
                .cloned()
                .ok_or_else(|| crate::error::HwpError::NotFound(name.to_string()))
        }
    }

    fn record(tag_id: u16, level: u16, payload: &[u8]) -> Vec<u8> {
        let packed = (tag_id as u32 & 0x3FF) | ((level as u32 & 0x3FF) << 10) | (payload.len() as u32) << 20;
        let mut out = packed.to_le_bytes().to_vec();
        out.extend_from_slice(payload);
        out
    }

    fn utf16le(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    fn plain_section(text: &str) -> Vec<u8> {
        let mut data = record(66, 0, &[]);
        data.extend(record(67, 0, &utf16le(text)));
        data
    }

    fn deflate(data: &[u8]) -> Vec<u8> {
        use flate2::write::DeflateEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    // S6 — numeric, not lexicographic, section ordering.
    #[test]
    fn orders_sections_numerically() {
        let mut streams = HashMap::new();
        streams.insert("BodyText/Section1".to_string(), plain_section("one"));
        streams.insert("BodyText/Section9".to_string(), plain_section("nine"));
        streams.insert("BodyText/Section10".to_string(), plain_section("ten"));
        let mut container = MockContainer { streams };

        let header = FileHeader {
            version: crate::model::Version::default(),
            flags: 0,
        };

        let doc = assemble_document(&header, &mut container, DEFAULT_MAX_EXPANSION_RATIO).unwrap();
        let indices: Vec<u32> = doc.sections.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 9, 10]);
        assert_eq!(doc.sections[2].paragraphs[0].text, "ten");
    }

    #[test]
    fn corrupt_section_does_not_abort_other_sections() {
        let mut streams = HashMap::new();
        streams.insert("BodyText/Section0".to_string(), vec![0xFF; 16]);
        streams.insert(
            "BodyText/Section1".to_string(),
            deflate(&plain_section("ok")),
        );
        let mut container = MockContainer { streams };

        let header = FileHeader {
            version: crate::model::Version::default(),
            flags: 0x01,
        };

        let doc = assemble_document(&header, &mut container, DEFAULT_MAX_EXPANSION_RATIO).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].index, 1);
        assert_eq!(doc.sections[0].paragraphs[0].text, "ok");
    }

    #[test]
    fn tolerates_leading_slash_in_stream_names() {
        let mut streams = HashMap::new();
        streams.insert("/BodyText/Section0".to_string(), plain_section("zero"));
        let mut container = MockContainer { streams };

        let header = FileHeader {
            version: crate::model::Version::default(),
            flags: 0,
        };

        let doc = assemble_document(&header, &mut container, DEFAULT_MAX_EXPANSION_RATIO).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].index, 0);
    }
}
