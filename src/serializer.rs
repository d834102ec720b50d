//! Tree-format serializer (spec §6, SPEC_FULL §B): turns the shared
//! `Document` model into the YAML tree a downstream consumer reads —
//! `metadata` + `structure` + `tables` + `raw_text`.

use serde::Serialize;

use crate::error::{HwpError, Result};
use crate::model::Document;

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub source_path: String,
    pub method: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ParagraphView {
    pub text: String,
    pub level: u16,
}

#[derive(Debug, Serialize)]
pub struct SectionView {
    pub index: u32,
    pub paragraphs: Vec<ParagraphView>,
}

#[derive(Debug, Serialize)]
pub struct TableView {
    pub section: u32,
    pub rows: u16,
    pub cols: u16,
    pub data: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct DocumentTree {
    pub metadata: Metadata,
    pub structure: Vec<SectionView>,
    pub tables: Vec<TableView>,
    pub raw_text: String,
}

/// Builds the serializable tree view from a `Document` plus the metadata
/// the core itself doesn't carry (source path, extraction method tag,
/// timestamp). The timestamp is supplied by the caller rather than read
/// from the clock here, keeping this function pure and testable.
pub fn build_tree(
    document: &Document,
    source_path: &str,
    method: &str,
    timestamp: &str,
) -> DocumentTree {
    let structure = document
        .sections
        .iter()
        .map(|section| SectionView {
            index: section.index,
            paragraphs: section
                .paragraphs
                .iter()
                .map(|p| ParagraphView {
                    text: p.text.clone(),
                    level: p.level,
                })
                .collect(),
        })
        .collect();

    let tables = document
        .sections
        .iter()
        .flat_map(|section| {
            section.tables.iter().map(move |table| TableView {
                section: section.index,
                rows: table.rows,
                cols: table.cols,
                data: table.data.clone(),
            })
        })
        .collect();

    DocumentTree {
        metadata: Metadata {
            source_path: source_path.to_string(),
            method: method.to_string(),
            version: document.version.to_string(),
            timestamp: timestamp.to_string(),
        },
        structure,
        tables,
        raw_text: document.raw_text(),
    }
}

/// Serializes a `Document` to the YAML tree format, stamping `metadata`
/// with the current UTC time.
pub fn to_yaml(document: &Document, source_path: &str, method: &str) -> Result<String> {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let tree = build_tree(document, source_path, method, &timestamp);
    serde_yaml::to_string(&tree).map_err(|e| HwpError::InvalidInput(format!("YAML encode: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Section, Table, Version};

    fn sample_document() -> Document {
        let mut section = Section::new(0);
        section.push_paragraph(Paragraph {
            text: "hello".to_string(),
            level: 0,
        });
        let mut table = Table::new(1, 1);
        table.set_cell(0, 0, "cell".to_string());
        section.push_table(table);

        Document {
            version: Version {
                major: 5,
                minor: 0,
                revision: 1,
                build: 0,
            },
            compressed: true,
            encrypted: false,
            sections: vec![section],
        }
    }

    #[test]
    fn tree_carries_metadata_and_raw_text() {
        let doc = sample_document();
        let tree = build_tree(&doc, "doc.hwp", "hwp5", "2026-01-01T00:00:00Z");
        assert_eq!(tree.metadata.source_path, "doc.hwp");
        assert_eq!(tree.metadata.method, "hwp5");
        assert_eq!(tree.metadata.timestamp, "2026-01-01T00:00:00Z");
        assert_eq!(tree.tables.len(), 1);
        assert_eq!(tree.raw_text, "hello\ncell\n");
    }

    #[test]
    fn yaml_round_trips_through_serde_yaml() {
        let doc = sample_document();
        let yaml = to_yaml(&doc, "doc.hwp", "hwp5").unwrap();
        assert!(yaml.contains("source_path: doc.hwp"));
        assert!(yaml.contains("raw_text:"));
    }
}
