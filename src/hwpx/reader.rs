use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::error::{HwpError, Result};
use crate::model::{Document, Paragraph, Section, Table, Version};

use super::namespace::strip_namespace_prefixes;
use super::xml_types::{self, Run, Section as XmlSection, XmlParagraph, XmlTable};

const SECTION_FILE_PREFIX: &str = "Contents/section";

/// Reads a HWPX (ZIP+XML) package into the shared `Document` model. Trivial
/// relative to the binary decoder: no record-level state machine, just a
/// ZIP directory read and a handful of namespace-tolerant XML parses.
pub struct HwpxReader;

impl HwpxReader {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Document> {
        Self::from_reader(std::io::Cursor::new(bytes.to_vec()))
    }

    fn from_reader<R: Read + Seek>(reader: R) -> Result<Document> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| HwpError::NotHwp5(format!("not a valid HWPX/ZIP archive: {e}")))?;

        let version = Self::read_version(&mut archive)?;
        let sections = Self::read_sections(&mut archive)?;

        Ok(Document {
            version,
            compressed: true,
            encrypted: false,
            sections,
        })
    }

    fn read_version<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Version> {
        let xml = Self::read_xml_file(archive, "version.xml")?;
        let parsed = xml_types::parse_version(&strip_namespace_prefixes(&xml))
            .map_err(|e| HwpError::MalformedRecord(format!("version.xml: {e}")))?;

        let (major, minor) = parsed
            .version
            .as_deref()
            .map(parse_dotted_version)
            .unwrap_or((None, None));

        let major = major
            .or_else(|| parsed.major.as_deref().and_then(|s| s.parse().ok()))
            .unwrap_or(5);
        let minor = minor
            .or_else(|| parsed.minor.as_deref().and_then(|s| s.parse().ok()))
            .unwrap_or(0);

        Ok(Version {
            major,
            minor,
            revision: 0,
            build: 0,
        })
    }

    /// Numeric ordering of `Contents/sectionN.xml` entries, matching the
    /// binary path's `BodyText/SectionN` stream ordering.
    fn read_sections<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<Section>> {
        let mut indices: Vec<u32> = archive
            .file_names()
            .filter_map(|name| {
                name.strip_prefix(SECTION_FILE_PREFIX)?
                    .strip_suffix(".xml")?
                    .parse::<u32>()
                    .ok()
            })
            .collect();
        indices.sort_unstable();
        indices.dedup();

        let mut sections = Vec::with_capacity(indices.len());
        for index in indices {
            let filename = format!("{SECTION_FILE_PREFIX}{index}.xml");
            let xml = Self::read_xml_file(archive, &filename)?;
            let xml_section = xml_types::parse_section(&strip_namespace_prefixes(&xml))
                .map_err(|e| HwpError::MalformedRecord(format!("{filename}: {e}")))?;
            sections.push(Self::convert_section(&xml_section, index));
        }

        Ok(sections)
    }

    fn read_xml_file<R: Read + Seek>(archive: &mut ZipArchive<R>, filename: &str) -> Result<String> {
        let mut file = archive
            .by_name(filename)
            .map_err(|_| HwpError::NotFound(filename.to_string()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(contents)
    }

    fn convert_section(xml_section: &XmlSection, index: u32) -> Section {
        let mut section = Section::new(index);

        for xml_para in &xml_section.paragraphs {
            if let Some(xml_table) = xml_para.runs.iter().find_map(|r| r.table.as_ref()) {
                section.push_table(Self::convert_table(xml_table));
                continue;
            }
            section.push_paragraph(Paragraph {
                text: concat_run_text(&xml_para.runs),
                level: 0,
            });
        }

        section
    }

    fn convert_table(xml_table: &XmlTable) -> Table {
        let rows = xml_table.rows.len() as u16;
        let cols = xml_table
            .rows
            .iter()
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0) as u16;

        let mut table = Table::new(rows.max(1), cols.max(1));
        for (r, row) in xml_table.rows.iter().enumerate() {
            for (c, cell) in row.cells.iter().enumerate() {
                let text = cell
                    .sub_list
                    .as_ref()
                    .map(|sub_list| {
                        sub_list
                            .paragraphs
                            .iter()
                            .map(|p| concat_run_text(&p.runs))
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .unwrap_or_default();
                table.set_cell(r as u16, c as u16, text);
            }
        }
        table
    }
}

fn concat_run_text(runs: &[Run]) -> String {
    runs.iter()
        .filter_map(|r| r.text.as_deref())
        .collect::<Vec<_>>()
        .join("")
}

fn parse_dotted_version(s: &str) -> (Option<u8>, Option<u8>) {
    let mut parts = s.split('.').filter_map(|p| p.parse::<u8>().ok());
    (parts.next(), parts.next())
}
