//! Typed views over the two HWPX XML members this crate reads:
//! `version.xml` and each `Contents/sectionN.xml`. Deserialized with
//! `quick-xml`'s serde integration after namespace prefixes have been
//! stripped (see `namespace::strip_namespace_prefixes`).

use quick_xml::de::from_str;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct HcfVersion {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,
    #[serde(rename = "@major", default)]
    pub major: Option<String>,
    #[serde(rename = "@minor", default)]
    pub minor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "sec")]
pub struct Section {
    #[serde(rename = "p", default)]
    pub paragraphs: Vec<XmlParagraph>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlParagraph {
    #[serde(rename = "@id", default)]
    pub id: Option<u32>,
    #[serde(rename = "run", default)]
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    #[serde(rename = "t", default)]
    pub text: Option<String>,
    #[serde(rename = "tbl", default)]
    pub table: Option<XmlTable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlTable {
    #[serde(rename = "tr", default)]
    pub rows: Vec<XmlTableRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlTableRow {
    #[serde(rename = "tc", default)]
    pub cells: Vec<XmlTableCell>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlTableCell {
    #[serde(rename = "subList", default)]
    pub sub_list: Option<SubList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubList {
    #[serde(rename = "p", default)]
    pub paragraphs: Vec<XmlParagraph>,
}

pub fn parse_version(xml: &str) -> Result<HcfVersion, quick_xml::DeError> {
    from_str(xml)
}

pub fn parse_section(xml: &str) -> Result<Section, quick_xml::DeError> {
    from_str(xml)
}
