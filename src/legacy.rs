//! HWP 3.x path (SPEC_FULL §B): legacy documents predate the OLE2/record
//! format entirely. Rather than reimplementing that format, this shells out
//! to an external converter binary and treats its stdout as plain text,
//! split into sections on form-feed — the same external-process wrapper
//! shape the wider pack uses for its own tool invocations.

use std::path::Path;
use std::process::Command;

use crate::error::{HwpError, Result};
use crate::model::{Document, Paragraph, Section, Version};

/// Runs `converter_bin <path>` and folds its stdout into a `Document`.
/// `converter_bin` is typically `hwp2text` or an equivalent on `$PATH`.
pub fn extract_via_converter(path: impl AsRef<Path>, converter_bin: &str) -> Result<Document> {
    let output = Command::new(converter_bin)
        .arg(path.as_ref())
        .output()
        .map_err(|e| {
            HwpError::InvalidInput(format!("failed to launch converter '{converter_bin}': {e}"))
        })?;

    if !output.status.success() {
        return Err(HwpError::InvalidInput(format!(
            "converter '{converter_bin}' exited with {}",
            output.status
        )));
    }

    let text = String::from_utf8_lossy(&output.stdout);
    Ok(parse_converter_output(&text))
}

/// Splits converter output into sections on form-feed (`\x0c`), and each
/// section into paragraphs on blank lines.
fn parse_converter_output(text: &str) -> Document {
    let sections = text
        .split('\x0c')
        .enumerate()
        .map(|(index, chunk)| {
            let mut section = Section::new(index as u32);
            for line in chunk.lines() {
                if line.trim().is_empty() {
                    continue;
                }
                section.push_paragraph(Paragraph {
                    text: line.to_string(),
                    level: 0,
                });
            }
            section
        })
        .collect();

    Document {
        version: Version {
            major: 3,
            minor: 0,
            revision: 0,
            build: 0,
        },
        compressed: false,
        encrypted: false,
        sections,
    }
}
