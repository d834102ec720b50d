//! The section assembler (spec §4.4): a scope-stack state machine that
//! reconstructs sections -> (paragraphs, tables -> rows -> cells ->
//! paragraphs) from the flat record sequence, using the record `level`
//! field as the sole nesting signal.

use tracing::warn;

use crate::model::{Paragraph, Section, Table};
use crate::parser::record::{HwpTag, Record, RecordReader};
use crate::parser::text::{decode_para_text, trim_paragraph_text};

/// `"tbl "` stored little-endian: the payload bytes read in reversed order.
const TABLE_FOURCC: &[u8; 4] = b" lbt";

struct TableScope {
    rows: u16,
    cols: u16,
    data: Vec<Vec<String>>,
    cell_index: u32,
    open_level: u16,
}

impl TableScope {
    fn is_full(&self) -> bool {
        self.cell_index >= self.rows as u32 * self.cols as u32
    }
}

struct CellScope {
    r: u16,
    c: u16,
    open_level: u16,
    paragraphs: Vec<String>,
}

enum Scope {
    Table(TableScope),
    Cell(CellScope),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ParaTarget {
    Section,
    Cell,
}

struct ParagraphAccum {
    text: String,
    level: u16,
    target: ParaTarget,
}

/// Drives the T1-T9 transition rules over one section's decompressed,
/// record-decoded byte stream.
pub struct SectionAssembler {
    section: Section,
    scopes: Vec<Scope>,
    current_paragraph: Option<ParagraphAccum>,
    await_table_geometry: bool,
}

impl SectionAssembler {
    pub fn new(index: u32) -> Self {
        Self {
            section: Section::new(index),
            scopes: Vec::new(),
            current_paragraph: None,
            await_table_geometry: false,
        }
    }

    /// Runs the state machine over `data` and returns the resulting
    /// section. A malformed record body is tolerated: assembly stops at
    /// that point and whatever was built so far is finalised and returned
    /// (spec §7 — section-fatal, not document-fatal). This can't fail: a
    /// record-stream error truncates assembly rather than aborting it.
    pub fn assemble(mut self, data: Vec<u8>) -> Section {
        let mut records = RecordReader::new(data);

        loop {
            match records.next_record() {
                Ok(Some(record)) => self.process_record(&record),
                Ok(None) => break,
                Err(err) => {
                    warn!(section = self.section.index, error = %err, "stopping section assembly early");
                    break;
                }
            }
        }

        self.finish();
        self.section
    }

    fn process_record(&mut self, record: &Record) {
        self.reconcile_scopes(record.tag_id(), record.level());

        match HwpTag::from_u16(record.tag_id()) {
            Some(HwpTag::ParaHeader) => {
                self.finalize_paragraph();
                let target = if matches!(self.scopes.last(), Some(Scope::Cell(_))) {
                    ParaTarget::Cell
                } else {
                    ParaTarget::Section
                };
                self.current_paragraph = Some(ParagraphAccum {
                    text: String::new(),
                    level: record.level(),
                    target,
                });
            }
            Some(HwpTag::ParaText) => {
                if let Some(accum) = self.current_paragraph.as_mut() {
                    accum.text.push_str(&decode_para_text(&record.data));
                }
            }
            Some(HwpTag::ParaCharShape) | Some(HwpTag::ParaLineSeg) => {
                // Styling/line-break metadata; ignored by the core model.
            }
            Some(HwpTag::CtrlHeader) => {
                if record.data.len() >= 4 && &record.data[0..4] == TABLE_FOURCC {
                    self.await_table_geometry = true;
                }
            }
            Some(HwpTag::Table) => {
                if self.await_table_geometry {
                    self.open_table(record);
                }
                self.await_table_geometry = false;
            }
            Some(HwpTag::ListHeader) => {
                self.open_cell(record.level());
            }
            None => {}
        }
    }

    fn open_table(&mut self, record: &Record) {
        if record.data.len() < 12 {
            return;
        }
        let rows = u16::from_le_bytes([record.data[8], record.data[9]]);
        let cols = u16::from_le_bytes([record.data[10], record.data[11]]);
        if rows == 0 || cols == 0 {
            return;
        }
        self.scopes.push(Scope::Table(TableScope {
            rows,
            cols,
            data: vec![vec![String::new(); cols as usize]; rows as usize],
            cell_index: 0,
            open_level: record.level(),
        }));
    }

    fn open_cell(&mut self, level: u16) {
        let Some(Scope::Table(table)) = self.scopes.last_mut() else {
            // T6: stray LIST_HEADER outside a table scope is a no-op.
            return;
        };

        let total = table.rows as u32 * table.cols as u32;
        if table.cell_index >= total {
            warn!(
                section = self.section.index,
                cell_index = table.cell_index,
                rows = table.rows,
                cols = table.cols,
                "dropping LIST_HEADER past declared table dimensions"
            );
            return;
        }

        let r = (table.cell_index / table.cols as u32) as u16;
        let c = (table.cell_index % table.cols as u32) as u16;
        table.cell_index += 1;

        self.scopes.push(Scope::Cell(CellScope {
            r,
            c,
            open_level: level,
            paragraphs: Vec::new(),
        }));
    }

    /// Closes any scopes the incoming `(tag, level)` invalidates, per T7/T8,
    /// cascading so a single record can close a cell and its enclosing
    /// table in one step.
    fn reconcile_scopes(&mut self, tag: u16, level: u16) {
        loop {
            match self.scopes.last() {
                Some(Scope::Cell(cell)) if Self::cell_should_close(tag, level, cell) => {
                    self.close_cell();
                }
                Some(Scope::Table(table)) if Self::table_should_close(tag, level, table) => {
                    self.close_table();
                }
                _ => break,
            }
        }
    }

    /// T7: a sibling `LIST_HEADER` at the cell's own level closes it (T7b);
    /// any other record only closes it on a strict level decrease, since
    /// the cell's own paragraph content is recorded at the same level as
    /// the `LIST_HEADER` that opened it.
    fn cell_should_close(tag: u16, level: u16, cell: &CellScope) -> bool {
        if tag == HwpTag::ListHeader as u16 {
            level <= cell.open_level
        } else {
            level < cell.open_level
        }
    }

    fn table_should_close(tag: u16, level: u16, table: &TableScope) -> bool {
        let is_para_header = tag == HwpTag::ParaHeader as u16;
        let is_list_header = tag == HwpTag::ListHeader as u16;
        (is_para_header && level <= table.open_level)
            || (!is_list_header && table.is_full() && level <= table.open_level)
    }

    fn close_cell(&mut self) {
        if matches!(
            self.current_paragraph.as_ref().map(|p| p.target),
            Some(ParaTarget::Cell)
        ) {
            self.finalize_paragraph();
        }

        if let Some(Scope::Cell(cell)) = self.scopes.pop() {
            let joined = cell.paragraphs.join("\n");
            if let Some(Scope::Table(table)) = self.scopes.last_mut() {
                if let Some(row) = table.data.get_mut(cell.r as usize) {
                    if let Some(slot) = row.get_mut(cell.c as usize) {
                        *slot = joined;
                    }
                }
            }
        }
    }

    fn close_table(&mut self) {
        if let Some(Scope::Table(table)) = self.scopes.pop() {
            self.section.push_table(Table {
                rows: table.rows,
                cols: table.cols,
                data: table.data,
            });
        }
    }

    fn finalize_paragraph(&mut self) {
        if let Some(accum) = self.current_paragraph.take() {
            let text = trim_paragraph_text(&accum.text);
            match accum.target {
                ParaTarget::Section => self.section.push_paragraph(Paragraph {
                    text,
                    level: accum.level,
                }),
                ParaTarget::Cell => {
                    if let Some(Scope::Cell(cell)) = self.scopes.last_mut() {
                        cell.paragraphs.push(text);
                    }
                }
            }
        }
    }

    /// T9: flush any open paragraph, then close remaining scopes in stack
    /// order, applying T7/T8 unconditionally.
    fn finish(&mut self) {
        self.finalize_paragraph();
        while let Some(scope) = self.scopes.last() {
            match scope {
                Scope::Cell(_) => self.close_cell(),
                Scope::Table(_) => self.close_table(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed_header(tag_id: u16, level: u16, size: u32) -> [u8; 4] {
        let packed = (tag_id as u32 & 0x3FF) | ((level as u32 & 0x3FF) << 10) | (size << 20);
        packed.to_le_bytes()
    }

    fn record(tag_id: u16, level: u16, payload: &[u8]) -> Vec<u8> {
        let mut out = packed_header(tag_id, level, payload.len() as u32).to_vec();
        out.extend_from_slice(payload);
        out
    }

    fn utf16le(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    // S1 — plain paragraph.
    #[test]
    fn plain_paragraph() {
        let mut data = record(66, 0, &[]);
        data.extend(record(67, 0, &utf16le("Hi!")));

        let section = SectionAssembler::new(0).assemble(data);
        assert_eq!(section.paragraphs.len(), 1);
        assert_eq!(section.paragraphs[0].text, "Hi!");
        assert!(section.tables.is_empty());
    }

    // S2 — split long paragraph across multiple PARA_TEXT records.
    #[test]
    fn split_long_paragraph_coalesces_in_order() {
        let mut data = record(66, 0, &[]);
        data.extend(record(67, 0, &utf16le("AB")));
        data.extend(record(67, 0, &utf16le("CD")));
        data.extend(record(67, 0, &utf16le("E")));

        let section = SectionAssembler::new(0).assemble(data);
        assert_eq!(section.paragraphs.len(), 1);
        assert_eq!(section.paragraphs[0].text, "ABCDE");
    }

    // S3 — 2x2 table between paragraphs.
    #[test]
    fn table_between_paragraphs() {
        let mut data = record(66, 0, &[]);
        data.extend(record(67, 0, &utf16le("P")));
        // line-break control code, emitted as part of the same record run.
        data.extend(record(67, 0, &10u16.to_le_bytes()));
        data.extend(record(71, 0, TABLE_FOURCC));

        let mut table_payload = vec![0u8; 12];
        table_payload[8..10].copy_from_slice(&2u16.to_le_bytes());
        table_payload[10..12].copy_from_slice(&2u16.to_le_bytes());
        data.extend(record(72, 0, &table_payload));

        for i in 1..=4u32 {
            data.extend(record(73, 1, &[]));
            data.extend(record(66, 1, &[]));
            data.extend(record(67, 1, &utf16le(&format!("c{i}"))));
        }

        data.extend(record(66, 0, &[]));
        data.extend(record(67, 0, &utf16le("Q")));

        let section = SectionAssembler::new(0).assemble(data);
        assert_eq!(section.paragraphs.len(), 2);
        assert_eq!(section.paragraphs[0].text, "P\n");
        assert_eq!(section.paragraphs[1].text, "Q");
        assert_eq!(section.tables.len(), 1);
        let table = &section.tables[0];
        assert_eq!(table.rows, 2);
        assert_eq!(table.cols, 2);
        assert_eq!(
            table.data,
            vec![
                vec!["c1".to_string(), "c2".to_string()],
                vec!["c3".to_string(), "c4".to_string()],
            ]
        );
    }

    // S4 — stray LIST_HEADER outside any table scope is a no-op (P6).
    #[test]
    fn stray_list_header_is_noop() {
        let mut data = record(66, 0, &[]);
        data.extend(record(73, 0, &[]));
        data.extend(record(67, 0, &utf16le("XY")));

        let section = SectionAssembler::new(0).assemble(data);
        assert_eq!(section.paragraphs.len(), 1);
        assert_eq!(section.paragraphs[0].text, "XY");
        assert!(section.tables.is_empty());
    }

    // P1 — table data grid always matches declared rows x cols.
    #[test]
    fn table_grid_matches_declared_dimensions_even_when_truncated() {
        let mut data = record(71, 0, TABLE_FOURCC);
        let mut table_payload = vec![0u8; 12];
        table_payload[8..10].copy_from_slice(&3u16.to_le_bytes());
        table_payload[10..12].copy_from_slice(&2u16.to_le_bytes());
        data.extend(record(72, 0, &table_payload));
        // only populate one cell, then end the section.
        data.extend(record(73, 1, &[]));
        data.extend(record(66, 1, &[]));
        data.extend(record(67, 1, &utf16le("only")));

        let section = SectionAssembler::new(0).assemble(data);
        let table = &section.tables[0];
        assert_eq!(table.data.len(), 3);
        assert!(table.data.iter().all(|row| row.len() == 2));
        assert_eq!(table.data[0][0], "only");
        assert_eq!(table.data[0][1], "");
    }
}
