//! Paragraph text decoding (spec §4.5): a `PARA_TEXT` payload is a run of
//! 16-bit little-endian code units, UTF-16 surrogate pairs included, with a
//! handful of values below 32 carrying control meaning instead of being
//! literal text.

const EXTENDED_CONTROLS: [u16; 21] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 12, 14, 15, 16, 17, 18, 19, 20, 21, 23, 24,
];

/// Decode one `PARA_TEXT` payload into plain text, stripping inline control
/// codes and their parameter bytes.
pub fn decode_para_text(data: &[u8]) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();

    let mut out = String::new();
    let mut literal_run: Vec<u16> = Vec::new();
    let mut i = 0;

    let flush_run = |run: &mut Vec<u16>, out: &mut String| {
        if run.is_empty() {
            return;
        }
        for c in char::decode_utf16(run.drain(..)) {
            out.push(c.unwrap_or(char::REPLACEMENT_CHARACTER));
        }
    };

    while i < units.len() {
        let unit = units[i];

        if unit >= 32 {
            literal_run.push(unit);
            i += 1;
            continue;
        }

        flush_run(&mut literal_run, &mut out);

        if unit == 0 || unit == 10 || unit == 13 {
            out.push('\n');
            i += 1;
        } else if EXTENDED_CONTROLS.contains(&unit) {
            // 1 control unit + 7 parameter units, all discarded.
            i += 8.min(units.len() - i);
        } else {
            i += 1;
        }
    }

    flush_run(&mut literal_run, &mut out);

    out
}

/// Trim trailing null characters and whitespace from a fully-coalesced
/// paragraph (spec §4.5, applied once per paragraph, not per `PARA_TEXT`
/// record).
pub fn trim_paragraph_text(text: &str) -> String {
    text.trim_end_matches(['\0', ' ', '\t', '\r', '\n']).to_string()
}
