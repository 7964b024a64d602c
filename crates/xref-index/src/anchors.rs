//! Parser for line-delimited anchor dumps.
//!
//! Each record is a block of lines terminated by a line containing only `-`:
//!
//! ```text
//! key
//! type
//! spec
//! shortname
//! level
//! status
//! url
//! exported (1 or 0)
//! normative (1 or 0)
//! for... (zero or more lines)
//! -
//! ```

use crate::{IndexError, RawRecord};

/// Separator between records once line endings are normalized.
const SECTION_SEPARATOR: &str = "\n-\n";
/// Number of fixed lines at the start of every record.
const FIXED_LINES: usize = 9;

/// Parses the contents of one anchor dump.
///
/// `source_name` identifies the input in error messages.
pub fn parse_anchors(content: &str, source_name: &str) -> Result<Vec<RawRecord>, IndexError> {
    let normalized = normalize_newlines(content);

    normalized
        .split(SECTION_SEPARATOR)
        .filter(|section| !section.trim().is_empty())
        .enumerate()
        .map(|(idx, section)| parse_section(section, source_name, idx))
        .collect()
}

/// Parses a single record block.
fn parse_section(section: &str, source_name: &str, idx: usize) -> Result<RawRecord, IndexError> {
    let lines: Vec<&str> = section.split('\n').collect();
    let [
        term,
        def_type,
        spec,
        shortname,
        level,
        status,
        url,
        exported,
        normative,
        rest @ ..,
    ] = lines.as_slice()
    else {
        return Err(IndexError::malformed(
            source_name,
            idx,
            format!(
                "expected at least {FIXED_LINES} lines, found {}",
                lines.len()
            ),
        ));
    };

    Ok(RawRecord {
        term: (*term).to_string(),
        def_type: (*def_type).to_string(),
        spec: (*spec).to_string(),
        shortname: (*shortname).to_string(),
        level: Some((*level).to_string()).filter(|l| !l.is_empty()),
        status: (*status).to_string(),
        url: (*url).to_string(),
        exported: *exported == "1",
        normative: *normative == "1",
        for_list: rest
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| (*line).to_string())
            .collect(),
    })
}

/// Converts `\r\n`, `\n\r` and lone `\r` line endings to `\n`.
fn normalize_newlines(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push('\n');
            }
            '\n' => {
                chars.next_if_eq(&'\r');
                out.push('\n');
            }
            other => out.push(other),
        }
    }
    out
}
