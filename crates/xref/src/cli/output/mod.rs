//! Terminal styling and rendering for CLI output.

use std::path::Path;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use xref_index::IndexError;
use xref_search::{Field, ProjectedEntry};

/// ANSI escape codes for terminal colors.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Indents every line of `content` by three spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("   {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats `path` relative to `base` when it lies beneath it.
pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    base.and_then(|b| path.strip_prefix(b).ok())
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Prints an indexing failure, listing every unresolved URL.
pub fn report_index_error(error: &IndexError) {
    eprintln!("error: indexing failed: {error}");
    if let IndexError::UnresolvedUrls { urls } = error {
        for url in urls {
            eprintln!("  {url}");
        }
        eprintln!("Add the missing base URLs to the spec metadata and re-run `xref update`.");
    }
}

/// The text shown for `field` of a projected entry.
fn field_value(entry: &ProjectedEntry, field: Field) -> String {
    let e = &entry.entry;
    match field {
        Field::Type => e.def_type.to_string(),
        Field::Spec => e.spec.clone(),
        Field::Shortname => e.shortname.clone(),
        Field::Status => e.status.to_string(),
        Field::Uri => e.uri.clone(),
        Field::Normative => String::from(if e.normative { "yes" } else { "no" }),
        Field::For => e.for_context.as_deref().map(|f| f.join(", ")).unwrap_or_default(),
    }
}

/// Renders entries as a table with one column per projected field.
pub fn entries_table(entries: &[ProjectedEntry], fields: &[Field]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(fields.iter().map(|f| f.as_str()).collect::<Vec<_>>());
    for entry in entries {
        table.add_row(
            fields
                .iter()
                .map(|&f| Cell::new(field_value(entry, f)))
                .collect::<Vec<_>>(),
        );
    }
    table
}
