//! Configuration templates for `xref init`.
//!
//! Templates are rendered from the built-in defaults, so every documented key shows the value
//! xref would use without it. Keys are written commented out unless a [`TemplateSeed`] supplies
//! them; a section header stays commented until one of its keys is active.

use std::fmt::{self, Write};

use crate::{DEFAULT_DATA_DIR, IndexSettings, SearchSettings};

/// Data directory suggested in the global template.
const GLOBAL_DATA_DIR: &str = "~/.local/share/xref";

/// Definitions directory suggested when none is seeded.
const DEFINITIONS_DIR: &str = "webref/ed/dfns";

/// Values `xref init` writes as active settings.
#[derive(Debug, Clone, Default)]
pub struct TemplateSeed {
    /// `settings.data_dir`, as given by the user.
    pub data_dir: Option<String>,
    /// `index.definitions_dir`, relative to the data directory.
    pub definitions_dir: Option<String>,
}

/// Renders the project template written to `./.xref.toml`.
pub fn local_template(seed: &TemplateSeed) -> String {
    render(
        "# xref configuration\n\
         #\n\
         # Relative paths are resolved against the directory containing this file.\n\
         # XREF_DATA_DIR overrides settings.data_dir.\n",
        seed,
        DEFAULT_DATA_DIR,
    )
}

/// Renders the template written to `~/.xref.toml`.
pub fn global_template(seed: &TemplateSeed) -> String {
    render(
        "# Global xref configuration\n\
         #\n\
         # Applies wherever no closer .xref.toml sets a value.\n",
        seed,
        GLOBAL_DATA_DIR,
    )
}

/// A TOML value as written in a template.
enum Value {
    /// Quoted string.
    Str(String),
    /// Array of quoted strings.
    List(Vec<String>),
    /// Unsigned integer.
    Int(u64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write_quoted(f, s),
            Self::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, item)?;
                }
                f.write_char(']')
            }
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Writes `s` as a TOML basic string.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// One documented key.
struct Key {
    /// TOML key name.
    name: &'static str,
    /// Help line written above the key.
    help: &'static str,
    /// Default or seeded value.
    value: Value,
    /// Whether the key is written uncommented.
    active: bool,
}

impl Key {
    /// A commented-out key showing `value`.
    fn documented(name: &'static str, help: &'static str, value: Value) -> Self {
        Self {
            name,
            help,
            value,
            active: false,
        }
    }

    /// A key that is active when `seeded` holds a value, falling back to `suggestion`.
    fn seeded(
        name: &'static str,
        help: &'static str,
        seeded: Option<&String>,
        suggestion: &str,
    ) -> Self {
        Self {
            name,
            help,
            value: Value::Str(seeded.map_or_else(|| suggestion.to_string(), Clone::clone)),
            active: seeded.is_some(),
        }
    }
}

/// Renders `header` followed by every section.
fn render(header: &str, seed: &TemplateSeed, data_dir: &str) -> String {
    let index = IndexSettings::default();
    let search = SearchSettings::default();

    let sections = [
        (
            "settings",
            "Where the input data lives and the index is built.",
            vec![Key::seeded(
                "data_dir",
                "Root of the bikeshed-data and webref checkouts.",
                seed.data_dir.as_ref(),
                data_dir,
            )],
        ),
        (
            "index",
            "Input and output locations, relative to data_dir.",
            vec![
                Key::documented(
                    "anchors_dir",
                    "Line-delimited anchor dumps.",
                    Value::Str(index.anchors_dir),
                ),
                Key::documented(
                    "specs_file",
                    "Spec metadata with current and snapshot URLs.",
                    Value::Str(index.specs_file),
                ),
                Key::seeded(
                    "definitions_dir",
                    "Structured definition lists, read alongside the anchor dumps.",
                    seed.definitions_dir.as_ref(),
                    DEFINITIONS_DIR,
                ),
                Key::documented(
                    "output_dir",
                    "Receives xref.json, specs.json and specmap.json.",
                    Value::Str(index.output_dir),
                ),
            ],
        ),
        (
            "search",
            "Defaults for requests that leave an option unset.",
            vec![
                Key::documented(
                    "fields",
                    "Fields returned for each entry.",
                    Value::List(search.fields),
                ),
                Key::documented(
                    "spec_type",
                    "Spec status preference, most preferred first.",
                    Value::List(search.spec_type),
                ),
                Key::documented(
                    "types",
                    "Types searched when a query names none, e.g. [\"_IDL_\"].",
                    Value::List(search.types),
                ),
                Key::documented(
                    "cache_ttl_secs",
                    "Lifetime of cached results.",
                    Value::Int(search.cache_ttl_secs),
                ),
            ],
        ),
    ];

    let mut out = String::from(header);
    out.push_str("\n# Stop here instead of reading parent and global configs.\n# root = true\n");
    for (name, about, keys) in sections {
        let marker = if keys.iter().any(|k| k.active) { "" } else { "# " };
        out.push_str(&format!("\n# {about}\n{marker}[{name}]\n"));
        for key in keys {
            let marker = if key.active { "" } else { "# " };
            out.push_str(&format!(
                "# {}\n{marker}{} = {}\n",
                key.help, key.name, key.value
            ));
        }
    }
    out
}
