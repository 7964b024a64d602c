//! Suffix-based alternate spellings for concept terms.
//!
//! A best-effort approximation of English inflection: each rule rewrites the end of the
//! term in one direction or the other. No dictionary is consulted.

/// Alternate spellings of `term`, most likely first.
///
/// The result never contains `term` itself, the empty string, or duplicates.
pub fn variations(term: &str) -> Vec<String> {
    let mut out = Variations::new(term);

    // Plural and singular.
    match term.strip_suffix('s') {
        Some(stem) => out.push(stem.to_string()),
        None => out.push(format!("{term}s")),
    }

    // Participle with a doubled final consonant: snapped <-> snap.
    match term.strip_suffix("ed") {
        Some(stem) if ends_with_double(stem) => out.push(drop_last(stem).to_string()),
        Some(_) => {}
        None => {
            if let Some(last) = last_consonant(term) {
                out.push(format!("{term}{last}ed"));
            }
        }
    }

    // -ed
    match term.strip_suffix("ed") {
        Some(stem) => out.push(stem.to_string()),
        None => out.push(format!("{term}ed")),
    }

    // Bare -d, as in baked <-> bake.
    match term.strip_suffix('d') {
        Some(stem) => out.push(stem.to_string()),
        None => out.push(format!("{term}d")),
    }

    // -ing, with and without restoring a trailing e.
    match term.strip_suffix("ing") {
        Some(stem) => {
            out.push(stem.to_string());
            out.push(format!("{stem}e"));
        }
        None => {
            out.push(format!("{term}ing"));
            if let Some(stem) = term.strip_suffix('e') {
                out.push(format!("{stem}ing"));
            }
        }
    }

    // -ing with a doubled final consonant: running <-> run.
    match term.strip_suffix("ing") {
        Some(stem) if ends_with_double(stem) => out.push(drop_last(stem).to_string()),
        Some(_) => {}
        None => {
            if let Some(last) = last_consonant(term) {
                out.push(format!("{term}{last}ing"));
            }
        }
    }

    // -es
    match term.strip_suffix("es") {
        Some(stem) => out.push(stem.to_string()),
        None => out.push(format!("{term}es")),
    }

    // -ies <-> -y
    if let Some(stem) = term.strip_suffix("ies") {
        out.push(format!("{stem}y"));
    } else if let Some(stem) = term.strip_suffix('y') {
        out.push(format!("{stem}ies"));
    }

    // -ied <-> -y
    if let Some(stem) = term.strip_suffix("ied") {
        out.push(format!("{stem}y"));
    } else if let Some(stem) = term.strip_suffix('y') {
        out.push(format!("{stem}ied"));
    }

    out.into_vec()
}

/// Ordered, deduplicated candidate list.
struct Variations<'a> {
    /// The term being varied.
    original: &'a str,
    /// Candidates in insertion order.
    items: Vec<String>,
}

impl<'a> Variations<'a> {
    /// Starts an empty list for `original`.
    fn new(original: &'a str) -> Self {
        Self {
            original,
            items: Vec::new(),
        }
    }

    /// Adds `candidate` unless it is empty, the original, or already present.
    fn push(&mut self, candidate: String) {
        if candidate.is_empty() || candidate == self.original || self.items.contains(&candidate)
        {
            return;
        }
        self.items.push(candidate);
    }

    /// The collected candidates.
    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Returns true if the last two characters are the same letter.
fn ends_with_double(s: &str) -> bool {
    let mut chars = s.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) => a == b && a.is_alphabetic(),
        _ => false,
    }
}

/// `s` without its last character.
fn drop_last(s: &str) -> &str {
    s.char_indices().next_back().map_or(s, |(idx, _)| &s[..idx])
}

/// The final character if it is an ASCII consonant.
fn last_consonant(s: &str) -> Option<char> {
    s.chars()
        .next_back()
        .filter(|c| c.is_ascii_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}
