//! Longest-prefix matching of definition URLs against known specification base URLs.

use std::collections::HashMap;

/// A node in the prefix tree.
#[derive(Debug, Default)]
struct Node {
    /// Outgoing edges keyed by the next character.
    children: HashMap<char, Node>,
    /// True if a known base URL ends at this node.
    terminal: bool,
}

/// Outcome of resolving a URL against the prefix tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// The URL with the matched base removed, or the whole URL if nothing matched.
    pub relative: &'a str,
    /// Whether a known base URL prefixed the input.
    pub matched: bool,
}

/// Shortens absolute URLs by stripping the longest known base-URL prefix.
#[derive(Debug, Default)]
pub struct PrefixResolver {
    /// Root of the tree; represents the empty prefix.
    root: Node,
    /// Number of distinct base URLs inserted.
    len: usize,
}

impl PrefixResolver {
    /// Builds a resolver from a set of base URLs. Empty strings are ignored.
    pub fn new<I, S>(base_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolver = Self::default();
        for url in base_urls {
            resolver.insert(url.as_ref());
        }
        resolver
    }

    /// Adds a base URL.
    pub fn insert(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for ch in url.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    /// Number of known base URLs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no base URLs are known.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Strips the longest known base URL from `url`.
    ///
    /// A URL equal to a known base resolves to the empty string.
    pub fn resolve<'a>(&self, url: &'a str) -> Resolved<'a> {
        let mut node = &self.root;
        let mut longest = None;
        for (offset, ch) in url.char_indices() {
            let Some(next) = node.children.get(&ch) else {
                break;
            };
            node = next;
            if node.terminal {
                longest = Some(offset + ch.len_utf8());
            }
        }

        match longest {
            Some(end) => Resolved {
                relative: &url[end..],
                matched: true,
            },
            None => Resolved {
                relative: url,
                matched: false,
            },
        }
    }
}
