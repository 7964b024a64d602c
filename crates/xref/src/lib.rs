//! xref: cross-reference lookup for web platform specification terms.
//!
//! xref indexes the definitions exported by web platform specifications (anchor dumps and
//! structured definition lists) and answers structured term queries against that index:
//! which specification defines `event` for `Window`, where the `"no-referrer"` enum value
//! lives, or which level of CSS Cascade defines "inherited value".

#![warn(missing_docs)]

pub mod cli;
