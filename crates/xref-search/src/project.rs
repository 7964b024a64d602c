//! Field projection of result entries.

use std::sync::Arc;

use serde::{Serialize, Serializer, ser::SerializeMap};
use xref_index::DefinitionEntry;

use crate::Field;

/// An entry restricted to a set of fields.
///
/// Serializes as a JSON object holding only the selected fields, in selection order. An
/// absent `for` is omitted rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedEntry {
    /// The full entry.
    pub entry: DefinitionEntry,
    /// Fields to emit.
    pub fields: Arc<[Field]>,
}

impl ProjectedEntry {
    /// Projects `entry` onto `fields`.
    pub fn new(entry: DefinitionEntry, fields: Arc<[Field]>) -> Self {
        Self { entry, fields }
    }

    /// Returns true if `field` is selected and has a value for this entry.
    pub fn has(&self, field: Field) -> bool {
        self.fields.contains(&field) && (field != Field::For || self.entry.for_context.is_some())
    }
}

impl Serialize for ProjectedEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let e = &self.entry;
        let mut map = serializer.serialize_map(None)?;
        for field in self.fields.iter() {
            let key = field.as_str();
            match field {
                Field::Type => map.serialize_entry(key, &e.def_type)?,
                Field::Spec => map.serialize_entry(key, &e.spec)?,
                Field::Shortname => map.serialize_entry(key, &e.shortname)?,
                Field::Status => map.serialize_entry(key, &e.status)?,
                Field::Uri => map.serialize_entry(key, &e.uri)?,
                Field::Normative => map.serialize_entry(key, &e.normative)?,
                Field::For => {
                    if let Some(owners) = &e.for_context {
                        map.serialize_entry(key, owners)?;
                    }
                }
            }
        }
        map.end()
    }
}
