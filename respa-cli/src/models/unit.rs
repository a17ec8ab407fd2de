//! Organizational unit record

use serde::{Deserialize, Serialize};

/// An organizational entity (e.g. a library branch) that owns resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    /// Finnish name, used when matching spreadsheet rows
    pub name_fi: String,
    pub name_en: Option<String>,
    pub street_address_fi: Option<String>,
}

impl Unit {
    pub fn new(id: impl Into<String>, name_fi: impl Into<String>) -> Self {
        Unit {
            id: id.into(),
            name_fi: name_fi.into(),
            name_en: None,
            street_address_fi: None,
        }
    }

    /// Case-insensitive comparison against the Finnish name
    pub fn name_matches(&self, name: &str) -> bool {
        self.name_fi.to_lowercase() == name.to_lowercase()
    }

    /// First unit in `units` whose Finnish name matches `name` ignoring case
    ///
    /// Matching is done here rather than in SQL because SQLite's `lower()`
    /// only folds ASCII.
    pub fn find_by_name<'a>(units: &'a [Unit], name: &str) -> Option<&'a Unit> {
        units.iter().find(|unit| unit.name_matches(name))
    }
}
