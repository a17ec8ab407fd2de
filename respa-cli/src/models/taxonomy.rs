//! Lookup records for resource types and purposes

use serde::{Deserialize, Serialize};

/// Main type assigned to every resource type created by the spreadsheet import
pub const SPACE_MAIN_TYPE: &str = "space";

/// Physical kind of a space (meeting room, studio, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    /// Stable slug, e.g. "meeting_room"
    pub id: String,
    pub name_fi: String,
    pub main_type: String,
}

impl ResourceType {
    pub fn new(id: impl Into<String>) -> Self {
        ResourceType {
            id: id.into(),
            name_fi: String::new(),
            main_type: SPACE_MAIN_TYPE.to_string(),
        }
    }
}

/// Intended use of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purpose {
    /// Stable slug, e.g. "edit_video"
    pub id: String,
    pub name_fi: String,
    /// Category the purpose belongs to, e.g. "audiovisual_work"
    pub main_type: String,
}

impl Purpose {
    pub fn new(id: impl Into<String>) -> Self {
        Purpose {
            id: id.into(),
            name_fi: String::new(),
            main_type: String::new(),
        }
    }
}
