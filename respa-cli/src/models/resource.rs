//! Bookable resource record

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Minimum booking period used when the spreadsheet does not give a valid one
pub fn default_min_period() -> Duration {
    Duration::minutes(30)
}

/// Level of customer identification required to book a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Authentication {
    None,
    Weak,
    Strong,
}

impl Authentication {
    /// Value stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Authentication::None => "none",
            Authentication::Weak => "weak",
            Authentication::Strong => "strong",
        }
    }

    /// Parse the stored database value
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Authentication::None),
            "weak" => Some(Authentication::Weak),
            "strong" => Some(Authentication::Strong),
            _ => None,
        }
    }
}

impl std::fmt::Display for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable physical space
///
/// Identified for imports by `(unit_id, name_fi)`; `id` is assigned on first
/// save and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Database ID (None if not yet persisted)
    pub id: Option<String>,
    pub unit_id: String,
    pub type_id: String,
    pub name_fi: String,
    pub description_fi: String,
    pub people_capacity: Option<i64>,
    pub area: Option<i64>,
    pub need_manual_confirmation: bool,
    pub min_period: Duration,
    pub max_period: Option<Duration>,
    pub authentication: Authentication,
    pub max_reservations_per_user: Option<i64>,
    /// Purpose ids in the order they were listed
    pub purposes: Vec<String>,
}

impl Resource {
    /// Create an unsaved resource with default field values
    pub fn new(
        unit_id: impl Into<String>,
        type_id: impl Into<String>,
        name_fi: impl Into<String>,
    ) -> Self {
        Resource {
            id: None,
            unit_id: unit_id.into(),
            type_id: type_id.into(),
            name_fi: name_fi.into(),
            description_fi: String::new(),
            people_capacity: None,
            area: None,
            need_manual_confirmation: false,
            min_period: default_min_period(),
            max_period: None,
            authentication: Authentication::None,
            max_reservations_per_user: None,
            purposes: Vec::new(),
        }
    }

    /// Attach a purpose, ignoring duplicates
    pub fn add_purpose(&mut self, purpose_id: impl Into<String>) {
        let purpose_id = purpose_id.into();
        if !self.purposes.contains(&purpose_id) {
            self.purposes.push(purpose_id);
        }
    }
}
