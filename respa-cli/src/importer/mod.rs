//! Resource importers
//!
//! An importer reads a sheet from a `SheetSource` and upserts resources and
//! their lookup records into the database. Importers are looked up by name in
//! an `ImporterRegistry`.

pub mod fields;
pub mod kirjasto10;
pub mod labels;
pub mod registry;
pub mod sheet;
pub mod source;

pub use registry::ImporterRegistry;
pub use source::{FileSheetSource, HttpSheetSource, SheetSource};

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Everything an importer needs to run
pub struct ImportContext {
    pub pool: SqlitePool,
    pub source: Box<dyn SheetSource>,
}

/// A named import job
#[async_trait]
pub trait Importer: Send {
    /// Registry name
    fn name(&self) -> &'static str;

    /// Fetch the sheet and upsert its resources
    async fn import_resources(&mut self) -> Result<ImportReport>;
}

/// Outcome of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Data rows read from the sheet
    pub rows: usize,
    pub resources_created: usize,
    pub resources_updated: usize,
    /// Rows skipped because their unit was not found
    pub skipped_rows: usize,
    /// Unit names that were not found, each listed once
    pub missing_units: Vec<String>,
    /// Purpose labels that matched no category, one entry per occurrence
    pub unknown_purposes: Vec<String>,
    pub purposes_saved: usize,
    pub resource_types_saved: usize,
}

impl ImportReport {
    /// Record a missing unit; returns false if it was already recorded
    pub fn add_missing_unit(&mut self, name: &str) -> bool {
        if self.missing_units.iter().any(|n| n == name) {
            return false;
        }
        self.missing_units.push(name.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_unit_recorded_once() {
        let mut report = ImportReport::default();
        assert!(report.add_missing_unit("Pasila"));
        assert!(!report.add_missing_unit("Pasila"));
        assert!(report.add_missing_unit("pasila"));
        assert_eq!(report.missing_units, vec!["Pasila", "pasila"]);
    }
}
