//! Helsinki city library spaces importer
//!
//! Reads the library spaces sheet (one row per bookable space) and upserts a
//! resource per row. Rows are processed in sheet order, one at a time:
//!
//! 1. the unit is resolved by name against the units loaded at the start of
//!    the run; unknown units skip the row
//! 2. numeric and duration cells are coerced with defaults
//! 3. authentication need and space type are mapped through fixed tables;
//!    an unknown label aborts the whole run
//! 4. purposes are resolved through the category tables; unknown labels are
//!    reported and skipped
//! 5. the resource is created or updated, keyed by unit and name

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;

use super::fields::{
    clean_text, needs_confirmation, parse_int, parse_max_period, parse_min_period,
};
use super::labels::{self, PurposeMatch};
use super::registry::ImporterEntry;
use super::sheet::{SheetRow, parse_sheet};
use super::{ImportContext, ImportReport, Importer, SheetSource};
use crate::models::{Purpose, Resource, ResourceType, SPACE_MAIN_TYPE, Unit};
use crate::repository::resources::{self, SaveOutcome};
use crate::repository::{purposes, resource_types, units};

/// Registry name
pub const NAME: &str = "kirjasto10";

/// Google Sheets CSV export of the library spaces sheet
pub const SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1mjeCSLQFA82mBvGcbwPkSL3OTZx1kaZtnsq3CF_f4V8/export?format=csv&id=1mjeCSLQFA82mBvGcbwPkSL3OTZx1kaZtnsq3CF_f4V8&gid=0";

/// Column headers of the sheet
pub mod columns {
    pub const UNIT: &str = "Osasto";
    pub const SEPARATE_BOOKING: &str = "Erillisvaraus";
    pub const AREA: &str = "Koko m2";
    pub const PEOPLE_CAPACITY: &str = "Max henkilömäärä";
    pub const MIN_PERIOD: &str = "Varausaika min";
    pub const MAX_PERIOD: &str = "Varausaika max";
    pub const MAX_RESERVATIONS: &str = "Max. varaukset per tila (voimassa olevat)";
    pub const AUTHENTICATION: &str = "Asiakkuus / tunnistamisen tarve";
    pub const NAME: &str = "Nimi";
    pub const DESCRIPTION: &str = "Kuvaus";
    /// Prefix shared by every purpose column
    pub const PURPOSE_PREFIX: &str = "Käyttötarkoitus";
    pub const SPACE_TYPE: &str = "Tilatyyppi";
}

pub fn entry() -> ImporterEntry {
    ImporterEntry {
        name: NAME,
        description: "Library spaces (rooms, studios, workstations) from the shared sheet",
        default_sheet_url: SHEET_URL,
        create: SpreadsheetResourceImporter::boxed,
    }
}

/// Imports library spaces from the shared spreadsheet
pub struct SpreadsheetResourceImporter {
    pool: SqlitePool,
    source: Box<dyn SheetSource>,
}

impl SpreadsheetResourceImporter {
    pub fn new(context: ImportContext) -> Self {
        SpreadsheetResourceImporter {
            pool: context.pool,
            source: context.source,
        }
    }

    pub fn boxed(context: ImportContext) -> Box<dyn Importer> {
        Box::new(Self::new(context))
    }

    async fn import_row(
        &self,
        row: &SheetRow,
        known_units: &[Unit],
        report: &mut ImportReport,
    ) -> Result<()> {
        let unit_name = row.get(columns::UNIT)?;
        let unit = match Unit::find_by_name(known_units, unit_name) {
            Some(unit) => unit,
            None => {
                if report.add_missing_unit(unit_name) {
                    println!("Unit {} not found in db", unit_name);
                }
                log::debug!("Skipping line {}: no unit '{}'", row.line(), unit_name);
                report.skipped_rows += 1;
                return Ok(());
            }
        };

        let need_manual_confirmation = needs_confirmation(row.get(columns::SEPARATE_BOOKING)?);
        let area = parse_int(row.get(columns::AREA)?);
        let people_capacity = parse_int(row.get(columns::PEOPLE_CAPACITY)?);
        let min_period = parse_min_period(row.get(columns::MIN_PERIOD)?);
        let max_period = parse_max_period(row.get(columns::MAX_PERIOD)?);
        let max_reservations_per_user = parse_int(row.get(columns::MAX_RESERVATIONS)?);
        let authentication = labels::authentication(row.get(columns::AUTHENTICATION)?)?;

        let name_fi = clean_text(row.get(columns::NAME)?);
        let description_fi = clean_text(row.get(columns::DESCRIPTION)?);

        let purpose_ids = self.save_purposes(row, report).await?;

        let space_type = row.get(columns::SPACE_TYPE)?;
        let type_id = labels::resource_type_id(space_type)?;
        self.save_resource_type(type_id, space_type, report).await?;

        let existing = resources::find_resource(&self.pool, &unit.id, &name_fi).await?;

        let mut resource = Resource::new(unit.id.as_str(), type_id, name_fi);
        resource.id = existing.and_then(|r| r.id);
        resource.description_fi = description_fi;
        resource.people_capacity = people_capacity;
        resource.area = area;
        resource.need_manual_confirmation = need_manual_confirmation;
        resource.min_period = min_period;
        resource.max_period = max_period;
        resource.authentication = authentication;
        resource.max_reservations_per_user = max_reservations_per_user;
        for purpose_id in purpose_ids {
            resource.add_purpose(purpose_id);
        }

        self.save_resource(unit, &resource, report).await
    }

    /// Upsert every recognised purpose of the row, returning their ids
    async fn save_purposes(&self, row: &SheetRow, report: &mut ImportReport) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        for label in row.values_with_prefix(columns::PURPOSE_PREFIX) {
            if label.is_empty() {
                continue;
            }

            let PurposeMatch { category, id } = match labels::find_purpose(label) {
                Some(found) => found,
                None => {
                    println!("Main purpose type {} not found", label);
                    report.unknown_purposes.push(label.to_string());
                    continue;
                }
            };

            let mut purpose = match purposes::get_purpose(&self.pool, id).await? {
                Some(purpose) => purpose,
                None => {
                    log::info!("Creating purpose {} ({})", id, category);
                    Purpose::new(id)
                }
            };
            purpose.name_fi = label.to_string();
            purpose.main_type = category.to_string();
            purposes::save_purpose(&self.pool, &purpose).await?;

            report.purposes_saved += 1;
            ids.push(purpose.id);
        }

        Ok(ids)
    }

    async fn save_resource_type(
        &self,
        type_id: &str,
        label: &str,
        report: &mut ImportReport,
    ) -> Result<()> {
        let mut resource_type = match resource_types::get_resource_type(&self.pool, type_id).await? {
            Some(resource_type) => resource_type,
            None => {
                log::info!("Creating resource type {}", type_id);
                ResourceType::new(type_id)
            }
        };
        resource_type.name_fi = clean_text(label);
        resource_type.main_type = SPACE_MAIN_TYPE.to_string();
        resource_types::save_resource_type(&self.pool, &resource_type).await?;

        report.resource_types_saved += 1;
        Ok(())
    }

    async fn save_resource(
        &self,
        unit: &Unit,
        resource: &Resource,
        report: &mut ImportReport,
    ) -> Result<()> {
        let (id, outcome) = resources::save_resource(&self.pool, resource).await?;
        match outcome {
            SaveOutcome::Created => {
                report.resources_created += 1;
                log::info!("Created resource {} '{}' in {}", id, resource.name_fi, unit.name_fi);
            }
            SaveOutcome::Updated => {
                report.resources_updated += 1;
                log::debug!("Updated resource {} '{}' in {}", id, resource.name_fi, unit.name_fi);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Importer for SpreadsheetResourceImporter {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn import_resources(&mut self) -> Result<ImportReport> {
        log::info!("Fetching resource sheet from {}", self.source.describe());
        let text = self.source.fetch().await?;
        let rows = parse_sheet(&text)?;

        // Units are read-only during an import
        let known_units = units::list_units(&self.pool).await?;
        log::debug!("Matching rows against {} units", known_units.len());

        let mut report = ImportReport::default();
        for row in &rows {
            report.rows += 1;
            self.import_row(row, &known_units, &mut report)
                .await
                .with_context(|| format!("Import stopped at sheet line {}", row.line()))?;
        }

        log::info!(
            "Import '{}' finished: {} rows, {} created, {} updated, {} skipped",
            NAME,
            report.rows,
            report.resources_created,
            report.resources_updated,
            report.skipped_rows
        );
        Ok(report)
    }
}
