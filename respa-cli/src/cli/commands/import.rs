//! Import command handler

use anyhow::Result;
use colored::*;

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::importer::{
    FileSheetSource, HttpSheetSource, ImportContext, ImportReport, ImporterRegistry, SheetSource,
};
use crate::repository::{self, purposes, resource_types, resources};

/// Run the named importer against the configured database
pub async fn handle_import_command(args: ImportArgs, config: &Config) -> Result<()> {
    let registry = ImporterRegistry::with_defaults();
    let entry = registry.lookup(&args.importer)?;

    let source: Box<dyn SheetSource> = match args.file {
        Some(path) => Box::new(FileSheetSource::new(path)),
        None => {
            let url = args
                .url
                .or_else(|| config.import.sheet_url.clone())
                .unwrap_or_else(|| entry.default_sheet_url.to_string());
            Box::new(HttpSheetSource::new(url, config.request_timeout())?)
        }
    };

    let pool = repository::connect(&config.resolve_database_url()?).await?;
    let mut importer = registry.create(
        entry.name,
        ImportContext {
            pool: pool.clone(),
            source,
        },
    )?;

    println!("Running importer {}", importer.name().bright_green().bold());
    let report = importer.import_resources().await?;
    print_report(&report);

    println!(
        "  Database now holds {} resources, {} purposes, {} resource types",
        resources::count_resources(&pool).await?,
        purposes::count_purposes(&pool).await?,
        resource_types::count_resource_types(&pool).await?
    );

    Ok(())
}

/// List registered importers
pub fn handle_importers_command() -> Result<()> {
    let registry = ImporterRegistry::with_defaults();
    for entry in registry.entries() {
        println!("{}  {}", entry.name.bold(), entry.description);
        println!("    {}", entry.default_sheet_url.dimmed());
    }
    Ok(())
}

fn print_report(report: &ImportReport) {
    println!();
    println!(
        "{} {} rows, {} created, {} updated, {} skipped",
        "Import finished:".green().bold(),
        report.rows,
        report.resources_created,
        report.resources_updated,
        report.skipped_rows
    );
    println!(
        "  {} purposes and {} resource types saved",
        report.purposes_saved, report.resource_types_saved
    );

    if !report.missing_units.is_empty() {
        println!(
            "  {} {}",
            "Missing units:".yellow(),
            report.missing_units.join(", ")
        );
    }
    if !report.unknown_purposes.is_empty() {
        println!(
            "  {} {}",
            "Unknown purposes:".yellow(),
            report.unknown_purposes.join(", ")
        );
    }
}
