//! Units command handlers

use anyhow::Result;
use colored::*;
use sqlx::SqlitePool;

use crate::cli::UnitsCommands;
use crate::config::Config;
use crate::models::Unit;
use crate::repository::{self, units};
use crate::web::pagination::Paginator;
use crate::web::units::UNITS_PER_PAGE;

pub async fn handle_units_command(command: UnitsCommands, config: &Config) -> Result<()> {
    let pool = repository::connect(&config.resolve_database_url()?).await?;

    match command {
        UnitsCommands::List { page } => {
            for line in unit_page_lines(&pool, &page).await? {
                println!("{}", line);
            }
        }
        UnitsCommands::Add {
            id,
            name,
            name_en,
            address,
        } => {
            let mut unit = Unit::new(id, name);
            unit.name_en = name_en;
            unit.street_address_fi = address;
            units::insert_unit(&pool, &unit).await?;
            println!("Saved unit {} ({})", unit.name_fi.bold(), unit.id);
        }
    }

    Ok(())
}

/// Lines printed by `units list`, same pagination as the admin page
async fn unit_page_lines(pool: &SqlitePool, page: &str) -> Result<Vec<String>> {
    let paginator = Paginator::new(units::count_units(pool).await?, UNITS_PER_PAGE);
    let page = paginator.page(page)?;
    let units = units::list_units_page(pool, page.offset(), page.item_count()).await?;

    let mut lines: Vec<String> = units
        .iter()
        .map(|unit| {
            format!(
                "{:<20} {:<40} {}",
                unit.id,
                unit.name_fi,
                unit.street_address_fi.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string()
        })
        .collect();

    lines.push(format!(
        "Page {} / {} ({} units)",
        page.number,
        page.num_pages,
        paginator.count()
    ));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;

    #[tokio::test]
    async fn test_unit_page_lines() {
        let pool = test_pool().await;
        for i in 0..12 {
            units::insert_unit(&pool, &Unit::new(format!("u{:02}", i), format!("Kirjasto {:02}", i)))
                .await
                .unwrap();
        }

        let lines = unit_page_lines(&pool, "last").await.unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("u10"));
        assert_eq!(lines[2], "Page 2 / 2 (12 units)");
    }

    #[tokio::test]
    async fn test_unit_page_lines_out_of_range() {
        let pool = test_pool().await;
        assert!(unit_page_lines(&pool, "3").await.is_err());
    }
}
