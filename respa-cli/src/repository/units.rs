//! Unit repository
//!
//! Units are owned by other systems; the importer only reads them.

use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::models::Unit;

fn unit_from_row(row: &SqliteRow) -> Result<Unit> {
    Ok(Unit {
        id: row.try_get("id")?,
        name_fi: row.try_get("name_fi")?,
        name_en: row.try_get("name_en")?,
        street_address_fi: row.try_get("street_address_fi")?,
    })
}

/// Insert a unit, or overwrite the one with the same id
pub async fn insert_unit(pool: &SqlitePool, unit: &Unit) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO units (id, name_fi, name_en, street_address_fi)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name_fi = excluded.name_fi,
            name_en = excluded.name_en,
            street_address_fi = excluded.street_address_fi
        "#,
    )
    .bind(&unit.id)
    .bind(&unit.name_fi)
    .bind(&unit.name_en)
    .bind(&unit.street_address_fi)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to insert unit {}", unit.id))?;

    Ok(())
}

/// Total number of units
pub async fn count_units(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM units")
        .fetch_one(pool)
        .await
        .context("Failed to count units")?;
    Ok(count)
}

/// All units ordered by Finnish name, then id
pub async fn list_units(pool: &SqlitePool) -> Result<Vec<Unit>> {
    let rows = sqlx::query(
        "SELECT id, name_fi, name_en, street_address_fi FROM units ORDER BY name_fi, id",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list units")?;

    rows.iter().map(unit_from_row).collect()
}

/// One page of units, in the same order as `list_units`
pub async fn list_units_page(pool: &SqlitePool, offset: i64, limit: i64) -> Result<Vec<Unit>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name_fi, name_en, street_address_fi
        FROM units
        ORDER BY name_fi, id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list units page")?;

    rows.iter().map(unit_from_row).collect()
}
