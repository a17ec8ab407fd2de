//! Resource repository

use anyhow::{Context, Result, anyhow};
use chrono::Duration;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::{Authentication, Resource};

/// Whether `save_resource` inserted a new row or updated an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

const RESOURCE_COLUMNS: &str = r#"
    id, unit_id, type_id, name_fi, description_fi, people_capacity, area,
    need_manual_confirmation, min_period_secs, max_period_secs, authentication,
    max_reservations_per_user
"#;

fn resource_from_row(row: &SqliteRow) -> Result<Resource> {
    let authentication: String = row.try_get("authentication")?;
    let authentication = Authentication::from_db(&authentication)
        .ok_or_else(|| anyhow!("Unknown authentication value in database: {}", authentication))?;

    Ok(Resource {
        id: Some(row.try_get("id")?),
        unit_id: row.try_get("unit_id")?,
        type_id: row.try_get("type_id")?,
        name_fi: row.try_get("name_fi")?,
        description_fi: row.try_get("description_fi")?,
        people_capacity: row.try_get("people_capacity")?,
        area: row.try_get("area")?,
        need_manual_confirmation: row.try_get::<i64, _>("need_manual_confirmation")? != 0,
        min_period: Duration::seconds(row.try_get("min_period_secs")?),
        max_period: row
            .try_get::<Option<i64>, _>("max_period_secs")?
            .map(Duration::seconds),
        authentication,
        max_reservations_per_user: row.try_get("max_reservations_per_user")?,
        purposes: Vec::new(),
    })
}

/// Purpose ids linked to a resource, in their listed order
pub async fn resource_purposes(pool: &SqlitePool, resource_id: &str) -> Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT purpose_id FROM resource_purposes WHERE resource_id = ? ORDER BY position",
    )
    .bind(resource_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("Failed to get purposes of resource {}", resource_id))?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

async fn with_purposes(pool: &SqlitePool, row: Option<SqliteRow>) -> Result<Option<Resource>> {
    let row = match row {
        Some(row) => row,
        None => return Ok(None),
    };

    let mut resource = resource_from_row(&row)?;
    if let Some(id) = &resource.id {
        resource.purposes = resource_purposes(pool, id).await?;
    }
    Ok(Some(resource))
}

/// Find the resource of a unit by its Finnish name (exact match)
pub async fn find_resource(
    pool: &SqlitePool,
    unit_id: &str,
    name_fi: &str,
) -> Result<Option<Resource>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM resources WHERE unit_id = ? AND name_fi = ?",
        RESOURCE_COLUMNS
    ))
    .bind(unit_id)
    .bind(name_fi)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("Failed to find resource '{}' of unit {}", name_fi, unit_id))?;

    with_purposes(pool, row).await
}

/// Number of stored resources
pub async fn count_resources(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM resources")
        .fetch_one(pool)
        .await
        .context("Failed to count resources")?;
    Ok(count)
}

/// Save a resource (insert or update) and replace its purpose links
///
/// A resource without an id gets a fresh UUID. Columns and purpose links are
/// written in one transaction. Returns the resource id.
pub async fn save_resource(pool: &SqlitePool, resource: &Resource) -> Result<(String, SaveOutcome)> {
    let mut tx = pool.begin().await.context("Failed to start transaction")?;

    let (id, outcome) = match &resource.id {
        Some(id) => (id.clone(), SaveOutcome::Updated),
        None => (Uuid::new_v4().to_string(), SaveOutcome::Created),
    };

    match outcome {
        SaveOutcome::Updated => {
            sqlx::query(
                r#"
                UPDATE resources
                SET unit_id = ?, type_id = ?, name_fi = ?, description_fi = ?,
                    people_capacity = ?, area = ?, need_manual_confirmation = ?,
                    min_period_secs = ?, max_period_secs = ?, authentication = ?,
                    max_reservations_per_user = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ?
                "#,
            )
            .bind(&resource.unit_id)
            .bind(&resource.type_id)
            .bind(&resource.name_fi)
            .bind(&resource.description_fi)
            .bind(resource.people_capacity)
            .bind(resource.area)
            .bind(if resource.need_manual_confirmation { 1i64 } else { 0i64 })
            .bind(resource.min_period.num_seconds())
            .bind(resource.max_period.map(|d| d.num_seconds()))
            .bind(resource.authentication.as_str())
            .bind(resource.max_reservations_per_user)
            .bind(&id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to update resource {}", id))?;

            sqlx::query("DELETE FROM resource_purposes WHERE resource_id = ?")
                .bind(&id)
                .execute(&mut *tx)
                .await
                .context("Failed to delete old purpose links")?;
        }
        SaveOutcome::Created => {
            sqlx::query(
                r#"
                INSERT INTO resources (
                    id, unit_id, type_id, name_fi, description_fi, people_capacity, area,
                    need_manual_confirmation, min_period_secs, max_period_secs,
                    authentication, max_reservations_per_user
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id)
            .bind(&resource.unit_id)
            .bind(&resource.type_id)
            .bind(&resource.name_fi)
            .bind(&resource.description_fi)
            .bind(resource.people_capacity)
            .bind(resource.area)
            .bind(if resource.need_manual_confirmation { 1i64 } else { 0i64 })
            .bind(resource.min_period.num_seconds())
            .bind(resource.max_period.map(|d| d.num_seconds()))
            .bind(resource.authentication.as_str())
            .bind(resource.max_reservations_per_user)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert resource '{}'", resource.name_fi))?;
        }
    }

    for (position, purpose_id) in resource.purposes.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO resource_purposes (resource_id, purpose_id, position)
            VALUES (?, ?, ?)
            ON CONFLICT(resource_id, purpose_id) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(purpose_id)
        .bind(position as i64)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to link purpose {} to resource {}", purpose_id, id))?;
    }

    tx.commit().await.context("Failed to commit transaction")?;

    Ok((id, outcome))
}
