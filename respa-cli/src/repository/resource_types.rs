//! Resource type repository

use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::models::ResourceType;

/// Get a resource type by id
pub async fn get_resource_type(pool: &SqlitePool, id: &str) -> Result<Option<ResourceType>> {
    let row = sqlx::query("SELECT id, name_fi, main_type FROM resource_types WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to get resource type {}", id))?;

    match row {
        Some(row) => Ok(Some(ResourceType {
            id: row.try_get("id")?,
            name_fi: row.try_get("name_fi")?,
            main_type: row.try_get("main_type")?,
        })),
        None => Ok(None),
    }
}

/// Save a resource type (insert, or overwrite name and main type)
pub async fn save_resource_type(pool: &SqlitePool, resource_type: &ResourceType) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO resource_types (id, name_fi, main_type)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name_fi = excluded.name_fi,
            main_type = excluded.main_type,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&resource_type.id)
    .bind(&resource_type.name_fi)
    .bind(&resource_type.main_type)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to save resource type {}", resource_type.id))?;

    Ok(())
}

/// Number of stored resource types
pub async fn count_resource_types(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM resource_types")
        .fetch_one(pool)
        .await
        .context("Failed to count resource types")?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;

    #[tokio::test]
    async fn test_save_overwrites_name() {
        let pool = test_pool().await;

        let mut studio = ResourceType::new("studio");
        studio.name_fi = "studio".to_string();
        save_resource_type(&pool, &studio).await.unwrap();

        studio.name_fi = "Studio".to_string();
        save_resource_type(&pool, &studio).await.unwrap();

        assert_eq!(count_resource_types(&pool).await.unwrap(), 1);
        let stored = get_resource_type(&pool, "studio").await.unwrap().unwrap();
        assert_eq!(stored.name_fi, "Studio");
        assert_eq!(stored.main_type, "space");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let pool = test_pool().await;
        assert!(get_resource_type(&pool, "hall").await.unwrap().is_none());
    }
}
