//! Purpose repository

use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::models::Purpose;

/// Get a purpose by id
pub async fn get_purpose(pool: &SqlitePool, id: &str) -> Result<Option<Purpose>> {
    let row = sqlx::query("SELECT id, name_fi, main_type FROM purposes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to get purpose {}", id))?;

    match row {
        Some(row) => Ok(Some(Purpose {
            id: row.try_get("id")?,
            name_fi: row.try_get("name_fi")?,
            main_type: row.try_get("main_type")?,
        })),
        None => Ok(None),
    }
}

/// Save a purpose (insert, or overwrite name and main type)
pub async fn save_purpose(pool: &SqlitePool, purpose: &Purpose) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO purposes (id, name_fi, main_type)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name_fi = excluded.name_fi,
            main_type = excluded.main_type,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&purpose.id)
    .bind(&purpose.name_fi)
    .bind(&purpose.main_type)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to save purpose {}", purpose.id))?;

    Ok(())
}

/// Number of stored purposes
pub async fn count_purposes(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM purposes")
        .fetch_one(pool)
        .await
        .context("Failed to count purposes")?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;

    #[tokio::test]
    async fn test_save_then_update_purpose() {
        let pool = test_pool().await;

        let mut purpose = Purpose::new("edit_video");
        purpose.name_fi = "videokuvan käsittely tietokoneella".to_string();
        purpose.main_type = "audiovisual_work".to_string();
        save_purpose(&pool, &purpose).await.unwrap();

        purpose.name_fi = "Videokuvan käsittely tietokoneella".to_string();
        save_purpose(&pool, &purpose).await.unwrap();

        assert_eq!(count_purposes(&pool).await.unwrap(), 1);
        assert_eq!(get_purpose(&pool, "edit_video").await.unwrap(), Some(purpose));
    }
}
