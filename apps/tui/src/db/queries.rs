use sqlx::{query, query_as, SqlitePool};

use crate::db::models::PreferenceRecord;

/// Reads the raw value stored under `key`
pub async fn get_preference(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    let record = query_as::<_, PreferenceRecord>(
        "SELECT key, value, updated FROM preferences WHERE key = ?",
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(record.map(|record| record.value))
}

/// Inserts or replaces the value stored under `key`
pub async fn set_preference(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    let updated = chrono::Utc::now().to_rfc3339();

    query(
        "INSERT INTO preferences (key, value, updated) VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
    )
    .bind(key)
    .bind(value)
    .bind(updated)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn test_missing_preference_is_none() -> Result<(), Box<dyn std::error::Error>> {
        let pool = create_memory_pool().await?;
        assert_eq!(get_preference(&pool, "bixi-settings").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_preference_overwrites() -> Result<(), Box<dyn std::error::Error>> {
        let pool = create_memory_pool().await?;

        set_preference(&pool, "bixi-settings", r#"{"basemap":"cyclosm"}"#).await?;
        set_preference(&pool, "bixi-settings", r#"{"basemap":"openfreemap"}"#).await?;

        let value = get_preference(&pool, "bixi-settings").await?;
        assert_eq!(value.as_deref(), Some(r#"{"basemap":"openfreemap"}"#));
        Ok(())
    }
}
