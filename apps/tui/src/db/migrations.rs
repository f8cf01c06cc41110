use color_eyre::Result;
use sqlx::{
    migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool,
};
use tracing::{debug, info};

/// Creates the preference table if it doesn't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Opens (creating if needed) the SQLite preference store at `database_url`
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    info!(database_url, "opening preference store");

    let db_path = extract_db_path_from_url(database_url)?;
    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!(path = %parent.display(), "creating database directory");
            std::fs::create_dir_all(parent).map_err(|e| {
                color_eyre::eyre::eyre!("Failed to create database directory: {e}")
            })?;
        }
    }

    let db_exists = Sqlite::database_exists(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Error checking database: {e}"))?;

    if !db_exists {
        debug!("database does not exist, creating it now");
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create SQLite database: {e}"))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to connect to SQLite database: {e}"))?;

    setup_database(&pool)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to set up database schema: {e}"))?;

    Ok(pool)
}

/// In-memory store, used when the on-disk database can't be opened and in tests
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    // A single connection: every new in-memory connection is a fresh database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    setup_database(&pool).await?;
    Ok(pool)
}

/// Helper function to extract the database path from a SQLite URL
fn extract_db_path_from_url(url: &str) -> Result<String> {
    if !url.starts_with("sqlite://") {
        return Err(color_eyre::eyre::eyre!("Not a valid SQLite URL: {url}"));
    }

    let path_part = url.trim_start_matches("sqlite://");

    if cfg!(windows) {
        // Windows: sqlite:///C:/path or sqlite://C:/path
        if let Some(drive_idx) = path_part.find(':') {
            if drive_idx > 0 {
                let path = path_part
                    .strip_prefix('/')
                    .map_or_else(|| path_part.to_string(), std::string::ToString::to_string);

                return Ok(path);
            }
        }
    }

    // Unix-like absolute path: sqlite:///path
    if path_part.starts_with('/') {
        return Ok(format!("/{}", path_part.trim_start_matches('/')));
    }

    Ok(path_part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_relative_and_absolute_paths() {
        assert_eq!(
            extract_db_path_from_url("sqlite://bixi-dashboard.db").unwrap(),
            "bixi-dashboard.db"
        );
        assert_eq!(
            extract_db_path_from_url("sqlite:///tmp/bixi/prefs.db").unwrap(),
            "/tmp/bixi/prefs.db"
        );
        assert!(extract_db_path_from_url("postgres://localhost/db").is_err());
    }

    #[tokio::test]
    async fn setup_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
        let pool = create_memory_pool().await?;
        setup_database(&pool).await?;
        Ok(())
    }
}
