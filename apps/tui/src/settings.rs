//! Persisted user preferences.
//!
//! The whole preference object is stored as JSON under one key. Loading and
//! saving never fail from the caller's point of view: problems are logged and
//! the in-memory value stays authoritative.

use crate::db::{get_preference, set_preference};
use crate::domain::Basemap;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

pub const SETTINGS_KEY: &str = "bixi-settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub basemap: Basemap,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("preference storage failed: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("preference store unavailable")]
    Unavailable,
}

/// Raw key/value access to wherever preferences live.
pub trait SettingsStore: Send + Sync {
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, SettingsError>> + Send;
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), SettingsError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SettingsStore for SqliteSettingsStore {
    async fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(get_preference(&self.pool, key).await?)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        Ok(set_preference(&self.pool, key, value).await?)
    }
}

/// Process-local store; `failing()` simulates an inaccessible backend.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, String>>,
    broken: bool,
}

impl MemorySettingsStore {
    pub fn failing() -> Self {
        Self {
            values: Mutex::default(),
            broken: true,
        }
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl SettingsStore for MemorySettingsStore {
    async fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        if self.broken {
            return Err(SettingsError::Unavailable);
        }
        let values = self.values.lock().map_err(|_| SettingsError::Unavailable)?;
        Ok(values.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        if self.broken {
            return Err(SettingsError::Unavailable);
        }
        let mut values = self.values.lock().map_err(|_| SettingsError::Unavailable)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stored settings, or the defaults when absent, unparsable or unreadable.
pub async fn load_settings<S: SettingsStore>(store: &S) -> Settings {
    match store.read(SETTINGS_KEY).await {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(%error, "stored settings are unreadable, using defaults");
            Settings::default()
        }),
        Ok(None) => Settings::default(),
        Err(error) => {
            warn!(%error, "failed to load settings, using defaults");
            Settings::default()
        }
    }
}

/// Best-effort write; returns whether the value reached the store.
pub async fn save_settings<S: SettingsStore>(store: &S, settings: Settings) -> bool {
    let raw = match serde_json::to_string(&settings) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, "failed to encode settings");
            return false;
        }
    };

    match store.write(SETTINGS_KEY, &raw).await {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "failed to save settings");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn missing_settings_default_to_cyclosm() {
        let store = MemorySettingsStore::default();
        assert_eq!(load_settings(&store).await.basemap, Basemap::CycleOsm);
    }

    #[tokio::test]
    async fn corrupt_settings_fall_back_silently() {
        let store = MemorySettingsStore::with_value(SETTINGS_KEY, "{not json");
        assert_eq!(load_settings(&store).await, Settings::default());

        let store = MemorySettingsStore::with_value(SETTINGS_KEY, r#"{"basemap":"satellite"}"#);
        assert_eq!(load_settings(&store).await, Settings::default());
    }

    #[tokio::test]
    async fn empty_object_uses_default_basemap() {
        let store = MemorySettingsStore::with_value(SETTINGS_KEY, "{}");
        assert_eq!(load_settings(&store).await.basemap, Basemap::CycleOsm);
    }

    #[tokio::test]
    async fn broken_store_is_not_fatal() {
        let store = MemorySettingsStore::failing();
        assert_eq!(load_settings(&store).await, Settings::default());
        let saved = save_settings(
            &store,
            Settings {
                basemap: Basemap::OpenStreetMap,
            },
        )
        .await;
        assert!(!saved);
    }

    #[tokio::test]
    async fn sqlite_store_persists_json_object() -> Result<(), Box<dyn std::error::Error>> {
        let pool = create_memory_pool().await?;
        let store = SqliteSettingsStore::new(pool.clone());

        let settings = Settings {
            basemap: Basemap::OpenStreetMap,
        };
        assert!(save_settings(&store, settings).await);

        let raw = get_preference(&pool, SETTINGS_KEY).await?;
        assert_eq!(raw.as_deref(), Some(r#"{"basemap":"openfreemap"}"#));
        assert_eq!(load_settings(&store).await, settings);
        Ok(())
    }
}
