use sqlx::FromRow;

/// One row of the key/value preference table
#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct PreferenceRecord {
    pub key: String,
    pub value: String,
    pub updated: String,
}
