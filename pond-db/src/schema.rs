//! SQL schema for the pond store.
//!
//! Applied as a single batch whenever a database is opened.

/// Returns the full SQL schema as a single batch string.
///
/// - `kv_store` - one row per storage key, holding its string value and the
///   UTC time it was last written
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS kv_store (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#
}
