//! SQLite storage for the pond analyzer.
//!
//! The analysis workflow only needs a string key-value store (prediction
//! history and the endpoint URL). This crate provides one on top of
//! `rusqlite`, either file-backed so data survives restarts or in-memory
//! for tests.
//!
//! # Usage
//!
//! ```rust
//! use pond_core::store::KeyValueStore;
//! use pond_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.set_item("pond_predictor_api_url", "http://localhost:5000/predict").unwrap();
//! assert_eq!(
//!     db.get_item("pond_predictor_api_url").unwrap().as_deref(),
//!     Some("http://localhost:5000/predict")
//! );
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.

pub mod schema;
mod queries;

use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// SQLite-backed key-value store.
///
/// Cheaply cloneable (via `Rc`); clones share one connection, which suits
/// the single-threaded analysis session.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Open (or create) a database file with the schema applied.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        log::info!("Opened pond store at {}", path.display());
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
