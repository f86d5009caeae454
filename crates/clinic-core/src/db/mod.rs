//! Database layer for clinic-core.

mod schema;
mod patients;
mod appointments;
mod cases;
mod prescriptions;
mod fees;
mod medicines;
mod followups;
mod settings;

pub use schema::*;
#[allow(unused_imports)]
pub use patients::*;
#[allow(unused_imports)]
pub use appointments::*;
#[allow(unused_imports)]
pub use cases::*;
#[allow(unused_imports)]
pub use prescriptions::*;
#[allow(unused_imports)]
pub use fees::*;
#[allow(unused_imports)]
pub use medicines::*;
#[allow(unused_imports)]
pub use followups::*;
#[allow(unused_imports)]
pub use settings::*;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DbError {
    /// True when the underlying SQLite error is a uniqueness violation.
    /// Callers regenerating random identifiers retry on exactly this case.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Sqlite(rusqlite::Error::SqliteFailure(e, _)) => {
                e.code == rusqlite::ErrorCode::ConstraintViolation
            }
            _ => false,
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Decode failure for an enum-valued TEXT column.
pub(crate) fn column_decode_error(idx: usize, what: &str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        format!("unknown {}: {}", what, value).into(),
    )
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        tracing::debug!("clinic schema initialized");
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a deferred transaction.
    pub fn transaction(&mut self) -> DbResult<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Begin an immediate transaction. Number assignment (tokens, case
    /// numbers) runs under this so the count and the insert cannot be
    /// interleaved with another writer.
    pub fn immediate_transaction(&mut self) -> DbResult<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}
