//! Clinic operations: the workflows the front desk and doctor drive.
//!
//! Everything here composes the storage layer into whole actions. Number
//! assignment (tokens, case numbers) runs inside an immediate transaction;
//! random identifiers (registration, receipt, prescription numbers) are
//! regenerated and retried when the backing UNIQUE column rejects them.

mod registration;
mod scheduling;
mod casebook;
mod prescribing;
mod billing;
mod inventory;

pub use registration::*;
pub use scheduling::*;
pub use casebook::*;
pub use prescribing::*;
pub use billing::*;
pub use inventory::*;

use thiserror::Error;

use crate::db::DbError;

/// How many times a random identifier is regenerated before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Errors from clinic operations.
#[derive(Error, Debug)]
pub enum OpsError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("could not generate a unique {0} after {MAX_GENERATION_ATTEMPTS} attempts")]
    GenerationFailed(&'static str),

    #[error("{entity} {id} not found")]
    MissingReference { entity: &'static str, id: i64 },

    #[error("appointment {id} is {status} and cannot change to {requested}")]
    InvalidTransition {
        id: i64,
        status: &'static str,
        requested: &'static str,
    },

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<rusqlite::Error> for OpsError {
    fn from(e: rusqlite::Error) -> Self {
        OpsError::Db(DbError::from(e))
    }
}

pub type OpsResult<T> = Result<T, OpsError>;

/// Validate a `YYYY-MM-DD` calendar date.
pub(crate) fn validate_date(field: &str, value: &str) -> OpsResult<()> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| OpsError::Validation(format!("{} must be YYYY-MM-DD, got {:?}", field, value)))
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> OpsResult<()> {
    if value.trim().is_empty() {
        return Err(OpsError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
