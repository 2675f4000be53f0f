//! Error type shared by schema bootstrap, repository and service code.
//!
//! # Invariants
//! - SQLite failures are carried unchanged in `Db` so callers can inspect
//!   the extended result code.
//! - Guard rejections (`InvalidTransition`, `StatusConflict`) never wrap a
//!   SQLite error; the statement itself succeeded but matched no row.

use crate::model::parcel::{ParcelNumber, ParcelValidationError, STATUS_REGISTERED};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    /// Statement execution or connection failure.
    Db(rusqlite::Error),
    /// No parcel row for the given number.
    NotFound(ParcelNumber),
    /// Address change or deletion attempted while status is not `registered`.
    InvalidTransition {
        number: ParcelNumber,
        status: String,
    },
    /// Status moved away from the value a conditional status change was
    /// computed from.
    StatusConflict {
        number: ParcelNumber,
        expected: String,
        actual: String,
    },
    Validation(ParcelValidationError),
    /// Database was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection has not been bootstrapped to the current schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::InvalidTransition { number, status } => write!(
                f,
                "parcel {number} has status `{status}`; address change and deletion require `{STATUS_REGISTERED}`"
            ),
            Self::StatusConflict {
                number,
                expected,
                actual,
            } => write!(
                f,
                "parcel {number} status changed concurrently: expected `{expected}`, found `{actual}`"
            ),
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "parcel database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "parcel repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "parcel repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "parcel repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted parcel data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParcelValidationError> for RepoError {
    fn from(value: ParcelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(value)
    }
}
