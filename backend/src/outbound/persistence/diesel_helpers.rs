//! Shared failure classification for Diesel adapters.
//!
//! Adapters map [`AdapterFailure`] into their port's error enum; this module
//! keeps the Diesel/pool error inspection (and its debug logging) in one
//! place.

use tracing::debug;

use super::pool::PoolError;

/// Transport-agnostic split of adapter failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AdapterFailure {
    /// Could not reach the database.
    Connection(String),
    /// The database rejected or failed the operation.
    Query(String),
}

/// Classify a pool failure.
pub(crate) fn classify_pool_error(error: PoolError) -> AdapterFailure {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AdapterFailure::Connection(message)
        }
    }
}

/// Classify a Diesel failure, logging the specifics at debug level so the
/// message handed to the domain stays generic.
pub(crate) fn classify_diesel_error(error: diesel::result::Error) -> AdapterFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => {
            debug!(error = %other, "diesel operation failed");
        }
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AdapterFailure::Connection("database connection error".to_owned())
        }
        DieselError::NotFound => AdapterFailure::Query("record not found".to_owned()),
        _ => AdapterFailure::Query("database error".to_owned()),
    }
}
