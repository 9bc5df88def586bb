//! Shared error mapping for the SQLite persistence layer

use std::fmt::Display;

use application::ApplicationError;
use tokio::task::JoinError;
use tracing::error;

/// Map a driver or pool error to a store error, keeping its message
pub fn map_store_error(e: impl Display) -> ApplicationError {
    let message = e.to_string();
    error!(error = %message, "Store operation failed");
    ApplicationError::Store(message)
}

/// Map a failed blocking task to an internal error
pub fn map_join_error(e: JoinError) -> ApplicationError {
    error!(error = %e, "Blocking store task failed");
    ApplicationError::Internal(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_keeps_message() {
        let err = map_store_error(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, ApplicationError::Store(msg) if msg == "Query returned no rows"));
    }
}
