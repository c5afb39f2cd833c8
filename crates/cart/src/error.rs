//! Unified error handling for the cart store.
//!
//! Storage and snapshot failures are propagated as [`CartError`]; absent
//! items on increment/decrement are benign no-ops and never surface here.

use thiserror::Error;

use crate::storage::StorageError;

/// Cart-level error type.
#[derive(Debug, Error)]
pub enum CartError {
    /// Durable storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart snapshot could not be serialized.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A handle was used after its owning store was dropped.
    #[error("cart used outside an active store scope")]
    Closed,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::Closed;
        assert_eq!(err.to_string(), "cart used outside an active store scope");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CartError::Storage(StorageError::Io(io));
        assert!(err.to_string().starts_with("Storage error:"));
    }
}
