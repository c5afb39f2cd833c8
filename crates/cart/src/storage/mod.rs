//! Durable key-value storage for cart snapshots.
//!
//! The store treats persistence as an opaque key-value collaborator: string
//! keys map to string values, and reads of unknown keys yield `None`. The
//! trait mirrors the surface of a device-local storage layer so backends can
//! be swapped without touching cart semantics.

use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opaque key-value store used to persist cart snapshots.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the value cannot be written durably.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}
