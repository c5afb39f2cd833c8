//! GoMarket cart state container.
//!
//! Holds the authoritative in-memory cart collection for a storefront
//! session, mirrors every mutation into a durable key-value snapshot, and
//! exposes add/increment/decrement operations to consumers.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the collection and loads the persisted snapshot once
//!   at startup.
//! - [`CartHandle`] is the cheap capability handed to consumers; it fails
//!   fast once the owning store is gone.
//! - [`StorageBackend`] abstracts the device-local key-value store the
//!   snapshot lives in. [`FileStorage`] persists one file per key;
//!   [`MemoryStorage`] keeps everything in-process.
//!
//! Snapshots are JSON arrays of [`CartItem`] records stored under a fixed
//! namespaced key (see [`CartConfig::cart_key`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use models::{CartItem, NewCartItem};
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError};
pub use store::{Cart, CartHandle, CartStore};
