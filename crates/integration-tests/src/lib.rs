//! Integration tests for GoMarket.
//!
//! These tests drive the cart store end-to-end against the real file-backed
//! storage, each in its own temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-market-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_operations` - Store operation semantics over file storage
//! - `cart_persistence` - Snapshot format, restarts and corrupt-state recovery

use std::sync::Arc;

use go_market_cart::{CartConfig, CartStore, FileStorage};

/// Per-test cart environment: an isolated storage directory plus config.
///
/// The namespace is unique per instance so tests can never read each
/// other's snapshots, mirroring how each app install owns its own slot.
pub struct TestCart {
    pub config: CartConfig,
    pub storage: Arc<FileStorage>,
    // Keeps the temp directory alive for the duration of the test.
    _dir: tempfile::TempDir,
}

impl TestCart {
    /// Create an isolated storage directory and config for one test.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = CartConfig {
            storage_dir: dir.path().to_path_buf(),
            namespace: format!("@Test-{}", uuid::Uuid::new_v4()),
        };
        let storage = Arc::new(FileStorage::new(dir.path()));
        Self {
            config,
            storage,
            _dir: dir,
        }
    }

    /// Open a store over this environment's storage.
    pub async fn open(&self) -> CartStore {
        CartStore::open(self.storage.clone(), &self.config)
            .await
            .expect("open cart store")
    }

    /// The raw snapshot string currently on disk, if any.
    pub async fn raw_snapshot(&self) -> Option<String> {
        use go_market_cart::StorageBackend as _;
        self.storage
            .get(&self.config.cart_key())
            .await
            .expect("read snapshot")
    }
}

impl Default for TestCart {
    fn default() -> Self {
        Self::new()
    }
}
