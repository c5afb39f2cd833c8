//! The cart store: authoritative in-memory state plus a durable snapshot.
//!
//! Every mutation computes the next collection, commits it synchronously as
//! the new authoritative in-memory value, and only then awaits the durable
//! write of that exact value. Back-to-back operations therefore never
//! observe stale state, even while a write is still in flight.

use std::sync::{Arc, Weak};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::instrument;

use go_market_core::ProductId;

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::models::{CartItem, NewCartItem};
use crate::storage::StorageBackend;

/// Capability interface handed to UI components.
///
/// Components depend on this trait rather than on a concrete store, so a
/// single store instance can back any number of consumers without ambient
/// global lookup.
#[async_trait]
pub trait Cart: Send + Sync {
    /// Current cart lines, in insertion order.
    fn products(&self) -> Result<Vec<CartItem>>;

    /// Add one unit of a product, appending the line on first add.
    async fn add_to_cart(&self, item: NewCartItem) -> Result<()>;

    /// Add one unit to an existing line. Unknown ids are a benign no-op.
    async fn increment(&self, id: &ProductId) -> Result<()>;

    /// Remove one unit from a line, dropping it at zero. Unknown ids are a
    /// benign no-op.
    async fn decrement(&self, id: &ProductId) -> Result<()>;
}

struct StoreInner {
    /// Authoritative collection; the watch channel doubles as the reactive
    /// layer notifying subscribers of every committed change.
    products: watch::Sender<Vec<CartItem>>,
    storage: Arc<dyn StorageBackend>,
    key: String,
}

impl StoreInner {
    fn current(&self) -> Vec<CartItem> {
        self.products.borrow().clone()
    }

    /// Apply `mutate`, commit the result in memory, then persist exactly the
    /// committed value.
    ///
    /// `mutate` receives the current collection and returns the next one, or
    /// `None` for a no-op (nothing committed, persisted, or notified). The
    /// commit happens under the channel lock before the durable write is
    /// awaited. If the write fails the in-memory state stays committed and
    /// the error is surfaced to the caller.
    async fn commit_and_persist<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&[CartItem]) -> Option<Vec<CartItem>>,
    {
        let mut committed: Option<Vec<CartItem>> = None;
        self.products.send_if_modified(|products| {
            if let Some(next) = mutate(products) {
                *products = next;
                committed = Some(products.clone());
                true
            } else {
                false
            }
        });

        let Some(snapshot) = committed else {
            return Ok(());
        };

        let raw = serde_json::to_string(&snapshot)?;
        if let Err(e) = self.storage.set(&self.key, raw).await {
            tracing::error!(
                key = %self.key,
                error = %e,
                "cart snapshot write failed; memory and durable state have diverged"
            );
            return Err(e.into());
        }
        Ok(())
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn add_to_cart(&self, item: NewCartItem) -> Result<()> {
        self.commit_and_persist(move |products| {
            let mut next = products.to_vec();
            if let Some(existing) = next.iter_mut().find(|line| line.id == item.id) {
                // Repeat add changes only the quantity; the stored line's
                // title, image and price win over the caller's copy.
                existing.quantity += 1;
            } else {
                next.push(item.into_item());
            }
            Some(next)
        })
        .await
    }

    #[instrument(skip(self, id), fields(id = %id))]
    async fn increment(&self, id: &ProductId) -> Result<()> {
        self.commit_and_persist(|products| {
            let pos = products.iter().position(|line| line.id == *id)?;
            let mut next = products.to_vec();
            next.get_mut(pos)?.quantity += 1;
            Some(next)
        })
        .await
    }

    #[instrument(skip(self, id), fields(id = %id))]
    async fn decrement(&self, id: &ProductId) -> Result<()> {
        self.commit_and_persist(|products| {
            let pos = products.iter().position(|line| line.id == *id)?;
            let mut next = products.to_vec();
            match next.get_mut(pos) {
                Some(line) if line.quantity > 1 => line.quantity -= 1,
                _ => {
                    next.remove(pos);
                }
            }
            Some(next)
        })
        .await
    }
}

/// Authoritative cart state container.
///
/// Owns the in-memory collection and keeps the durable snapshot consistent
/// with it. Exactly one store backs a storefront session; consumers receive
/// [`CartHandle`]s via [`CartStore::handle`].
pub struct CartStore {
    inner: Arc<StoreInner>,
}

impl CartStore {
    /// Open the store, loading the persisted snapshot once.
    ///
    /// A missing snapshot yields an empty cart. A malformed snapshot is
    /// logged and treated as empty, so corrupt local state never crashes
    /// the application. The snapshot is never re-read after this point;
    /// the in-memory collection is authoritative for the session.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the backend itself fails to read —
    /// a backend that cannot read will not be able to persist either.
    pub async fn open(storage: Arc<dyn StorageBackend>, config: &CartConfig) -> Result<Self> {
        let key = config.cart_key();
        let products = match storage.get(&key).await? {
            Some(raw) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "malformed cart snapshot, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        tracing::debug!(key = %key, lines = products.len(), "cart store opened");

        let (tx, _rx) = watch::channel(products);
        Ok(Self {
            inner: Arc::new(StoreInner {
                products: tx,
                storage,
                key,
            }),
        })
    }

    /// Create a consumer handle onto this store.
    ///
    /// Handles are cheap to clone and do not keep the store alive: once the
    /// store is dropped, every operation on a leftover handle fails with
    /// [`CartError::Closed`].
    #[must_use]
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn products(&self) -> Vec<CartItem> {
        self.inner.current()
    }

    /// Subscribe to committed collection changes.
    ///
    /// The receiver's initial value is the current collection; every
    /// committed mutation publishes the full new collection. No-op
    /// operations do not notify.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.inner.products.subscribe()
    }

    /// Add one unit of a product.
    ///
    /// If a line with the same id already exists, only its quantity grows;
    /// the stored title, image and price are kept and the caller's copies
    /// are ignored. Otherwise the product is appended with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the committed collection cannot be persisted.
    /// The in-memory commit stands either way.
    pub async fn add_to_cart(&self, item: NewCartItem) -> Result<()> {
        self.inner.add_to_cart(item).await
    }

    /// Add one unit to the line identified by `id`.
    ///
    /// Unknown ids are a benign no-op: nothing changes and nothing is
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the committed collection cannot be persisted.
    pub async fn increment(&self, id: &ProductId) -> Result<()> {
        self.inner.increment(id).await
    }

    /// Remove one unit from the line identified by `id`.
    ///
    /// A line at quantity 1 is removed outright; unknown ids are a benign
    /// no-op. Both mutation branches persist the committed collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the committed collection cannot be persisted.
    pub async fn decrement(&self, id: &ProductId) -> Result<()> {
        self.inner.decrement(id).await
    }
}

#[async_trait]
impl Cart for CartStore {
    fn products(&self) -> Result<Vec<CartItem>> {
        Ok(Self::products(self))
    }

    async fn add_to_cart(&self, item: NewCartItem) -> Result<()> {
        Self::add_to_cart(self, item).await
    }

    async fn increment(&self, id: &ProductId) -> Result<()> {
        Self::increment(self, id).await
    }

    async fn decrement(&self, id: &ProductId) -> Result<()> {
        Self::decrement(self, id).await
    }
}

/// Cheaply cloneable consumer handle onto a [`CartStore`].
#[derive(Clone)]
pub struct CartHandle {
    inner: Weak<StoreInner>,
}

impl CartHandle {
    fn upgrade(&self) -> Result<Arc<StoreInner>> {
        self.inner.upgrade().ok_or(CartError::Closed)
    }

    /// Subscribe to committed collection changes.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Closed` if the owning store has been dropped.
    pub fn subscribe(&self) -> Result<watch::Receiver<Vec<CartItem>>> {
        Ok(self.upgrade()?.products.subscribe())
    }
}

#[async_trait]
impl Cart for CartHandle {
    fn products(&self) -> Result<Vec<CartItem>> {
        Ok(self.upgrade()?.current())
    }

    async fn add_to_cart(&self, item: NewCartItem) -> Result<()> {
        self.upgrade()?.add_to_cart(item).await
    }

    async fn increment(&self, id: &ProductId) -> Result<()> {
        self.upgrade()?.increment(id).await
    }

    async fn decrement(&self, id: &ProductId) -> Result<()> {
        self.upgrade()?.decrement(id).await
    }
}
