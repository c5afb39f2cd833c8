//! Cart snapshot commands.
//!
//! Every command opens the store against the configured file storage,
//! performs one operation through the same code path the application uses,
//! and lets the store persist the result.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use go_market_cart::{CartConfig, CartError, CartStore, ConfigError, FileStorage, NewCartItem};
use go_market_core::ProductId;

/// Errors raised by cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

/// Open the store against the configured file storage.
async fn open_store() -> Result<CartStore, CartCommandError> {
    let config = CartConfig::from_env()?;
    let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
    tracing::debug!(dir = %config.storage_dir.display(), key = %config.cart_key(), "opening cart store");
    Ok(CartStore::open(storage, &config).await?)
}

/// Print the current cart lines.
#[allow(clippy::print_stdout)] // table output is this command's purpose
pub async fn list() -> Result<(), CartCommandError> {
    let store = open_store().await?;
    let products = store.products();

    if products.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }

    println!("{:<24} {:<32} {:>4} {:>12}", "ID", "TITLE", "QTY", "PRICE");
    for line in &products {
        println!(
            "{:<24} {:<32} {:>4} {:>12}",
            line.id, line.title, line.quantity, line.price
        );
    }
    Ok(())
}

/// Add one unit of a product.
pub async fn add(
    id: String,
    title: String,
    image_url: String,
    price: Decimal,
) -> Result<(), CartCommandError> {
    let store = open_store().await?;
    let id = ProductId::new(id);
    store
        .add_to_cart(NewCartItem {
            id: id.clone(),
            title,
            image_url,
            price,
        })
        .await?;

    tracing::info!("Added one unit of {id}");
    Ok(())
}

/// Add one unit of an existing line.
pub async fn increment(id: &str) -> Result<(), CartCommandError> {
    let store = open_store().await?;
    let id = ProductId::new(id);
    let before = store.products();
    store.increment(&id).await?;

    if before.iter().any(|line| line.id == id) {
        tracing::info!("Incremented {id}");
    } else {
        tracing::warn!("No cart line with id {id}; nothing changed");
    }
    Ok(())
}

/// Remove one unit of a line.
pub async fn decrement(id: &str) -> Result<(), CartCommandError> {
    let store = open_store().await?;
    let id = ProductId::new(id);
    let before = store.products();
    store.decrement(&id).await?;

    match before.iter().find(|line| line.id == id) {
        Some(line) if line.quantity == 1 => tracing::info!("Removed {id} from the cart"),
        Some(_) => tracing::info!("Decremented {id}"),
        None => tracing::warn!("No cart line with id {id}; nothing changed"),
    }
    Ok(())
}
