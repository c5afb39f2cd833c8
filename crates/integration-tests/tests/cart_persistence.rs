//! Integration tests for snapshot persistence, restarts and recovery.
//!
//! Run with: cargo test -p go-market-integration-tests

use go_market_cart::{NewCartItem, StorageBackend as _};
use go_market_core::ProductId;
use go_market_integration_tests::TestCart;
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn product(id: &str, title: &str, price: Decimal) -> NewCartItem {
    NewCartItem {
        id: ProductId::new(id),
        title: title.to_owned(),
        image_url: format!("https://cdn.example.com/{id}.png"),
        price,
    }
}

// ============================================================================
// Snapshot Format
// ============================================================================

#[tokio::test]
async fn test_snapshot_is_a_json_array_of_records() {
    let env = TestCart::new();
    let store = env.open().await;

    store
        .add_to_cart(product("shirt-01", "Shirt", Decimal::new(125, 1)))
        .await
        .expect("add");
    store
        .increment(&ProductId::new("shirt-01"))
        .await
        .expect("increment");

    let raw = env.raw_snapshot().await.expect("snapshot written");
    let value: Value = serde_json::from_str(&raw).expect("snapshot parses");
    assert_eq!(
        value,
        json!([{
            "id": "shirt-01",
            "title": "Shirt",
            "image_url": "https://cdn.example.com/shirt-01.png",
            "price": 12.5,
            "quantity": 2,
        }])
    );
}

#[tokio::test]
async fn test_emptying_the_cart_persists_an_empty_array() {
    let env = TestCart::new();
    let store = env.open().await;

    store
        .add_to_cart(product("a", "A", Decimal::from(10)))
        .await
        .expect("add");
    store
        .decrement(&ProductId::new("a"))
        .await
        .expect("decrement");

    let raw = env.raw_snapshot().await.expect("snapshot written");
    assert_eq!(raw, "[]");
}

// ============================================================================
// Restart Survival
// ============================================================================

#[tokio::test]
async fn test_cart_survives_a_restart() {
    let env = TestCart::new();

    let store = env.open().await;
    store
        .add_to_cart(product("a", "Shirt", Decimal::new(125, 1)))
        .await
        .expect("add a");
    store
        .add_to_cart(product("b", "Mug", Decimal::from(8)))
        .await
        .expect("add b");
    store
        .increment(&ProductId::new("a"))
        .await
        .expect("increment");
    let expected = store.products();
    drop(store);

    let reopened = env.open().await;
    assert_eq!(reopened.products(), expected);
}

#[tokio::test]
async fn test_restarted_store_keeps_mutating_from_loaded_state() {
    let env = TestCart::new();

    let store = env.open().await;
    store
        .add_to_cart(product("a", "A", Decimal::from(10)))
        .await
        .expect("add");
    drop(store);

    let reopened = env.open().await;
    reopened
        .add_to_cart(product("a", "A", Decimal::from(10)))
        .await
        .expect("repeat add after restart");

    let products = reopened.products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].quantity, 2);
}

// ============================================================================
// Corrupt-State Recovery
// ============================================================================

#[tokio::test]
async fn test_corrupt_snapshot_opens_as_empty_cart() {
    let env = TestCart::new();
    env.storage
        .set(&env.config.cart_key(), "{definitely not an array".to_owned())
        .await
        .expect("write corrupt snapshot");

    let store = env.open().await;
    assert!(store.products().is_empty());

    // The store remains fully usable and overwrites the corrupt slot.
    store
        .add_to_cart(product("a", "A", Decimal::from(10)))
        .await
        .expect("add after recovery");
    let raw = env.raw_snapshot().await.expect("snapshot rewritten");
    assert!(serde_json::from_str::<Value>(&raw).is_ok());
}

#[tokio::test]
async fn test_stores_with_different_namespaces_do_not_share_state() {
    let env = TestCart::new();
    let other = go_market_cart::CartConfig {
        storage_dir: env.config.storage_dir.clone(),
        namespace: format!("{}-other", env.config.namespace),
    };

    let store = env.open().await;
    store
        .add_to_cart(product("a", "A", Decimal::from(10)))
        .await
        .expect("add");

    let other_store = go_market_cart::CartStore::open(env.storage.clone(), &other)
        .await
        .expect("open other namespace");
    assert!(other_store.products().is_empty());
}
