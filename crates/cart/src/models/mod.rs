//! Domain models for the cart.
//!
//! These types double as the snapshot wire format: the serialized field
//! names and value shapes are part of the durable contract, not an
//! implementation detail.

pub mod item;

pub use item::{CartItem, NewCartItem};
