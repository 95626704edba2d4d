//! Core types for Basket.
//!
//! This module provides type-safe wrappers for the line-item fields.

pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;

pub use id::{ProductId, ProductIdError};
pub use line_item::{LineItem, NewItem};
pub use price::{Price, PriceError};
pub use quantity::Quantity;
