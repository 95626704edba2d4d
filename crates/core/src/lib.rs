//! Basket Core - cart types and mutations.
//!
//! This crate provides the types used across all Basket components:
//! - `storefront` - The cart widget (store, renderer, dispatcher, checkout)
//! - `cli` - Headless driver for the widget
//! - `web` - Browser binding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no rendering. This keeps it lightweight and allows it to be used anywhere,
//! including `wasm32` targets.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and quantities
//! - [`cart`] - The ordered line-item collection and its mutations
//! - [`format`] - Locale-style number formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod format;
pub mod types;

pub use cart::{Cart, Change};
pub use format::NumberFormat;
pub use types::*;
