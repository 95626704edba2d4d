//! Cart persistence over a key-value slot.

use basket_core::Cart;
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};

/// Errors writing the cart back to storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The cart's storage slot.
///
/// Holds the backend and the fixed key. The stored value is the JSON array of
/// line items, with no version field.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Read the persisted cart.
    ///
    /// Never fails: a missing slot, an unreadable backend, or malformed
    /// contents all yield an empty cart.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read cart, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                tracing::debug!(key = %self.key, items = cart.len(), "Loaded cart");
                cart
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding malformed cart");
                Cart::new()
            }
        }
    }

    /// Overwrite the slot with the full cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the backend write fails.
    pub fn persist(&mut self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set(&self.key, &raw)?;
        Ok(())
    }

    /// The storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}
