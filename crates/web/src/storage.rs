//! `localStorage` backend.

use basket_storefront::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;

/// Cart storage in the page origin's `localStorage`.
///
/// Missing storage (privacy mode, sandboxed frames) surfaces as
/// `StorageError::Unavailable` on every call, which the widget treats as an
/// empty, non-persistent cart.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    #[must_use]
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
    }
}

fn js_error(e: &JsValue) -> StorageError {
    StorageError::Unavailable(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|e| js_error(&e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| js_error(&e))
    }
}
