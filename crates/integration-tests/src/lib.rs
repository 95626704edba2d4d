//! End-to-end tests for the basket cart widget.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p basket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Mutation sequences and rendered totals
//! - `persistence` - Reload from storage, malformed persisted state
//! - `clicks` - Document clicks through the dispatcher, highlight timers, checkout
//!
//! [`TestContext`] gives each test its own storage directory so widgets can be
//! dropped and reopened the way a page is reloaded.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::fs;
use std::io;
use std::path::PathBuf;

use basket_core::{NewItem, Price, ProductId, ProductIdError};
use basket_storefront::dispatch::roles;
use basket_storefront::{
    CartWidget, ClickEvent, ElementInfo, ElementRef, FileStore, RecordingPage, StorageError,
    WidgetConfig,
};
use tempfile::TempDir;

/// Widget under test.
pub type TestWidget = CartWidget<FileStore, RecordingPage>;

/// An isolated storage directory standing in for one browser profile.
pub struct TestContext {
    dir: TempDir,
    pub config: WidgetConfig,
}

impl TestContext {
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            config: WidgetConfig::default(),
        })
    }

    /// Storage backed by this context's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be opened.
    pub fn storage(&self) -> Result<FileStore, StorageError> {
        FileStore::open(self.dir.path())
    }

    /// Open a widget on this context's storage, as on a fresh page load.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be opened.
    pub fn load(&self) -> Result<TestWidget, StorageError> {
        Ok(CartWidget::new(&self.config, self.storage()?, RecordingPage::new()))
    }

    /// Path of the persisted cart file.
    #[must_use]
    pub fn cart_path(&self) -> PathBuf {
        self.dir
            .path()
            .join(format!("{}.json", self.config.storage_key))
    }

    /// Raw persisted cart, if any.
    #[must_use]
    pub fn persisted(&self) -> Option<String> {
        fs::read_to_string(self.cart_path()).ok()
    }

    /// Overwrite the persisted cart with arbitrary text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_persisted(&self, raw: &str) -> io::Result<()> {
        fs::write(self.cart_path(), raw)
    }
}

/// Catalog product with an integral price.
///
/// # Errors
///
/// Returns an error if `id` is not a valid product id.
pub fn product(id: &str, price: u64) -> Result<NewItem, ProductIdError> {
    Ok(NewItem {
        id: ProductId::parse(id)?,
        name: format!("Product {id}"),
        price: Price::new(price),
        img: format!("/img/{id}.jpg"),
    })
}

/// Click on the icon inside an add button, as most real clicks land.
#[must_use]
pub fn click_add(button: u64, id: &str, name: &str, price: &str) -> ClickEvent {
    let icon = ElementInfo::new(ElementRef::new(button + 1000)).with_class("bi-cart-plus");
    let control = ElementInfo::new(ElementRef::new(button))
        .with_class("btn")
        .with_class(roles::ADD)
        .with_data("id", id)
        .with_data("name", name)
        .with_data("price", price)
        .with_data("img", format!("/img/{id}.jpg"));
    ClickEvent::new(vec![icon, control])
}

/// Click on a per-line control carrying `data-id`.
#[must_use]
pub fn click_line(role: &str, id: &str) -> ClickEvent {
    ClickEvent::on(
        ElementInfo::new(ElementRef::new(1))
            .with_class(role)
            .with_data("id", id),
    )
}

/// Click on a remove control carrying `data-index`.
#[must_use]
pub fn click_remove(index: &str) -> ClickEvent {
    ClickEvent::on(
        ElementInfo::new(ElementRef::new(1))
            .with_class(roles::REMOVE)
            .with_data("index", index),
    )
}

/// Click on the element with DOM id `id`.
#[must_use]
pub fn click_id(id: &str) -> ClickEvent {
    ClickEvent::on(ElementInfo::new(ElementRef::new(1)).with_id(id))
}
