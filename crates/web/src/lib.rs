//! Basket browser binding.
//!
//! Runs the cart widget inside a page: the cart is kept in `localStorage`,
//! the widget paints into the page's cart regions, and one document-level
//! click listener feeds every click to the dispatcher.

// wasm-bindgen expands to unsafe glue code.
#![allow(unsafe_code)]

pub mod dom;
pub mod events;
pub mod logging;
pub mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use basket_storefront::{CartWidget, WidgetConfig};
use wasm_bindgen::prelude::*;

use crate::dom::DomPage;
use crate::storage::LocalStore;

/// The widget as it runs in the browser.
pub type BrowserWidget = CartWidget<LocalStore, DomPage>;

/// Shared handle used by every listener and timer.
pub type SharedWidget = Rc<RefCell<BrowserWidget>>;

/// WASM entry point - called automatically when the module is instantiated.
///
/// # Errors
///
/// Returns the JS error if the document is unavailable or a listener cannot
/// be attached.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();
    logging::init();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let config = WidgetConfig::default();
    let widget: SharedWidget = Rc::new_cyclic(|handle| {
        RefCell::new(CartWidget::new(
            &config,
            LocalStore::new(),
            DomPage::new(document.clone(), handle.clone()),
        ))
    });

    events::bind_events(&document, &widget)?;

    tracing::info!(items = widget.borrow().cart().len(), "Cart widget ready");
    Ok(())
}
