//! Event binding.
//!
//! One capture-all click listener on the document feeds the dispatcher, and
//! the cart modal repaints each time it is shown.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event};

use crate::SharedWidget;
use crate::dom::catch_up;

/// Id of the cart modal element.
const CART_MODAL_ID: &str = "cartModal";

/// Event fired by the modal component once it is visible.
const MODAL_SHOWN_EVENT: &str = "shown.bs.modal";

/// Bind all listeners. Call once after the widget is created.
///
/// # Errors
///
/// Returns the JS error if a listener cannot be attached.
pub fn bind_events(document: &Document, widget: &SharedWidget) -> Result<(), JsValue> {
    // ── Document clicks ──
    {
        let widget = widget.clone();
        let cb = Closure::wrap(Box::new(move |event: Event| {
            let Ok(mut widget) = widget.try_borrow_mut() else {
                tracing::warn!("Widget busy, ignoring click");
                return;
            };
            catch_up(&mut widget);
            let click = widget.page_mut().click_event(&event);
            widget.handle_click(&click);
        }) as Box<dyn FnMut(_)>);
        document.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    // ── Modal shown ──
    if let Some(modal) = document.get_element_by_id(CART_MODAL_ID) {
        let widget = widget.clone();
        let cb = Closure::wrap(Box::new(move |_: Event| {
            if let Ok(mut widget) = widget.try_borrow_mut() {
                catch_up(&mut widget);
                widget.refresh();
            }
        }) as Box<dyn FnMut(_)>);
        modal.add_event_listener_with_callback(MODAL_SHOWN_EVENT, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    Ok(())
}
