//! Click dispatch.
//!
//! Every document click is inspected once and mapped to at most one
//! [`Intent`]. Data attributes are parsed strictly here, at the boundary:
//! a control with a missing or malformed attribute yields an [`IntentError`]
//! instead of a half-built mutation.
//!
//! Rules, first match wins:
//!
//! 1. target has class `increase-btn` → [`Intent::Increase`]
//! 2. target has class `decrease-btn` → [`Intent::Decrease`]
//! 3. target or an ancestor has class `add-btn` → [`Intent::Add`]
//! 4. target or an ancestor has class `remove-item` → [`Intent::Remove`]
//! 5. target has id `clear-cart` → [`Intent::Clear`]
//! 6. target or an ancestor has id `checkout` → [`Intent::Checkout`]

use std::collections::BTreeMap;

use basket_core::{NewItem, Price, PriceError, ProductId, ProductIdError};
use thiserror::Error;

use crate::page::ElementRef;

/// Class names and ids the page markup uses for cart controls.
pub mod roles {
    /// Class of the per-line "+" button.
    pub const INCREASE: &str = "increase-btn";

    /// Class of the per-line "−" button.
    pub const DECREASE: &str = "decrease-btn";

    /// Class of a catalog "add to cart" control.
    pub const ADD: &str = "add-btn";

    /// Class of the per-line remove button.
    pub const REMOVE: &str = "remove-item";

    /// Id of the clear-cart trigger.
    pub const CLEAR_ID: &str = "clear-cart";

    /// Id of the checkout trigger.
    pub const CHECKOUT_ID: &str = "checkout";
}

/// What the dispatcher knows about one element on the click path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub element: ElementRef,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// `data-*` attributes, keyed without the `data-` prefix.
    pub data: BTreeMap<String, String>,
}

impl ElementInfo {
    #[must_use]
    pub const fn new(element: ElementRef) -> Self {
        Self {
            element,
            id: None,
            classes: Vec::new(),
            data: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// A click, described by the path from the target out through its ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    pub path: Vec<ElementInfo>,
}

impl ClickEvent {
    #[must_use]
    pub const fn new(path: Vec<ElementInfo>) -> Self {
        Self { path }
    }

    /// Click directly on one element with no interesting ancestors.
    #[must_use]
    pub fn on(target: ElementInfo) -> Self {
        Self { path: vec![target] }
    }

    #[must_use]
    pub fn target(&self) -> Option<&ElementInfo> {
        self.path.first()
    }

    /// Nearest element on the path (target first) with `class`.
    #[must_use]
    pub fn closest_with_class(&self, class: &str) -> Option<&ElementInfo> {
        self.path.iter().find(|el| el.has_class(class))
    }

    /// Nearest element on the path (target first) with DOM id `id`.
    #[must_use]
    pub fn closest_with_id(&self, id: &str) -> Option<&ElementInfo> {
        self.path.iter().find(|el| el.has_id(id))
    }
}

/// A cart operation requested by a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Increase(ProductId),
    Decrease(ProductId),
    /// Add an item; `control` is the add button to acknowledge.
    Add { item: NewItem, control: ElementRef },
    Remove(usize),
    Clear,
    Checkout,
}

/// A recognised control carried bad data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("{role} control is missing data-{attribute}")]
    MissingAttribute {
        role: &'static str,
        attribute: &'static str,
    },

    #[error("invalid product id: {0}")]
    InvalidId(#[from] ProductIdError),

    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("invalid line index: {0:?}")]
    InvalidIndex(String),
}

impl Intent {
    /// Map a click to an intent.
    ///
    /// Returns `Ok(None)` for clicks that hit no cart control.
    ///
    /// # Errors
    ///
    /// Returns `IntentError` when the matched control's data attributes are
    /// missing or malformed.
    pub fn from_click(event: &ClickEvent) -> Result<Option<Self>, IntentError> {
        let Some(target) = event.target() else {
            return Ok(None);
        };

        if target.has_class(roles::INCREASE) {
            return Ok(Some(Self::Increase(product_id(target, roles::INCREASE)?)));
        }

        if target.has_class(roles::DECREASE) {
            return Ok(Some(Self::Decrease(product_id(target, roles::DECREASE)?)));
        }

        if let Some(control) = event.closest_with_class(roles::ADD) {
            return Ok(Some(Self::Add {
                item: new_item(control)?,
                control: control.element,
            }));
        }

        if let Some(control) = event.closest_with_class(roles::REMOVE) {
            return Ok(Some(Self::Remove(line_index(control)?)));
        }

        if target.has_id(roles::CLEAR_ID) {
            return Ok(Some(Self::Clear));
        }

        if event.closest_with_id(roles::CHECKOUT_ID).is_some() {
            return Ok(Some(Self::Checkout));
        }

        Ok(None)
    }
}

// =============================================================================
// Attribute Parsing
// =============================================================================

fn required<'a>(
    el: &'a ElementInfo,
    role: &'static str,
    attribute: &'static str,
) -> Result<&'a str, IntentError> {
    el.data(attribute)
        .ok_or(IntentError::MissingAttribute { role, attribute })
}

fn product_id(el: &ElementInfo, role: &'static str) -> Result<ProductId, IntentError> {
    Ok(ProductId::parse(required(el, role, "id")?)?)
}

fn new_item(el: &ElementInfo) -> Result<NewItem, IntentError> {
    Ok(NewItem {
        id: product_id(el, roles::ADD)?,
        name: required(el, roles::ADD, "name")?.to_string(),
        price: Price::parse(required(el, roles::ADD, "price")?)?,
        img: required(el, roles::ADD, "img")?.to_string(),
    })
}

fn line_index(el: &ElementInfo) -> Result<usize, IntentError> {
    let raw = required(el, roles::REMOVE, "index")?;
    raw.trim()
        .parse::<usize>()
        .map_err(|_| IntentError::InvalidIndex(raw.to_string()))
}
