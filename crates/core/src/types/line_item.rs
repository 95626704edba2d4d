//! Line items: one distinct product in the cart.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Quantity};

/// A product entry in the cart, with its quantity.
///
/// This is also the persisted shape: the fields serialize as
/// `id`, `name`, `price`, `img`, `qty`.
///
/// `name` and `img` come from page markup and are untrusted. They are stored
/// verbatim and escaped at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub img: String,
    pub qty: Quantity,
}

impl LineItem {
    /// `price * qty` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// A product about to be added to the cart.
///
/// Produced by parsing an "add" control's data attributes. It carries no
/// quantity; adding it either appends a line with a quantity of one or bumps
/// the existing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub img: String,
}

impl NewItem {
    /// Convert into a single-unit line item.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name,
            price: self.price,
            img: self.img,
            qty: Quantity::ONE,
        }
    }
}
