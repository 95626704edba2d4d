//! The cart: an ordered, id-unique sequence of line items.
//!
//! All mutations are total. Targeting an absent id or an out-of-range index
//! is a no-op reported as [`Change::Unchanged`], never an error.

use serde::{Deserialize, Serialize};

use crate::types::{LineItem, NewItem, Price, ProductId};

/// Outcome of a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// A new line was appended.
    Added,
    /// An existing line's quantity went up by one.
    Incremented,
    /// An existing line's quantity went down by one.
    Decremented,
    /// A line was removed.
    Removed,
    /// Every line was removed.
    Cleared,
    /// Nothing matched; the cart is as it was.
    Unchanged,
}

impl Change {
    /// Whether the cart needs persisting and repainting.
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Ordered collection of line items, unique by product id.
///
/// Order is insertion order. Serializes as a plain JSON array of line items.
/// When deserializing, later duplicates of an id are dropped so the
/// uniqueness invariant holds even for hand-edited storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items (what the badge shows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty.get())).sum()
    }

    /// Sum of `price * qty` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Add one unit of a product.
    ///
    /// If the id is already present its quantity goes up by one and the
    /// incoming name, price and image are ignored. Otherwise the item is
    /// appended with a quantity of one.
    pub fn add(&mut self, item: NewItem) -> Change {
        if let Some(existing) = self.get_mut(&item.id) {
            existing.qty = existing.qty.increment();
            return Change::Incremented;
        }

        self.items.push(item.into_line_item());
        Change::Added
    }

    /// Add one unit to an existing line.
    pub fn increase(&mut self, id: &ProductId) -> Change {
        match self.get_mut(id) {
            Some(item) => {
                item.qty = item.qty.increment();
                Change::Incremented
            }
            None => Change::Unchanged,
        }
    }

    /// Take one unit off an existing line, removing the line at zero.
    pub fn decrease(&mut self, id: &ProductId) -> Change {
        let Some(pos) = self.items.iter().position(|item| &item.id == id) else {
            return Change::Unchanged;
        };

        let Some(item) = self.items.get_mut(pos) else {
            return Change::Unchanged;
        };

        match item.qty.decrement() {
            Some(qty) => {
                item.qty = qty;
                Change::Decremented
            }
            None => {
                self.items.remove(pos);
                Change::Removed
            }
        }
    }

    /// Remove the line at a 0-based position. Out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Change {
        if index < self.items.len() {
            self.items.remove(index);
            Change::Removed
        } else {
            Change::Unchanged
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) -> Change {
        self.items.clear();
        Change::Cleared
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if cart.get(&item.id).is_none() {
                cart.items.push(item);
            }
        }
        cart
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
