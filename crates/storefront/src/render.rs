//! Cart rendering.
//!
//! Projects a [`Cart`] into a [`CartFrame`]: the item markup shared by the
//! modal and inline lists, the formatted grand total, and the badge count.
//! Untrusted strings are escaped by askama's HTML escaper at every
//! interpolation. Rendering never touches the cart.

use askama::Template;
use basket_core::{Cart, LineItem, NumberFormat};
use thiserror::Error;

use crate::config::WidgetConfig;
use crate::page::{Page, Region};

/// Markup shown in both lists when the cart has no items.
pub const EMPTY_CART_HTML: &str = r#"<p class="text-muted">Your cart is empty.</p>"#;

/// Errors producing cart markup.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Line item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub img: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Current position in the cart, used by the remove control.
    pub index: usize,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub currency: String,
    pub total: String,
    pub item_count: usize,
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
struct CartItemsTemplate<'a> {
    cart: &'a CartView,
}

/// Display instructions for one paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartFrame {
    /// Markup for the modal and inline item lists.
    pub items_html: String,
    /// Formatted grand total.
    pub total: String,
    /// Number of distinct line items.
    pub badge: usize,
    pub is_empty: bool,
}

impl CartFrame {
    /// Write the frame into whichever regions the page has.
    ///
    /// Both item lists receive the same markup and both totals the same text.
    pub fn paint<P: Page + ?Sized>(&self, page: &mut P) {
        for (list, total) in [
            (Region::ModalItems, Region::ModalTotal),
            (Region::InlineItems, Region::InlineTotal),
        ] {
            if page.has_region(list) {
                page.set_html(list, &self.items_html);
            }
            if page.has_region(total) {
                page.set_text(total, &self.total);
            }
        }

        if page.has_region(Region::Badge) {
            page.set_text(Region::Badge, &self.badge.to_string());
        }
    }
}

/// Turns a cart into display instructions.
#[derive(Debug, Clone)]
pub struct Renderer {
    currency: String,
    format: NumberFormat,
}

impl Renderer {
    #[must_use]
    pub fn new(currency: impl Into<String>, format: NumberFormat) -> Self {
        Self {
            currency: currency.into(),
            format,
        }
    }

    #[must_use]
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.currency_symbol.clone(), config.number_format)
    }

    /// Build the template view of a cart, computing line subtotals and the total.
    #[must_use]
    pub fn view(&self, cart: &Cart) -> CartView {
        let items = cart
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| self.item_view(index, item))
            .collect();

        CartView {
            items,
            currency: self.currency.clone(),
            total: self.format.price(cart.total()),
            item_count: cart.len(),
        }
    }

    fn item_view(&self, index: usize, item: &LineItem) -> CartItemView {
        CartItemView {
            id: item.id.to_string(),
            name: item.name.clone(),
            img: item.img.clone(),
            quantity: item.qty.get(),
            price: self.format.price(item.price),
            line_price: self.format.price(item.line_total()),
            index,
        }
    }

    /// Render a cart into a frame.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the item template fails to render.
    pub fn render(&self, cart: &Cart) -> Result<CartFrame, RenderError> {
        let view = self.view(cart);

        let items_html = if cart.is_empty() {
            EMPTY_CART_HTML.to_string()
        } else {
            CartItemsTemplate { cart: &view }.render()?
        };

        Ok(CartFrame {
            items_html,
            total: view.total,
            badge: view.item_count,
            is_empty: cart.is_empty(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use basket_core::{NewItem, Price, ProductId};

    use super::*;
    use crate::page::RecordingPage;

    fn renderer() -> Renderer {
        Renderer::new("₦", NumberFormat::default())
    }

    fn add(cart: &mut Cart, id: &str, name: &str, price: u64) {
        cart.add(NewItem {
            id: ProductId::parse(id).unwrap(),
            name: name.to_string(),
            price: Price::new(price),
            img: format!("img/{id}.jpg"),
        });
    }

    #[test]
    fn test_empty_cart() {
        let frame = renderer().render(&Cart::new()).unwrap();

        assert!(frame.is_empty);
        assert_eq!(frame.items_html, EMPTY_CART_HTML);
        assert_eq!(frame.total, "0");
        assert_eq!(frame.badge, 0);
    }

    #[test]
    fn test_items_and_totals() {
        let mut cart = Cart::new();
        add(&mut cart, "A", "Ankara", 1500);
        add(&mut cart, "A", "Ankara", 1500);
        add(&mut cart, "B", "Beads", 250);

        let frame = renderer().render(&cart).unwrap();

        assert_eq!(frame.total, "3,250");
        assert_eq!(frame.badge, 2);
        assert!(frame.items_html.contains("₦ 1,500 each"));
        assert!(frame.items_html.contains("Subtotal: ₦ 3,000"));
        assert!(frame.items_html.contains("Subtotal: ₦ 250"));
        assert!(frame.items_html.contains(r#"data-index="0""#));
        assert!(frame.items_html.contains(r#"data-index="1""#));
        assert!(frame.items_html.contains(r#"<span class="mx-2">2</span>"#));
        assert!(frame.items_html.contains(r#"increase-btn" data-id="A""#));
        assert!(frame.items_html.contains(r#"decrease-btn" data-id="B""#));
    }

    #[test]
    fn test_untrusted_strings_are_escaped() {
        let mut cart = Cart::new();
        cart.add(NewItem {
            id: ProductId::parse("x\"><script>").unwrap(),
            name: "<script>alert('x')</script>".to_string(),
            price: Price::new(1),
            img: "\" onerror=\"steal()".to_string(),
        });

        let html = renderer().render(&cart).unwrap().items_html;

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("\" onerror=\""));
        assert!(!html.contains("data-id=\"x\">"));
    }

    #[test]
    fn test_view_matches_cart_order() {
        let mut cart = Cart::new();
        add(&mut cart, "B", "Beads", 10);
        add(&mut cart, "A", "Ankara", 20);

        let view = renderer().view(&cart);
        let ids: Vec<_> = view.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
        assert_eq!(view.items[1].index, 1);
    }

    #[test]
    fn test_paint_fills_both_lists() {
        let mut cart = Cart::new();
        add(&mut cart, "A", "Ankara", 500);
        let frame = renderer().render(&cart).unwrap();

        let mut page = RecordingPage::new();
        frame.paint(&mut page);

        assert_eq!(page.content(Region::ModalItems), Some(frame.items_html.as_str()));
        assert_eq!(page.content(Region::InlineItems), Some(frame.items_html.as_str()));
        assert_eq!(page.content(Region::ModalTotal), Some("500"));
        assert_eq!(page.content(Region::InlineTotal), Some("500"));
        assert_eq!(page.content(Region::Badge), Some("1"));
    }

    #[test]
    fn test_paint_skips_missing_regions() {
        let frame = renderer().render(&Cart::new()).unwrap();

        let mut page = RecordingPage::new()
            .without(Region::InlineItems)
            .without(Region::InlineTotal);
        frame.paint(&mut page);

        assert_eq!(page.content(Region::ModalItems), Some(EMPTY_CART_HTML));
        assert_eq!(page.content(Region::InlineItems), None);
        assert_eq!(page.content(Region::InlineTotal), None);
        assert_eq!(page.content(Region::Badge), Some("0"));
    }
}
