//! Checkout hand-off.
//!
//! Turns the cart into a plain-text order message and builds the messaging
//! deep link `<base>/<destination>?text=<percent-encoded message>`. Nothing
//! is sent from here; the widget opens the link on the page.

use std::fmt::Write as _;

use basket_core::{Cart, NumberFormat, Price};
use thiserror::Error;
use url::Url;

use crate::config::CheckoutConfig;

/// Shown to the visitor when checking out an empty cart.
pub const EMPTY_CART_NOTICE: &str = "Your cart is empty!";

const RULE: &str = "------------------------";

/// Errors building a checkout link.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The assembled link is not a valid URL.
    #[error("invalid checkout URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Builds order messages and checkout links.
#[derive(Debug, Clone)]
pub struct Checkout {
    base_url: String,
    destination: String,
    currency: String,
    format: NumberFormat,
}

impl Checkout {
    #[must_use]
    pub fn new(config: &CheckoutConfig, currency: impl Into<String>, format: NumberFormat) -> Self {
        Self {
            base_url: config.base_url.clone(),
            destination: config.destination.clone(),
            currency: currency.into(),
            format,
        }
    }

    fn money(&self, price: Price) -> String {
        format!("{}{}", self.currency, self.format.price(price))
    }

    /// Render the order summary for a cart.
    ///
    /// Returns `None` for an empty cart.
    #[must_use]
    pub fn order_message(&self, cart: &Cart) -> Option<String> {
        if cart.is_empty() {
            return None;
        }

        let mut message = String::from("🛒 *NEW ORDER*\n\n");

        // Writing to a String cannot fail.
        for item in cart.items() {
            let _ = write!(
                message,
                "• {}\n  Qty: {}\n  Price: {}\n  Subtotal: {}\n\n",
                item.name,
                item.qty,
                self.money(item.price),
                self.money(item.line_total()),
            );
        }

        let _ = write!(
            message,
            "{RULE}\n*TOTAL: {}*\n{RULE}\nCustomer wants to checkout.\n",
            self.money(cart.total()),
        );

        Some(message)
    }

    /// Build the deep link carrying the order message.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart, or
    /// `CheckoutError::InvalidUrl` if the configured base does not yield a URL.
    pub fn link(&self, cart: &Cart) -> Result<Url, CheckoutError> {
        let message = self.order_message(cart).ok_or(CheckoutError::EmptyCart)?;

        let link = format!(
            "{}/{}?text={}",
            self.base_url.trim_end_matches('/'),
            self.destination,
            urlencoding::encode(&message),
        );

        Ok(Url::parse(&link)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use basket_core::{NewItem, ProductId};

    use super::*;

    fn checkout() -> Checkout {
        Checkout::new(&CheckoutConfig::default(), "₦", NumberFormat::default())
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        for (id, name, price) in [("A", "Ankara Gown", 15_000), ("B", "Beads & Bangles", 2_500)] {
            cart.add(NewItem {
                id: ProductId::parse(id).unwrap(),
                name: name.to_string(),
                price: Price::new(price),
                img: String::new(),
            });
        }
        cart.increase(&ProductId::parse("B").unwrap());
        cart
    }

    #[test]
    fn test_empty_cart_has_no_message() {
        assert_eq!(checkout().order_message(&Cart::new()), None);
        assert!(matches!(
            checkout().link(&Cart::new()),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_order_message_layout() {
        let message = checkout().order_message(&cart()).unwrap();

        let expected = "🛒 *NEW ORDER*\n\n\
            • Ankara Gown\n  Qty: 1\n  Price: ₦15,000\n  Subtotal: ₦15,000\n\n\
            • Beads & Bangles\n  Qty: 2\n  Price: ₦2,500\n  Subtotal: ₦5,000\n\n\
            ------------------------\n\
            *TOTAL: ₦20,000*\n\
            ------------------------\n\
            Customer wants to checkout.\n";
        assert_eq!(message, expected);
    }

    #[test]
    fn test_link_shape() {
        let url = checkout().link(&cart()).unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/2348101306497");

        let query = url.query().unwrap();
        assert!(query.starts_with("text=%F0%9F%9B%92%20%2ANEW%20ORDER%2A"));
        assert!(query.contains("Beads%20%26%20Bangles"));
    }

    #[test]
    fn test_link_carries_full_message() {
        let url = checkout().link(&cart()).unwrap();
        let (key, text) = url.query_pairs().next().unwrap();

        assert_eq!(key, "text");
        assert_eq!(text, checkout().order_message(&cart()).unwrap());
    }

    #[test]
    fn test_base_with_path() {
        let config = CheckoutConfig {
            base_url: "https://api.example.com/send/".to_string(),
            destination: "15551234567".to_string(),
        };
        let url = Checkout::new(&config, "$", NumberFormat::default())
            .link(&cart())
            .unwrap();

        assert_eq!(url.path(), "/send/15551234567");
    }

    #[test]
    fn test_invalid_base_is_an_error() {
        let config = CheckoutConfig {
            base_url: "not a url".to_string(),
            destination: "15551234567".to_string(),
        };
        let result = Checkout::new(&config, "$", NumberFormat::default()).link(&cart());

        assert!(matches!(result, Err(CheckoutError::InvalidUrl(_))));
    }
}
