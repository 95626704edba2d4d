//! Locale-style number formatting.
//!
//! Amounts are shown with digit grouping (`1500` → `1,500`). Formatting is
//! display-only; stored values keep full precision.

use crate::types::Price;

/// Digit-grouping number formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Separator inserted between groups of three digits.
    pub group_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            group_separator: ',',
        }
    }
}

impl NumberFormat {
    /// Create a formatter with the given group separator.
    #[must_use]
    pub const fn new(group_separator: char) -> Self {
        Self { group_separator }
    }

    /// Format an integer with digit grouping.
    ///
    /// ```
    /// use basket_core::NumberFormat;
    ///
    /// let fmt = NumberFormat::default();
    /// assert_eq!(fmt.number(0), "0");
    /// assert_eq!(fmt.number(1_234_567), "1,234,567");
    /// ```
    #[must_use]
    pub fn number(&self, n: u64) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(ch);
        }

        out
    }

    /// Format a price amount with digit grouping (no currency symbol).
    #[must_use]
    pub fn price(&self, price: Price) -> String {
        self.number(price.amount())
    }
}
