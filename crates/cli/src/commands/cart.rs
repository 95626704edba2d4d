//! Direct cart commands.

use std::io::Write;

use basket_core::{Change, NewItem, Price, ProductId};

use super::{CliError, Widget, print_alerts, print_frame};

pub fn show(widget: &Widget, out: &mut impl Write) -> Result<(), CliError> {
    print_frame(widget, out)
}

pub fn add(
    widget: &mut Widget,
    out: &mut impl Write,
    id: ProductId,
    name: String,
    price: Price,
    img: String,
) -> Result<(), CliError> {
    widget.add_item(NewItem {
        id,
        name,
        price,
        img,
    });
    print_frame(widget, out)
}

pub fn increase(widget: &mut Widget, out: &mut impl Write, id: &ProductId) -> Result<(), CliError> {
    report(widget.increase(id), &format!("no product {id} in cart"));
    print_frame(widget, out)
}

pub fn decrease(widget: &mut Widget, out: &mut impl Write, id: &ProductId) -> Result<(), CliError> {
    report(widget.decrease(id), &format!("no product {id} in cart"));
    print_frame(widget, out)
}

pub fn remove(widget: &mut Widget, out: &mut impl Write, index: usize) -> Result<(), CliError> {
    report(widget.remove_at(index), &format!("no line at index {index}"));
    print_frame(widget, out)
}

pub fn clear(widget: &mut Widget, out: &mut impl Write) -> Result<(), CliError> {
    widget.clear();
    print_frame(widget, out)
}

/// Print the checkout link, or the empty-cart notice.
pub fn checkout(widget: &mut Widget, out: &mut impl Write) -> Result<(), CliError> {
    match widget.checkout() {
        Some(url) => writeln!(out, "{url}")?,
        None => print_alerts(widget, out)?,
    }
    Ok(())
}

fn report(change: Change, reason: &str) {
    if !change.is_change() {
        tracing::info!("Cart unchanged: {reason}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::open;

    fn run(dir: &std::path::Path, f: impl FnOnce(&mut Widget, &mut Vec<u8>)) -> String {
        let mut widget = open(dir).unwrap();
        let mut out = Vec::new();
        f(&mut widget, &mut out);
        String::from_utf8(out).unwrap()
    }

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    #[test]
    fn test_add_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();

        run(dir.path(), |w, out| {
            add(w, out, id("A"), "Gown".to_string(), Price::new(1500), String::new()).unwrap();
        });
        let output = run(dir.path(), |w, out| {
            increase(w, out, &id("A")).unwrap();
        });

        assert!(output.starts_with("Items: 1\nTotal: 3,000\n"));
        assert!(output.contains("data-id=\"A\""));
    }

    #[test]
    fn test_show_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(dir.path(), |w, out| show(w, out).unwrap());

        assert_eq!(
            output,
            "Items: 0\nTotal: 0\n<p class=\"text-muted\">Your cart is empty.</p>\n"
        );
    }

    #[test]
    fn test_checkout_empty_prints_notice() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(dir.path(), |w, out| checkout(w, out).unwrap());
        assert_eq!(output, "Your cart is empty!\n");
    }

    #[test]
    fn test_checkout_prints_link() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(dir.path(), |w, out| {
            add(w, &mut Vec::new(), id("A"), "Gown".to_string(), Price::new(500), String::new())
                .unwrap();
            checkout(w, out).unwrap();
        });

        assert!(output.starts_with("https://wa.me/2348101306497?text="));
    }

    #[test]
    fn test_remove_out_of_range_keeps_cart() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(dir.path(), |w, out| {
            add(w, &mut Vec::new(), id("A"), "Gown".to_string(), Price::new(500), String::new())
                .unwrap();
            remove(w, out, 3).unwrap();
        });

        assert!(output.starts_with("Items: 1\nTotal: 500\n"));
    }
}
