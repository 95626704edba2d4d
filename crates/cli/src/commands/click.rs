//! Simulated page clicks, routed through the widget's dispatcher.

use std::io::Write;

use basket_storefront::{ClickEvent, Dispatch, ElementInfo, ElementRef, WidgetError};

use super::{CliError, Widget, print_alerts, print_frame};

/// Handle assigned to the simulated target element.
const TARGET: ElementRef = ElementRef::new(1);

/// Parse a `key=value` data attribute argument.
///
/// # Errors
///
/// Returns a message if there is no `=` or the key is empty.
pub fn parse_data(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {arg:?}")),
    }
}

/// Describe a click on a single element.
#[must_use]
pub fn build_event(
    class: Option<String>,
    id: Option<String>,
    data: Vec<(String, String)>,
) -> ClickEvent {
    let mut target = ElementInfo::new(TARGET);
    if let Some(class) = class {
        target = target.with_class(class);
    }
    if let Some(id) = id {
        target = target.with_id(id);
    }
    for (key, value) in data {
        target = target.with_data(key, value);
    }
    ClickEvent::on(target)
}

/// Dispatch `event` and print the outcome.
///
/// # Errors
///
/// Returns `CliError::Widget` if the clicked control carried malformed data.
pub fn dispatch(widget: &mut Widget, out: &mut impl Write, event: &ClickEvent) -> Result<(), CliError> {
    match widget.handle_click(event) {
        Dispatch::Ignored => {
            writeln!(out, "Click ignored: not a cart control")?;
            Ok(())
        }
        Dispatch::Rejected(e) => Err(WidgetError::from(e).into()),
        Dispatch::Applied(_) => print_frame(widget, out),
        Dispatch::CheckedOut(Some(url)) => {
            writeln!(out, "{url}")?;
            Ok(())
        }
        Dispatch::CheckedOut(None) => print_alerts(widget, out),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::open;

    fn data(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_data() {
        assert_eq!(
            parse_data("price=1500").unwrap(),
            ("price".to_string(), "1500".to_string())
        );
        assert_eq!(
            parse_data("name=a=b").unwrap(),
            ("name".to_string(), "a=b".to_string())
        );
        assert!(parse_data("price").is_err());
        assert!(parse_data("=1").is_err());
    }

    #[test]
    fn test_add_click_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut widget = open(dir.path()).unwrap();

        let add = build_event(
            Some("add-btn".to_string()),
            None,
            data(&[("id", "A"), ("name", "Gown"), ("price", "500"), ("img", "")]),
        );
        let mut out = Vec::new();
        dispatch(&mut widget, &mut out, &add).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Items: 1\nTotal: 500\n"));

        let clear = build_event(None, Some("clear-cart".to_string()), Vec::new());
        let mut out = Vec::new();
        dispatch(&mut widget, &mut out, &clear).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Items: 0\n"));
    }

    #[test]
    fn test_malformed_click_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut widget = open(dir.path()).unwrap();

        let event = build_event(
            Some("remove-item".to_string()),
            None,
            data(&[("index", "-1")]),
        );
        let result = dispatch(&mut widget, &mut Vec::new(), &event);

        assert!(matches!(result, Err(CliError::Widget(WidgetError::Intent(_)))));
    }

    #[test]
    fn test_unrelated_click_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut widget = open(dir.path()).unwrap();

        let event = build_event(Some("nav-link".to_string()), None, Vec::new());
        let mut out = Vec::new();
        dispatch(&mut widget, &mut out, &event).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Click ignored: not a cart control\n");
    }
}
