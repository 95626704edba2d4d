//! Document clicks through the dispatcher.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use basket_core::{Change, ProductId};
use basket_integration_tests::{
    TestContext, click_add, click_id, click_line, click_remove, product,
};
use basket_storefront::dispatch::roles;
use basket_storefront::page::PageEvent;
use basket_storefront::{
    CartWidget, ClickEvent, Dispatch, EMPTY_CART_NOTICE, ElementInfo, ElementRef, IntentError,
    RecordingPage, Region,
};

#[test]
fn test_add_click_on_descendant() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();

    let result = widget.handle_click(&click_add(5, "A", "Ankara Gown", "15000"));

    assert_eq!(result, Dispatch::Applied(Change::Added));
    let item = widget
        .cart()
        .get(&ProductId::parse("A").unwrap())
        .unwrap()
        .clone();
    assert_eq!(item.name, "Ankara Gown");
    assert_eq!(item.price.amount(), 15_000);
    assert_eq!(widget.page().content(Region::ModalTotal), Some("15,000"));
}

#[test]
fn test_add_click_flashes_and_resets() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();
    let button = ElementRef::new(5);

    widget.handle_click(&click_add(5, "A", "Gown", "100"));
    assert!(widget.page().has_class(button, "btn-success"));

    let (&timer, &delay) = widget.page().active_timers().iter().next().unwrap();
    assert_eq!(delay, Duration::from_millis(300));

    assert!(widget.fire_timer(timer));
    assert!(!widget.page().has_class(button, "btn-success"));
    assert_eq!(widget.pending_timers(), 0);
}

#[test]
fn test_highlight_settings_from_config() {
    let mut ctx = TestContext::new().unwrap();
    ctx.config.highlight.class = "flash".to_string();
    ctx.config.highlight.delay = Duration::from_millis(50);
    let mut widget = ctx.load().unwrap();

    widget.handle_click(&click_add(5, "A", "Gown", "100"));

    assert!(widget.page().has_class(ElementRef::new(5), "flash"));
    assert_eq!(
        widget.page().active_timers().values().next(),
        Some(&Duration::from_millis(50))
    );
}

#[test]
fn test_line_controls() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();
    widget.add_item(product("A", 100).unwrap());

    assert_eq!(
        widget.handle_click(&click_line(roles::INCREASE, "A")),
        Dispatch::Applied(Change::Incremented)
    );
    assert_eq!(widget.page().content(Region::ModalTotal), Some("200"));

    assert_eq!(
        widget.handle_click(&click_line(roles::DECREASE, "A")),
        Dispatch::Applied(Change::Decremented)
    );
    assert_eq!(
        widget.handle_click(&click_remove("0")),
        Dispatch::Applied(Change::Removed)
    );
    assert!(widget.cart().is_empty());
}

#[test]
fn test_increase_requires_click_on_button_itself() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();
    widget.add_item(product("A", 100).unwrap());

    let icon_inside_button = ClickEvent::new(vec![
        ElementInfo::new(ElementRef::new(2)).with_class("bi-plus"),
        ElementInfo::new(ElementRef::new(1))
            .with_class(roles::INCREASE)
            .with_data("id", "A"),
    ]);

    assert_eq!(widget.handle_click(&icon_inside_button), Dispatch::Ignored);
    assert_eq!(widget.cart().unit_count(), 1);
}

#[test]
fn test_malformed_clicks_leave_cart_alone() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();
    widget.add_item(product("A", 100).unwrap());
    let before = ctx.persisted();

    for click in [
        click_add(5, "B", "Bad", "12.50"),
        click_add(5, "B", "Bad", "-3"),
        click_add(5, "", "Bad", "10"),
        click_remove("-1"),
        click_remove("first"),
        click_line(roles::INCREASE, ""),
    ] {
        assert!(
            matches!(widget.handle_click(&click), Dispatch::Rejected(_)),
            "{click:?} should be rejected"
        );
    }

    assert_eq!(widget.cart().len(), 1);
    assert_eq!(ctx.persisted(), before);
    assert!(widget.page().active_timers().is_empty());
}

#[test]
fn test_missing_attribute_is_reported() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();

    let click = ClickEvent::on(ElementInfo::new(ElementRef::new(1)).with_class(roles::INCREASE));
    assert_eq!(
        widget.handle_click(&click),
        Dispatch::Rejected(IntentError::MissingAttribute {
            role: roles::INCREASE,
            attribute: "id",
        })
    );
}

#[test]
fn test_unrelated_click_is_ignored() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();
    widget.page_mut().clear_events();

    assert_eq!(widget.handle_click(&click_id("navbar")), Dispatch::Ignored);
    assert_eq!(widget.handle_click(&ClickEvent::default()), Dispatch::Ignored);
    assert!(widget.page().events().is_empty());
}

#[test]
fn test_clear_click() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();
    widget.add_item(product("A", 100).unwrap());

    assert_eq!(
        widget.handle_click(&click_id(roles::CLEAR_ID)),
        Dispatch::Applied(Change::Cleared)
    );
    assert!(widget.cart().is_empty());
}

#[test]
fn test_checkout_empty_cart() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();

    let result = widget.handle_click(&click_id(roles::CHECKOUT_ID));

    assert_eq!(result, Dispatch::CheckedOut(None));
    assert_eq!(widget.page().alerts(), [EMPTY_CART_NOTICE]);
    assert!(widget.page().opened().is_empty());
}

#[test]
fn test_checkout_link() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();
    widget.add_item(product("A", 500).unwrap());
    widget.add_item(product("A", 500).unwrap());

    let Dispatch::CheckedOut(Some(url)) = widget.handle_click(&click_id(roles::CHECKOUT_ID)) else {
        panic!("expected a checkout link");
    };

    assert_eq!(url.host_str(), Some("wa.me"));
    assert_eq!(url.path(), "/2348101306497");
    let (_, text) = url.query_pairs().next().unwrap();
    assert!(text.contains("• Product A\n  Qty: 2\n  Price: ₦500\n  Subtotal: ₦1,000\n"));
    assert!(text.contains("*TOTAL: ₦1,000*"));

    assert_eq!(widget.page().opened(), [&url]);
    assert!(widget.page().alerts().is_empty());
    // Checkout leaves the cart in place.
    assert_eq!(widget.cart().len(), 1);
}

#[test]
fn test_repeat_add_replaces_pending_reset() {
    let ctx = TestContext::new().unwrap();
    let mut widget = ctx.load().unwrap();

    widget.handle_click(&click_add(5, "A", "Gown", "100"));
    let first = *widget.page().active_timers().keys().next().unwrap();
    widget.handle_click(&click_add(5, "A", "Gown", "100"));

    assert_eq!(widget.pending_timers(), 1);
    assert!(!widget.page().active_timers().contains_key(&first));
    assert!(!widget.fire_timer(first));
    assert!(widget.page().has_class(ElementRef::new(5), "btn-success"));
}

#[test]
fn test_drop_cancels_pending_highlight() {
    let ctx = TestContext::new().unwrap();
    let mut page = RecordingPage::new();
    {
        let mut widget = CartWidget::new(&ctx.config, ctx.storage().unwrap(), &mut page);
        widget.handle_click(&click_add(5, "A", "Gown", "100"));
        widget.page_mut().clear_events();
    }

    assert!(page.active_timers().is_empty());
    assert!(matches!(page.events().first(), Some(PageEvent::Cancel(_))));
    assert!(!page.has_class(ElementRef::new(5), "btn-success"));
    // The add itself was persisted before the widget went away.
    assert_eq!(ctx.load().unwrap().cart().len(), 1);
}
