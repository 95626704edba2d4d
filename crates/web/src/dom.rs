//! DOM-backed [`Page`].
//!
//! Regions are looked up by id on every write so pages that lack the inline
//! cart (or render the modal late) just skip those regions. Elements that
//! appear on a click path get an [`ElementRef`] so later class toggles can
//! find them again.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use basket_storefront::page::{ElementRef, Page, Region};
use basket_storefront::timers::TimerId;
use basket_storefront::{CartWidget, ClickEvent, ElementInfo, KeyValueStore};
use gloo_timers::callback::Timeout;
use url::Url;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::BrowserWidget;

const DATA_PREFIX: &str = "data-";

/// Timers that came due while the widget was borrowed by another callback.
#[derive(Debug, Clone, Default)]
pub struct MissedTimers(Rc<RefCell<Vec<TimerId>>>);

impl MissedTimers {
    fn push(&self, timer: TimerId) {
        self.0.borrow_mut().push(timer);
    }

    fn take(&self) -> Vec<TimerId> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Run timers that came due late, in the order they were due.
pub fn fire_missed<S: KeyValueStore, P: Page>(
    widget: &mut CartWidget<S, P>,
    missed: Vec<TimerId>,
) {
    for timer in missed {
        widget.fire_timer(timer);
    }
}

/// Catch up on timers missed while the widget was busy.
///
/// Call at the start of every callback that borrows the widget.
pub fn catch_up(widget: &mut BrowserWidget) {
    let missed = widget.page_mut().take_missed();
    if !missed.is_empty() {
        tracing::debug!(count = missed.len(), "Running late timers");
        fire_missed(widget, missed);
    }
}

/// The live page.
pub struct DomPage {
    document: Document,
    widget: Weak<RefCell<BrowserWidget>>,
    elements: Vec<(ElementRef, Element)>,
    next_element: u64,
    timeouts: HashMap<TimerId, Timeout>,
    fired: Vec<TimerId>,
    missed: MissedTimers,
}

impl DomPage {
    /// `widget` is the handle timers call back into once they fire.
    #[must_use]
    pub fn new(document: Document, widget: Weak<RefCell<BrowserWidget>>) -> Self {
        Self {
            document,
            widget,
            elements: Vec::new(),
            next_element: 0,
            timeouts: HashMap::new(),
            fired: Vec::new(),
            missed: MissedTimers::default(),
        }
    }

    fn region(&self, region: Region) -> Option<Element> {
        self.document.get_element_by_id(region.dom_id())
    }

    fn element(&self, element: ElementRef) -> Option<&Element> {
        self.elements
            .iter()
            .find(|(handle, _)| *handle == element)
            .map(|(_, el)| el)
    }

    fn element_ref(&mut self, el: &Element) -> ElementRef {
        if let Some((handle, _)) = self.elements.iter().find(|(_, known)| known == el) {
            return *handle;
        }
        self.next_element += 1;
        let handle = ElementRef::new(self.next_element);
        self.elements.push((handle, el.clone()));
        handle
    }

    /// Describe a DOM click as the path from its target up to the root.
    pub fn click_event(&mut self, event: &Event) -> ClickEvent {
        self.release_fired();
        // Handles are only needed while a highlight reset is pending.
        if self.timeouts.is_empty() {
            self.elements.clear();
        }

        let mut path = Vec::new();
        let mut current = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok());
        while let Some(el) = current {
            path.push(self.describe(&el));
            current = el.parent_element();
        }
        ClickEvent::new(path)
    }

    fn describe(&mut self, el: &Element) -> ElementInfo {
        let mut info = ElementInfo::new(self.element_ref(el));

        let id = el.id();
        if !id.is_empty() {
            info = info.with_id(id);
        }

        let classes = el.class_list();
        for i in 0..classes.length() {
            if let Some(class) = classes.item(i) {
                info = info.with_class(class);
            }
        }

        for name in el.get_attribute_names().iter().filter_map(|n| n.as_string()) {
            if let Some(key) = name.strip_prefix(DATA_PREFIX) {
                let value = el.get_attribute(&name).unwrap_or_default();
                info = info.with_data(key, value);
            }
        }

        info
    }

    /// Note that `timer` has run; its handle is released on the next schedule.
    fn mark_fired(&mut self, timer: TimerId) {
        self.fired.push(timer);
    }

    /// Timers that came due while the widget was busy; they count as fired.
    fn take_missed(&mut self) -> Vec<TimerId> {
        let missed = self.missed.take();
        self.fired.extend(missed.iter().copied());
        missed
    }

    fn release_fired(&mut self) {
        for timer in self.fired.drain(..) {
            self.timeouts.remove(&timer);
        }
    }
}

fn millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

impl Page for DomPage {
    fn has_region(&self, region: Region) -> bool {
        self.region(region).is_some()
    }

    fn set_html(&mut self, region: Region, html: &str) {
        if let Some(el) = self.region(region) {
            el.set_inner_html(html);
        }
    }

    fn set_text(&mut self, region: Region, text: &str) {
        if let Some(el) = self.region(region) {
            el.set_text_content(Some(text));
        }
    }

    fn add_class(&mut self, element: ElementRef, class: &str) {
        let Some(el) = self.element(element) else {
            return;
        };
        if let Err(e) = el.class_list().add_1(class) {
            tracing::warn!(?e, class, "Failed to add class");
        }
    }

    fn remove_class(&mut self, element: ElementRef, class: &str) {
        let Some(el) = self.element(element) else {
            return;
        };
        if let Err(e) = el.class_list().remove_1(class) {
            tracing::warn!(?e, class, "Failed to remove class");
        }
    }

    fn alert(&mut self, message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            tracing::warn!(?e, "Failed to show alert");
        }
    }

    fn open_external(&mut self, url: &Url) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.open_with_url_and_target(url.as_str(), "_blank") {
            tracing::error!(?e, "Failed to open checkout link");
        }
    }

    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        self.release_fired();

        let widget = self.widget.clone();
        let missed = self.missed.clone();
        let timeout = Timeout::new(millis(delay), move || {
            let Some(handle) = widget.upgrade() else {
                return;
            };
            let Ok(mut widget) = handle.try_borrow_mut() else {
                tracing::warn!(%timer, "Widget busy, deferring timer");
                missed.push(timer);
                return;
            };
            catch_up(&mut widget);
            widget.page_mut().mark_fired(timer);
            widget.fire_timer(timer);
        });
        self.timeouts.insert(timer, timeout);
    }

    fn cancel(&mut self, timer: TimerId) {
        // Dropping a Timeout clears it.
        self.timeouts.remove(&timer);
    }
}
