//! The page the widget paints into.
//!
//! [`Page`] is the DOM contract: the fixed regions the markup exposes, the
//! class toggles used for click acknowledgment, the two user-facing effects
//! (blocking alert, opening an external link), and host timers. The browser
//! implementation lives in `basket-web`. [`RecordingPage`] is a headless
//! implementation that keeps every instruction for inspection.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use url::Url;

use crate::timers::TimerId;

/// A page region the widget writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Badge showing the number of distinct items.
    Badge,
    /// Item list inside the cart modal.
    ModalItems,
    /// Grand total inside the cart modal.
    ModalTotal,
    /// Item list embedded in the page.
    InlineItems,
    /// Grand total embedded in the page.
    InlineTotal,
}

impl Region {
    pub const ALL: [Self; 5] = [
        Self::Badge,
        Self::ModalItems,
        Self::ModalTotal,
        Self::InlineItems,
        Self::InlineTotal,
    ];

    /// DOM id of the element backing this region.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Badge => "cart-count",
            Self::ModalItems => "cart-items",
            Self::ModalTotal => "cart-total",
            Self::InlineItems => "cart-inline",
            Self::InlineTotal => "cart-total-inline",
        }
    }
}

/// Host-assigned handle to a page element (e.g. the add control that was clicked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementRef(u64);

impl ElementRef {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Display surface and host services for the widget.
pub trait Page {
    /// Whether the page has an element for `region`.
    fn has_region(&self, region: Region) -> bool;

    /// Replace the markup of a region.
    fn set_html(&mut self, region: Region, html: &str);

    /// Replace the text content of a region.
    fn set_text(&mut self, region: Region, text: &str);

    fn add_class(&mut self, element: ElementRef, class: &str);

    fn remove_class(&mut self, element: ElementRef, class: &str);

    /// Show a blocking notification.
    fn alert(&mut self, message: &str);

    /// Open `url` in a new browsing context.
    fn open_external(&mut self, url: &Url);

    /// Call back `CartWidget::fire_timer(timer)` after `delay`.
    fn schedule(&mut self, timer: TimerId, delay: Duration);

    /// Release a timer previously passed to [`Page::schedule`].
    fn cancel(&mut self, timer: TimerId);
}

impl<P: Page + ?Sized> Page for &mut P {
    fn has_region(&self, region: Region) -> bool {
        (**self).has_region(region)
    }

    fn set_html(&mut self, region: Region, html: &str) {
        (**self).set_html(region, html);
    }

    fn set_text(&mut self, region: Region, text: &str) {
        (**self).set_text(region, text);
    }

    fn add_class(&mut self, element: ElementRef, class: &str) {
        (**self).add_class(element, class);
    }

    fn remove_class(&mut self, element: ElementRef, class: &str) {
        (**self).remove_class(element, class);
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message);
    }

    fn open_external(&mut self, url: &Url) {
        (**self).open_external(url);
    }

    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        (**self).schedule(timer, delay);
    }

    fn cancel(&mut self, timer: TimerId) {
        (**self).cancel(timer);
    }
}

/// One instruction received by a [`RecordingPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Html(Region, String),
    Text(Region, String),
    AddClass(ElementRef, String),
    RemoveClass(ElementRef, String),
    Alert(String),
    Open(Url),
    Schedule(TimerId, Duration),
    Cancel(TimerId),
}

/// Headless page that records everything it is told.
#[derive(Debug, Clone)]
pub struct RecordingPage {
    present: BTreeSet<Region>,
    contents: BTreeMap<Region, String>,
    classes: BTreeMap<ElementRef, BTreeSet<String>>,
    timers: BTreeMap<TimerId, Duration>,
    events: Vec<PageEvent>,
}

impl Default for RecordingPage {
    fn default() -> Self {
        Self {
            present: Region::ALL.into_iter().collect(),
            contents: BTreeMap::new(),
            classes: BTreeMap::new(),
            timers: BTreeMap::new(),
            events: Vec::new(),
        }
    }
}

impl RecordingPage {
    /// A page exposing every region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a region, as on a page without an inline cart.
    #[must_use]
    pub fn without(mut self, region: Region) -> Self {
        self.present.remove(&region);
        self
    }

    /// Current content (markup or text) of a region.
    #[must_use]
    pub fn content(&self, region: Region) -> Option<&str> {
        self.contents.get(&region).map(String::as_str)
    }

    /// Whether `element` currently carries `class`.
    #[must_use]
    pub fn has_class(&self, element: ElementRef, class: &str) -> bool {
        self.classes
            .get(&element)
            .is_some_and(|set| set.contains(class))
    }

    /// Timers scheduled and not yet cancelled, with their delays.
    #[must_use]
    pub const fn active_timers(&self) -> &BTreeMap<TimerId, Duration> {
        &self.timers
    }

    /// Every instruction in arrival order.
    #[must_use]
    pub fn events(&self) -> &[PageEvent] {
        &self.events
    }

    /// Messages passed to [`Page::alert`].
    #[must_use]
    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// URLs passed to [`Page::open_external`].
    #[must_use]
    pub fn opened(&self) -> Vec<&Url> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Open(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded events, keeping current region contents.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Page for RecordingPage {
    fn has_region(&self, region: Region) -> bool {
        self.present.contains(&region)
    }

    fn set_html(&mut self, region: Region, html: &str) {
        self.contents.insert(region, html.to_string());
        self.events.push(PageEvent::Html(region, html.to_string()));
    }

    fn set_text(&mut self, region: Region, text: &str) {
        self.contents.insert(region, text.to_string());
        self.events.push(PageEvent::Text(region, text.to_string()));
    }

    fn add_class(&mut self, element: ElementRef, class: &str) {
        self.classes
            .entry(element)
            .or_default()
            .insert(class.to_string());
        self.events
            .push(PageEvent::AddClass(element, class.to_string()));
    }

    fn remove_class(&mut self, element: ElementRef, class: &str) {
        if let Some(set) = self.classes.get_mut(&element) {
            set.remove(class);
        }
        self.events
            .push(PageEvent::RemoveClass(element, class.to_string()));
    }

    fn alert(&mut self, message: &str) {
        self.events.push(PageEvent::Alert(message.to_string()));
    }

    fn open_external(&mut self, url: &Url) {
        self.events.push(PageEvent::Open(url.clone()));
    }

    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        self.timers.insert(timer, delay);
        self.events.push(PageEvent::Schedule(timer, delay));
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
        self.events.push(PageEvent::Cancel(timer));
    }
}
