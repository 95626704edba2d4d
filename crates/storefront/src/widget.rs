//! The cart widget: composition root for store, renderer, dispatcher and checkout.
//!
//! Every mutation follows the same path: update the cart, persist it, then
//! repaint the page. Failures never reach the visitor. Persist and render
//! errors are logged and the widget keeps working from its in-memory cart.

use basket_core::{Cart, Change, NewItem, ProductId};
use tracing::instrument;
use url::Url;

use crate::checkout::{Checkout, CheckoutError, EMPTY_CART_NOTICE};
use crate::config::{HighlightConfig, WidgetConfig};
use crate::dispatch::{ClickEvent, Intent, IntentError};
use crate::page::{ElementRef, Page};
use crate::render::Renderer;
use crate::storage::KeyValueStore;
use crate::store::CartStore;
use crate::timers::{Task, TimerId, Timers};

/// What a click ended up doing.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The click hit no cart control.
    Ignored,
    /// A cart control was clicked but its data was malformed.
    Rejected(IntentError),
    /// A mutation ran (possibly as a no-op).
    Applied(Change),
    /// Checkout ran; `None` if the cart was empty.
    CheckedOut(Option<Url>),
}

/// Shopping cart widget bound to a storage backend and a page.
pub struct CartWidget<S: KeyValueStore, P: Page> {
    store: CartStore<S>,
    cart: Cart,
    page: P,
    renderer: Renderer,
    checkout: Checkout,
    highlight: HighlightConfig,
    timers: Timers,
}

impl<S: KeyValueStore, P: Page> CartWidget<S, P> {
    /// Load the persisted cart and paint the page once.
    pub fn new(config: &WidgetConfig, storage: S, page: P) -> Self {
        let store = CartStore::new(storage, config.storage_key.clone());
        let cart = store.load();

        let mut widget = Self {
            store,
            cart,
            page,
            renderer: Renderer::from_config(config),
            checkout: Checkout::new(
                &config.checkout,
                config.currency_symbol.clone(),
                config.number_format,
            ),
            highlight: config.highlight.clone(),
            timers: Timers::new(),
        };
        widget.refresh();
        widget
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    pub const fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Number of scheduled tasks that have not fired yet.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product (appending it if new).
    pub fn add_item(&mut self, item: NewItem) -> Change {
        let id = item.id.clone();
        let change = self.cart.add(item);
        self.commit(change, &id);
        change
    }

    pub fn increase(&mut self, id: &ProductId) -> Change {
        let change = self.cart.increase(id);
        self.commit(change, id);
        change
    }

    pub fn decrease(&mut self, id: &ProductId) -> Change {
        let change = self.cart.decrease(id);
        self.commit(change, id);
        change
    }

    pub fn remove_at(&mut self, index: usize) -> Change {
        let change = self.cart.remove_at(index);
        if change.is_change() {
            tracing::debug!(index, ?change, "Removed cart line");
            self.persist_and_refresh();
        }
        change
    }

    pub fn clear(&mut self) -> Change {
        let change = self.cart.clear();
        tracing::debug!(?change, "Cleared cart");
        self.persist_and_refresh();
        change
    }

    fn commit(&mut self, change: Change, id: &ProductId) {
        if change.is_change() {
            tracing::debug!(product_id = %id, ?change, "Cart updated");
            self.persist_and_refresh();
        }
    }

    fn persist_and_refresh(&mut self) {
        if let Err(e) = self.store.persist(&self.cart) {
            tracing::error!(key = %self.store.key(), error = %e, "Failed to persist cart");
        }
        self.refresh();
    }

    /// Repaint the page from the current cart without mutating it.
    pub fn refresh(&mut self) {
        match self.renderer.render(&self.cart) {
            Ok(frame) => frame.paint(&mut self.page),
            Err(e) => tracing::error!(error = %e, "Failed to render cart"),
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Hand the order off to the messaging link.
    ///
    /// An empty cart shows a single alert and opens nothing.
    #[instrument(skip(self), fields(items = self.cart.len()))]
    pub fn checkout(&mut self) -> Option<Url> {
        match self.checkout.link(&self.cart) {
            Ok(url) => {
                tracing::info!("Opening checkout link");
                self.page.open_external(&url);
                Some(url)
            }
            Err(CheckoutError::EmptyCart) => {
                tracing::info!("Checkout with empty cart");
                self.page.alert(EMPTY_CART_NOTICE);
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build checkout link");
                None
            }
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Inspect a document click and run the matching cart operation.
    #[instrument(skip(self))]
    pub fn handle_click(&mut self, event: &ClickEvent) -> Dispatch {
        match Intent::from_click(event) {
            Ok(None) => Dispatch::Ignored,
            Ok(Some(intent)) => self.apply(intent),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed cart control");
                Dispatch::Rejected(e)
            }
        }
    }

    /// Run an already-parsed intent.
    pub fn apply(&mut self, intent: Intent) -> Dispatch {
        match intent {
            Intent::Increase(id) => Dispatch::Applied(self.increase(&id)),
            Intent::Decrease(id) => Dispatch::Applied(self.decrease(&id)),
            Intent::Add { item, control } => {
                let change = self.add_item(item);
                self.acknowledge(control);
                Dispatch::Applied(change)
            }
            Intent::Remove(index) => Dispatch::Applied(self.remove_at(index)),
            Intent::Clear => Dispatch::Applied(self.clear()),
            Intent::Checkout => Dispatch::CheckedOut(self.checkout()),
        }
    }

    /// Flash the highlight class on an add control.
    ///
    /// A second click before the reset fires replaces the pending reset.
    fn acknowledge(&mut self, control: ElementRef) {
        if let Some(previous) = self.timers.highlight_for(control) {
            self.timers.cancel(previous);
            self.page.cancel(previous);
        }

        self.page.add_class(control, &self.highlight.class);
        let timer = self.timers.schedule(Task::ClearHighlight {
            element: control,
            class: self.highlight.class.clone(),
        });
        self.page.schedule(timer, self.highlight.delay);
    }

    /// Run the task behind a timer the page scheduled.
    ///
    /// Returns `false` if the timer was cancelled or already fired.
    pub fn fire_timer(&mut self, timer: TimerId) -> bool {
        match self.timers.fire(timer) {
            Some(Task::ClearHighlight { element, class }) => {
                self.page.remove_class(element, &class);
                true
            }
            None => false,
        }
    }
}

impl<S: KeyValueStore, P: Page> Drop for CartWidget<S, P> {
    fn drop(&mut self) {
        for (timer, task) in self.timers.drain() {
            self.page.cancel(timer);
            match task {
                Task::ClearHighlight { element, class } => self.page.remove_class(element, &class),
            }
        }
    }
}
