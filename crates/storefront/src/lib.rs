//! Basket storefront library.
//!
//! Everything between the cart model and the page: configuration, storage
//! backends, the persisted cart store, markup rendering, click dispatch,
//! checkout hand-off, and the [`CartWidget`] that wires them together.
//! Hosts provide a [`KeyValueStore`] and a [`Page`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod page;
pub mod render;
pub mod storage;
pub mod store;
pub mod timers;
pub mod widget;

pub use checkout::{Checkout, CheckoutError, EMPTY_CART_NOTICE};
pub use config::WidgetConfig;
pub use dispatch::{ClickEvent, ElementInfo, Intent, IntentError};
pub use error::{Result, WidgetError};
pub use page::{ElementRef, Page, RecordingPage, Region};
pub use render::{CartFrame, Renderer};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::CartStore;
pub use timers::TimerId;
pub use widget::{CartWidget, Dispatch};
