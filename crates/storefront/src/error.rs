//! Unified error type for hosts embedding the widget.
//!
//! The widget itself never propagates failures to the visitor; it logs and
//! carries on. Hosts (the CLI, the browser binding) use `WidgetError` for
//! their own setup paths: loading configuration, opening storage, and
//! reporting a checkout that could not be built.

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::dispatch::IntentError;
use crate::render::RenderError;
use crate::storage::StorageError;
use crate::store::StoreError;

/// Application-level error type for the widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart could not be persisted.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Cart markup could not be rendered.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Checkout link could not be built.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A click carried malformed data.
    #[error("Bad click: {0}")]
    Intent(#[from] IntentError),
}

/// Result type alias for `WidgetError`.
pub type Result<T> = std::result::Result<T, WidgetError>;
