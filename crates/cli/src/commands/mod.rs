//! Command implementations.
//!
//! Each command runs one widget operation against a [`FileStore`] and a
//! [`RecordingPage`], then prints what the page was told.

pub mod cart;
pub mod click;

use std::io::{self, Write};
use std::path::Path;

use basket_storefront::{
    CartWidget, FileStore, RecordingPage, Region, WidgetConfig, WidgetError,
};
use thiserror::Error;

/// Widget as driven from the command line.
pub type Widget = CartWidget<FileStore, RecordingPage>;

/// Errors that can occur running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Widget setup or operation failed.
    #[error(transparent)]
    Widget(#[from] WidgetError),

    /// Writing to stdout failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

/// Load configuration and open the cart persisted under `data_dir`.
///
/// # Errors
///
/// Returns `CliError::Widget` if the configuration is invalid or the
/// directory cannot be created.
pub fn open(data_dir: &Path) -> Result<Widget, CliError> {
    let config = WidgetConfig::from_env().map_err(WidgetError::from)?;
    let storage = FileStore::open(data_dir).map_err(WidgetError::from)?;

    tracing::debug!(dir = %storage.dir().display(), key = %config.storage_key, "Opening cart");
    Ok(CartWidget::new(&config, storage, RecordingPage::new()))
}

/// Print the badge, total, and item markup last painted on the page.
///
/// # Errors
///
/// Returns `CliError::Io` if stdout cannot be written.
pub fn print_frame(widget: &Widget, out: &mut impl Write) -> Result<(), CliError> {
    let page = widget.page();
    let badge = page.content(Region::Badge).unwrap_or("0");
    let total = page.content(Region::ModalTotal).unwrap_or("0");
    let items = page.content(Region::ModalItems).unwrap_or_default();

    writeln!(out, "Items: {badge}")?;
    writeln!(out, "Total: {total}")?;
    writeln!(out, "{items}")?;
    Ok(())
}

/// Print alerts the widget raised during this command.
fn print_alerts(widget: &Widget, out: &mut impl Write) -> Result<(), CliError> {
    for message in widget.page().alerts() {
        writeln!(out, "{message}")?;
    }
    Ok(())
}
