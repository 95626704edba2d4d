//! Basket CLI - drive the cart widget from a terminal.
//!
//! The cart is persisted as `<data-dir>/<storage-key>.json`, so consecutive
//! invocations see the same cart, the way page loads share `localStorage`.
//!
//! # Usage
//!
//! ```bash
//! # Add a product
//! basket add --id A --name "Ankara Gown" --price 15000 --img img/a.jpg
//!
//! # Change quantities
//! basket increase A
//! basket decrease A
//!
//! # Remove the first line, or everything
//! basket remove 0
//! basket clear
//!
//! # Print the checkout link
//! basket checkout
//!
//! # Simulate a click on a page control
//! basket click --target-class add-btn --data id=A --data name=Gown --data price=500 --data img=
//! ```
//!
//! # Environment Variables
//!
//! - `BASKET_DATA_DIR` - Directory for the persisted cart (default `.basket`)
//! - `BASKET_*` - Widget configuration, see `WidgetConfig::from_env`
//! - `RUST_LOG` - Log filter (default `basket=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use basket_core::{Price, ProductId};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "basket")]
#[command(author, version, about = "Basket cart widget CLI")]
struct Cli {
    /// Directory holding the persisted cart
    #[arg(long, global = true, env = "BASKET_DATA_DIR", default_value = ".basket")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product identifier
        #[arg(long)]
        id: ProductId,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price in whole currency units
        #[arg(long)]
        price: Price,

        /// Image URL
        #[arg(long, default_value = "")]
        img: String,
    },
    /// Increase a product's quantity by one
    Increase { id: ProductId },
    /// Decrease a product's quantity by one, removing it at zero
    Decrease { id: ProductId },
    /// Remove the line at a position (0-based)
    Remove { index: usize },
    /// Empty the cart
    Clear,
    /// Print the checkout link for the current cart
    Checkout,
    /// Dispatch a simulated click on a page control
    Click {
        /// Class of the clicked element
        #[arg(long, required_unless_present = "target_id", conflicts_with = "target_id")]
        target_class: Option<String>,

        /// DOM id of the clicked element
        #[arg(long)]
        target_id: Option<String>,

        /// Data attribute on the clicked element, as `key=value` (repeatable)
        #[arg(long = "data", value_parser = commands::click::parse_data)]
        data: Vec<(String, String)>,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("basket=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut widget = commands::open(&cli.data_dir)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Show => commands::cart::show(&widget, &mut out)?,
        Commands::Add {
            id,
            name,
            price,
            img,
        } => commands::cart::add(&mut widget, &mut out, id, name, price, img)?,
        Commands::Increase { id } => commands::cart::increase(&mut widget, &mut out, &id)?,
        Commands::Decrease { id } => commands::cart::decrease(&mut widget, &mut out, &id)?,
        Commands::Remove { index } => commands::cart::remove(&mut widget, &mut out, index)?,
        Commands::Clear => commands::cart::clear(&mut widget, &mut out)?,
        Commands::Checkout => commands::cart::checkout(&mut widget, &mut out)?,
        Commands::Click {
            target_class,
            target_id,
            data,
        } => {
            let event = commands::click::build_event(target_class, target_id, data);
            commands::click::dispatch(&mut widget, &mut out, &event)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_click_requires_a_target() {
        assert!(Cli::try_parse_from(["basket", "click", "--data", "id=A"]).is_err());
        assert!(
            Cli::try_parse_from([
                "basket",
                "click",
                "--target-class",
                "x",
                "--target-id",
                "y"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_add_validates_price() {
        assert!(
            Cli::try_parse_from(["basket", "add", "--id", "A", "--name", "x", "--price", "1.5"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from(["basket", "add", "--id", "A", "--name", "x", "--price", "1500"])
                .is_ok()
        );
    }
}
