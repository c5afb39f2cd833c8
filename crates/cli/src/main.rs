//! GoMarket CLI - Cart snapshot management tools.
//!
//! # Usage
//!
//! ```bash
//! # List the cart lines in the local snapshot
//! gm-cli cart list
//!
//! # Add one unit of a product
//! gm-cli cart add --id shirt-01 --title "Shirt" --image-url https://cdn.example.com/shirt.png --price 12.5
//!
//! # Add or remove one unit of an existing line
//! gm-cli cart increment shirt-01
//! gm-cli cart decrement shirt-01
//! ```
//!
//! The snapshot location and key namespace come from `GOMARKET_STORAGE_DIR`
//! and `GOMARKET_CART_NAMESPACE` (see the cart crate's config module).
//!
//! # Commands
//!
//! - `cart list` - Print the current cart lines
//! - `cart add` - Add one unit of a product
//! - `cart increment` - Add one unit of an existing line
//! - `cart decrement` - Remove one unit of a line

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "GoMarket CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and mutate the local cart snapshot
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the current cart lines
    List,
    /// Add one unit of a product
    Add {
        /// Product identifier
        #[arg(short, long)]
        id: String,

        /// Display name
        #[arg(short, long)]
        title: String,

        /// URL of the product's display asset
        #[arg(short = 'u', long)]
        image_url: String,

        /// Unit price (e.g. 12.5)
        #[arg(short, long)]
        price: Decimal,
    },
    /// Add one unit of an existing line
    Increment {
        /// Product identifier
        id: String,
    },
    /// Remove one unit of a line (removes the line at zero)
    Decrement {
        /// Product identifier
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list().await?,
            CartAction::Add {
                id,
                title,
                image_url,
                price,
            } => commands::cart::add(id, title, image_url, price).await?,
            CartAction::Increment { id } => commands::cart::increment(&id).await?,
            CartAction::Decrement { id } => commands::cart::decrement(&id).await?,
        },
    }
    Ok(())
}
