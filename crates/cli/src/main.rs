//! Shopcart CLI - drive the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! shopcart show
//!
//! # Add one unit of product 1
//! shopcart add 1
//!
//! # Set product 1 to 3 units
//! shopcart set 1 3
//!
//! # Remove product 1
//! shopcart remove 1
//! ```
//!
//! Configuration comes from the environment (see `shopcart::config`):
//! `CART_API_BASE_URL` (required), `CART_STORAGE_DIR`, `CART_STORAGE_KEY`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopcart::config::CartConfig;
use shopcart::store::{CartStore, UpdateAmount};
use shopcart_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "shopcart")]
#[command(author, version, about = "Shopcart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product ID
        product_id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: i32,
    },
    /// Set a product to an exact quantity
    Set {
        /// Product ID
        product_id: i32,
        /// New quantity
        amount: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopcart=info,shopcart_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match CartConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let store = CartStore::from_config(&config);
    let cli = Cli::parse();

    match cli.command {
        Commands::Show => {}
        Commands::Add { product_id } => {
            store.add_product(ProductId::new(product_id)).await;
        }
        Commands::Remove { product_id } => {
            store.remove_product(ProductId::new(product_id));
        }
        Commands::Set { product_id, amount } => {
            store
                .update_product_amount(UpdateAmount {
                    product_id: ProductId::new(product_id),
                    amount,
                })
                .await;
        }
    }

    commands::show(&store);
}
