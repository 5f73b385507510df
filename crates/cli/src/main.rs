//! Monsoon Market CLI - storefront front end.
//!
//! # Usage
//!
//! ```bash
//! # Create an account, then log in
//! monsoon register -e jane@example.com --password 'Secret#123' \
//!     --first-name Jane --last-name Doe
//! monsoon login -e jane@example.com --password 'Secret#123'
//!
//! # Browse with converted prices, fill in the shipping profile
//! monsoon products
//! monsoon profile update --country "United Kingdom" --city London ...
//!
//! # Order two pairs of sneakers and a t-shirt
//! monsoon checkout --line 1=2 --line 4=1
//!
//! # Review past orders
//! monsoon orders
//! ```
//!
//! The session token and cached exchange rates persist in the platform data
//! directory between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Shopper-facing command output goes to stdout by design.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use monsoon_storefront::{Storefront, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "monsoon")]
#[command(author, version, about = "Monsoon Market storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Password (8+ chars with upper, lower, digit, special)
        #[arg(long)]
        password: String,

        /// Password confirmation; defaults to the password itself
        #[arg(long)]
        confirm_password: Option<String>,

        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,
    },
    /// Log in and persist the session token
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Log out and clear the persisted token
    Logout,
    /// Show or update the shipping profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// List catalog products with converted prices
    Products,
    /// Show order history
    Orders,
    /// Submit an order for the given cart lines
    Checkout {
        /// Cart lines as `product_id=quantity` pairs (repeatable)
        #[arg(long = "line", value_name = "ID=QTY", required = true)]
        lines: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the current profile
    Show,
    /// Update profile fields (only the set flags change)
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        date_of_birth: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        contact_number: Option<String>,
        #[arg(long)]
        pincode: Option<String>,
        #[arg(long)]
        address_line1: Option<String>,
        #[arg(long)]
        address_line2: Option<String>,
        #[arg(long)]
        landmark: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
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
    let config = StorefrontConfig::from_env()?;
    let storefront = Storefront::new(config)?;

    match cli.command {
        Commands::Register {
            email,
            password,
            confirm_password,
            first_name,
            last_name,
        } => {
            commands::account::register(
                &storefront,
                email,
                password,
                confirm_password,
                first_name,
                last_name,
            )
            .await?;
        }
        Commands::Login { email, password } => {
            commands::account::login(&storefront, &email, &password).await?;
        }
        Commands::Logout => commands::account::logout(&storefront),
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::account::profile_show(&storefront).await?,
            ProfileAction::Update {
                first_name,
                last_name,
                date_of_birth,
                country,
                contact_number,
                pincode,
                address_line1,
                address_line2,
                landmark,
                city,
                state,
            } => {
                let update = monsoon_storefront::ProfileUpdate {
                    first_name,
                    last_name,
                    date_of_birth,
                    country,
                    contact_number,
                    pincode,
                    address_line1,
                    address_line2,
                    landmark,
                    city,
                    state,
                };
                commands::account::profile_update(&storefront, update).await?;
            }
        },
        Commands::Products => commands::shop::products(&storefront).await?,
        Commands::Orders => commands::shop::orders(&storefront).await?,
        Commands::Checkout { lines } => commands::checkout::checkout(&storefront, &lines).await?,
    }
    Ok(())
}
