//! CLI commands.

mod cart;
mod checkout;
mod render;
mod session;
mod shell;

use std::sync::Arc;

use clap::{Args, Subcommand, ValueEnum};
use food_store_client::config::ClientConfig;
use food_store_client::error::{AppError, Result};
use food_store_client::state::AppState;
use food_store_core::{AddressField, PaymentMethod};

use crate::console::{ConsoleNavigator, ConsoleNotifier};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the menu
    Menu,
    /// Show the cart with totals
    Cart,
    /// Add one unit of each item (repeat an ID to add more)
    Add {
        /// Item IDs from the menu
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Remove one unit of each item
    Remove {
        /// Item IDs from the cart
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Empty the cart
    Clear,
    /// Sign in with a session token issued by the store
    Login {
        /// Session token
        #[arg(short, long)]
        token: String,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Place an order for everything in the cart
    Checkout {
        /// How to pay
        #[arg(value_enum)]
        method: CheckoutMethod,

        #[command(flatten)]
        address: AddressArgs,
    },
    /// Run several commands within one session
    Shell,
}

/// Payment choice at checkout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMethod {
    /// Pay online through the hosted payment page
    Online,
    /// Cash on delivery
    Cod,
}

impl From<CheckoutMethod> for PaymentMethod {
    fn from(method: CheckoutMethod) -> Self {
        match method {
            CheckoutMethod::Online => Self::Stripe,
            CheckoutMethod::Cod => Self::Cod,
        }
    }
}

/// Delivery address flags. Unset flags leave the field empty.
#[derive(Args, Debug, Default, Clone)]
pub struct AddressArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    street: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    zipcode: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

impl AddressArgs {
    /// Fields that were given, in form order.
    fn into_fields(self) -> Vec<(AddressField, String)> {
        let values = [
            self.first_name,
            self.last_name,
            self.email,
            self.street,
            self.city,
            self.state,
            self.zipcode,
            self.country,
            self.phone,
        ];
        AddressField::ALL
            .into_iter()
            .zip(values)
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect()
    }
}

/// Run one command in a fresh session.
///
/// The session is initialised first and background cart sync is awaited
/// before returning, whether or not the command succeeded.
pub async fn run(config: ClientConfig, command: Command) -> Result<()> {
    let mut state = AppState::http(
        config,
        Arc::new(ConsoleNotifier::default()),
        Arc::new(ConsoleNavigator::default()),
    );
    state.start().await;

    let result = match command {
        Command::Shell => shell::run(&mut state).await,
        command => execute(&mut state, command).await,
    };

    state.settle().await;
    result
}

/// Run one command against an initialised session.
async fn execute(state: &mut AppState, command: Command) -> Result<()> {
    match command {
        Command::Menu => {
            render::menu(&state.catalog_view());
            Ok(())
        }
        Command::Cart => {
            render::cart(&state.cart_view());
            Ok(())
        }
        Command::Add { ids } => cart::add(state, &ids),
        Command::Remove { ids } => cart::remove(state, &ids),
        Command::Clear => {
            cart::clear(state);
            Ok(())
        }
        Command::Login { token } => session::login(state, &token).await,
        Command::Logout => session::logout(state),
        Command::Checkout { method, address } => {
            checkout::place_order(state, method, address).await
        }
        Command::Shell => Err(AppError::BadRequest("already in a shell".to_string())),
    }
}
