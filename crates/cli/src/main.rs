//! Food Store CLI - browse the menu, manage the cart, and place orders.
//!
//! # Usage
//!
//! ```bash
//! # Show the menu and the cart
//! food-store menu
//! food-store cart
//!
//! # Sign in with a token issued by the store, then fill the cart
//! food-store login --token eyJhbGciOi...
//! food-store add 66a1f0 66a1f0 66a1f3
//!
//! # Pay on delivery
//! food-store checkout cod --first-name Asha --last-name Rao \
//!     --email asha@example.com --street "12 MG Road" --city Bengaluru \
//!     --state KA --zipcode 560001 --country India --phone 9845012345
//!
//! # Several commands within one session
//! food-store shell
//! ```
//!
//! Every invocation loads the menu and, when signed in, the remote cart before
//! running its command, and waits for cart sync to finish before exiting.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use food_store_client::config::ClientConfig;
use food_store_client::error::AppError;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod console;

use commands::Command;

#[derive(Parser)]
#[command(name = "food-store")]
#[command(author, version, about = "Food store command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Map tracing levels to Sentry: ERROR/WARN become events, INFO/DEBUG become
/// breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "food_store_client=info,food_store_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            AppError::from(e).report();
            std::process::exit(2);
        }
    };

    // Sentry must be initialised before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = commands::run(config, cli.command).await {
        e.report();
        std::process::exit(1);
    }
}
