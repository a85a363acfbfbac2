//! # Billing Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the store adapter
//! - Create the registration and charging services
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billing_hex::{CustomerRegistry, PaymentProcessor, inbound::HttpServer};
use billing_repo::build_repo;
use billing_types::{RandomCustomerIds, UkPhoneNumberValidator};
use stripe_charger::StripeCharger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,billing_app=debug,billing_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting billing server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build store (handles connection and migration)
    let repo = Arc::new(build_repo(&config.database_url).await?);

    // Create the application services over the shared store
    let registry = CustomerRegistry::new(repo.clone(), UkPhoneNumberValidator, RandomCustomerIds);
    let processor = PaymentProcessor::new(
        repo.clone(),
        repo,
        StripeCharger::new(config.stripe_secret_key),
    )
    .with_accepted_currencies(config.accepted_currencies);

    // Create and run the HTTP server
    let server = HttpServer::new(registry, processor);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
