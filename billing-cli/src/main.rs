//! Billing CLI
//!
//! Command-line interface for the Billing API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use billing_client::BillingClient;
use billing_types::{Currency, CustomerId, PaymentId};

#[derive(Parser)]
#[command(name = "billing")]
#[command(author, version, about = "Billing API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Billing API
    #[arg(long, env = "BILLING_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer operations
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Register a new customer
    Register {
        /// Customer name
        name: String,
        /// Phone number in international format (e.g. +447000000000)
        #[arg(long)]
        phone: String,
    },
    /// Get customer details
    Get {
        /// Customer ID (UUID)
        id: String,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Charge a customer's card
    Charge {
        /// Customer ID (UUID)
        #[arg(long)]
        customer: String,
        /// Amount in major units (e.g. 100.00)
        #[arg(long)]
        amount: String,
        /// Currency (USD, GBP)
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Funding-instrument token
        #[arg(long)]
        source: String,
        /// Payment description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Get payment details
    Get {
        /// Payment ID
        id: String,
    },
}

fn parse_currency(s: &str) -> Result<Currency> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown currency: {}. Supported: USD, EUR, GBP", s))
}

fn parse_customer_id(s: &str) -> Result<CustomerId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid customer ID: {}", s))
}

fn parse_amount(s: &str) -> Result<Decimal> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = BillingClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Customer { action } => match action {
            CustomerCommands::Register { name, phone } => {
                let customer = client.register_customer(&name, &phone).await?;
                println!("{}", serde_json::to_string_pretty(&customer)?);
            }
            CustomerCommands::Get { id } => {
                let customer_id = parse_customer_id(&id)?;
                let customer = client.get_customer(customer_id).await?;
                println!("{}", serde_json::to_string_pretty(&customer)?);
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Charge {
                customer,
                amount,
                currency,
                source,
                description,
            } => {
                let customer_id = parse_customer_id(&customer)?;
                let amount = parse_amount(&amount)?;
                let currency = parse_currency(&currency)?;
                let payment = client
                    .charge_card(customer_id, amount, currency, &source, &description)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Get { id } => {
                let payment_id: PaymentId = id
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid payment ID: {}", id))?;
                let payment = client.get_payment(payment_id).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
        },
    }

    Ok(())
}
