//! Configuration loading from environment.

use std::env;

use billing_types::Currency;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub stripe_secret_key: String,
    pub accepted_currencies: Vec<Currency>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let stripe_secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("STRIPE_SECRET_KEY environment variable is required"))?;

        let accepted_currencies = env::var("ACCEPTED_CURRENCIES")
            .unwrap_or_else(|_| "USD,GBP".to_string())
            .split(',')
            .map(|code| {
                code.trim()
                    .parse::<Currency>()
                    .map_err(|e| anyhow::anyhow!("ACCEPTED_CURRENCIES: {}", e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if accepted_currencies.is_empty() {
            anyhow::bail!("ACCEPTED_CURRENCIES cannot be empty");
        }

        Ok(Self {
            port,
            database_url,
            stripe_secret_key,
            accepted_currencies,
        })
    }
}
