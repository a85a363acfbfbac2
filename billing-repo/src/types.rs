//! Shared database row types with feature-gated fields.
//!
//! Postgres binds native UUID / NUMERIC / TIMESTAMPTZ values; SQLite stores
//! everything as text (amounts in canonical decimal notation, so no
//! precision is lost) and parses on the way out.

use sqlx::FromRow;

use billing_types::{Currency, Customer, CustomerId, Payment, PaymentId, RepoError};

#[cfg(feature = "postgres")]
use chrono::{DateTime, Utc};
#[cfg(feature = "postgres")]
use rust_decimal::Decimal;
#[cfg(feature = "postgres")]
use uuid::Uuid;

/// Customer row from database.
#[derive(FromRow)]
pub struct DbCustomer {
    #[cfg(feature = "postgres")]
    pub id: Uuid,
    #[cfg(not(feature = "postgres"))]
    pub id: String,

    pub name: String,
    pub phone_number: String,

    #[cfg(feature = "postgres")]
    pub created_at: DateTime<Utc>,
    #[cfg(not(feature = "postgres"))]
    pub created_at: String,
}

/// Payment row from database.
#[derive(FromRow)]
pub struct DbPayment {
    pub id: i64,

    #[cfg(feature = "postgres")]
    pub customer_id: Uuid,
    #[cfg(not(feature = "postgres"))]
    pub customer_id: String,

    #[cfg(feature = "postgres")]
    pub amount: Decimal,
    #[cfg(not(feature = "postgres"))]
    pub amount: String,

    pub currency: String,
    pub source: String,
    pub description: String,

    #[cfg(feature = "postgres")]
    pub created_at: DateTime<Utc>,
    #[cfg(not(feature = "postgres"))]
    pub created_at: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse_currency(s: &str) -> Result<Currency, RepoError> {
    s.parse()
        .map_err(|_| RepoError::Database(format!("Unknown currency: {}", s)))
}

#[cfg(not(feature = "postgres"))]
fn parse_uuid(s: &str) -> Result<uuid::Uuid, RepoError> {
    uuid::Uuid::parse_str(s).map_err(|e| RepoError::Database(e.to_string()))
}

#[cfg(not(feature = "postgres"))]
fn parse_timestamp(s: &str) -> Result<chrono::DateTime<chrono::Utc>, RepoError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| RepoError::Database(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion (feature-gated implementations)
// ─────────────────────────────────────────────────────────────────────────────

impl DbCustomer {
    /// Convert database row to domain Customer.
    pub fn into_domain(self) -> Result<Customer, RepoError> {
        #[cfg(feature = "postgres")]
        let (id, created_at) = (CustomerId::from_uuid(self.id), self.created_at);

        #[cfg(not(feature = "postgres"))]
        let (id, created_at) = (
            CustomerId::from_uuid(parse_uuid(&self.id)?),
            parse_timestamp(&self.created_at)?,
        );

        Ok(Customer::from_parts(
            id,
            self.name,
            self.phone_number,
            created_at,
        ))
    }
}

impl DbPayment {
    /// Convert database row to domain Payment.
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let currency = parse_currency(&self.currency)?;

        #[cfg(feature = "postgres")]
        let (customer_id, amount, created_at) = (
            CustomerId::from_uuid(self.customer_id),
            self.amount,
            self.created_at,
        );

        #[cfg(not(feature = "postgres"))]
        let (customer_id, amount, created_at) = (
            CustomerId::from_uuid(parse_uuid(&self.customer_id)?),
            self.amount
                .parse::<rust_decimal::Decimal>()
                .map_err(|e| RepoError::Database(e.to_string()))?,
            parse_timestamp(&self.created_at)?,
        );

        Ok(Payment::from_parts(
            PaymentId::from_i64(self.id),
            customer_id,
            amount,
            currency,
            self.source,
            self.description,
            created_at,
        ))
    }
}
