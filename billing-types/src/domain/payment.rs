//! Payment domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::customer::CustomerId;
use crate::error::DomainError;

/// Unique identifier for a Payment, assigned by the store on persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(i64);

impl PaymentId {
    /// Creates a PaymentId from a raw database value.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A card payment captured against a customer.
///
/// A payment is only ever persisted after the charging provider confirmed
/// the funds were debited. The amount is an exact decimal; it is never
/// coerced through floating point or rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Store-assigned identifier; `None` until persisted
    pub id: Option<PaymentId>,
    /// The customer this payment is attributed to
    pub customer_id: CustomerId,
    /// Amount in major units, exact decimal
    pub amount: Decimal,
    pub currency: Currency,
    /// Opaque funding-instrument token (e.g. a tokenized card)
    pub source: String,
    /// Free-text description, informational only
    pub description: String,
    /// When the payment was captured
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new unpersisted payment.
    ///
    /// # Validation
    /// - Amount must be strictly positive
    /// - Source token cannot be empty
    pub fn new(
        customer_id: CustomerId,
        amount: Decimal,
        currency: Currency,
        source: String,
        description: String,
    ) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::ValidationError(format!(
                "Payment amount must be positive, got {}",
                amount
            )));
        }
        if source.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Payment source cannot be empty".into(),
            ));
        }

        Ok(Self {
            id: None,
            customer_id,
            amount,
            currency,
            source,
            description,
            created_at: Utc::now(),
        })
    }

    /// Creates a payment with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: PaymentId,
        customer_id: CustomerId,
        amount: Decimal,
        currency: Currency,
        source: String,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            customer_id,
            amount,
            currency,
            source,
            description,
            created_at,
        }
    }
}

/// Outcome of a charge attempt against the card-charging provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCharge {
    /// True only if the provider confirmed the funds were captured.
    pub card_debited: bool,
}

impl CardCharge {
    pub fn debited() -> Self {
        Self { card_debited: true }
    }

    pub fn declined() -> Self {
        Self {
            card_debited: false,
        }
    }
}
