//! Data Transfer Objects (DTOs) for requests.
//!
//! Candidates are what the caller submits; they exist only for the duration
//! of one service call. The services return finalized domain records instead
//! of mutating the caller's objects in place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Currency, CustomerId};

// ─────────────────────────────────────────────────────────────────────────────
// Customer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate customer submitted for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCandidate {
    /// Optional caller-assigned id; generated by the registry when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    pub name: String,
    pub phone_number: String,
}

/// Request to register a new customer. Wraps exactly one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub customer: CustomerCandidate,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate payment submitted for charging.
///
/// Any `customer_id` the caller supplies here is ignored; the processor
/// attributes the payment to the validated customer id from the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    /// Amount in major units, exact decimal (serialized as a string)
    pub amount: Decimal,
    pub currency: Currency,
    /// Opaque funding-instrument token
    pub source: String,
    #[serde(default)]
    pub description: String,
}

/// Request to charge a card. Wraps exactly one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub payment: PaymentCandidate,
}
