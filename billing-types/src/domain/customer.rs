//! Customer domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a Customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Creates a new random CustomerId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a CustomerId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A registered customer.
///
/// Immutable once persisted; the phone number is globally unique across
/// all stored customers (enforced by the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Display name of the customer
    pub name: String,
    /// Phone number in international format, unique per customer
    pub phone_number: String,
    /// When the customer was registered
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer record.
    ///
    /// # Validation
    /// - Name cannot be empty
    /// - Phone number cannot be empty
    pub fn new(id: CustomerId, name: String, phone_number: String) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Customer name cannot be empty".into(),
            ));
        }
        if phone_number.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Phone number cannot be empty".into(),
            ));
        }

        Ok(Self {
            id,
            name,
            phone_number,
            created_at: Utc::now(),
        })
    }

    /// Creates a customer with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: CustomerId,
        name: String,
        phone_number: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            phone_number,
            created_at,
        }
    }
}
