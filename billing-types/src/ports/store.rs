//! Store port traits.
//!
//! These are the primary ports in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory fakes) implement these traits.

use std::sync::Arc;

use crate::domain::{Customer, CustomerId, Payment, PaymentId};
use crate::error::RepoError;

/// Persistence port for customers.
///
/// `save` MUST reject a second customer with an already-stored phone number;
/// implementations enforce this with a uniqueness constraint so that
/// concurrent check-then-insert races surface as `RepoError::Conflict`.
#[async_trait::async_trait]
pub trait CustomerStore: Send + Sync + 'static {
    /// Looks up a customer by phone number.
    async fn find_by_phone_number(&self, phone_number: &str)
    -> Result<Option<Customer>, RepoError>;

    /// Looks up a customer by id.
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError>;

    /// Persists a customer, returning the stored record.
    async fn save(&self, customer: Customer) -> Result<Customer, RepoError>;
}

/// Persistence port for captured payments.
#[async_trait::async_trait]
pub trait PaymentStore: Send + Sync + 'static {
    /// Persists a payment, assigning its id, and returns the stored record.
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError>;

    /// Looks up a payment by id.
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;
}

// One adapter instance typically backs both services, so the ports are also
// implemented for Arc<T>.

#[async_trait::async_trait]
impl<T> CustomerStore for Arc<T>
where
    T: CustomerStore + ?Sized,
{
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Customer>, RepoError> {
        (**self).find_by_phone_number(phone_number).await
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, customer: Customer) -> Result<Customer, RepoError> {
        (**self).save(customer).await
    }
}

#[async_trait::async_trait]
impl<T> PaymentStore for Arc<T>
where
    T: PaymentStore + ?Sized,
{
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError> {
        (**self).save(payment).await
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        (**self).find_by_id(id).await
    }
}
