//! Card-charging provider port.
//!
//! This trait defines the interface for the external payment processor.
//! Implementations can be HTTP clients (Stripe), mock chargers, etc.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{CardCharge, Currency};

/// Error type for charge operations.
///
/// A `ChargerError` means the provider could not be asked (or gave a broken
/// answer); it is distinct from an explicit decline, which is a successful
/// call returning `card_debited == false`.
#[derive(Debug, thiserror::Error)]
pub enum ChargerError {
    #[error("Charge provider unavailable: {0}")]
    Unavailable(String),

    #[error("Charge provider error: {0}")]
    Provider(String),

    #[error("Invalid charge request: {0}")]
    InvalidRequest(String),
}

/// Port trait for the card-charging capability.
#[async_trait::async_trait]
pub trait CardCharger: Send + Sync + 'static {
    /// Attempts to charge the funding instrument identified by `source`.
    ///
    /// The amount is an exact decimal in major units; implementations must
    /// not round it.
    async fn charge_card(
        &self,
        source: &str,
        amount: Decimal,
        currency: Currency,
        description: &str,
    ) -> Result<CardCharge, ChargerError>;
}

#[async_trait::async_trait]
impl<T> CardCharger for Arc<T>
where
    T: CardCharger + ?Sized,
{
    async fn charge_card(
        &self,
        source: &str,
        amount: Decimal,
        currency: Currency,
        description: &str,
    ) -> Result<CardCharge, ChargerError> {
        (**self)
            .charge_card(source, amount, currency, description)
            .await
    }
}
