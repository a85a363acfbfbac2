//! Card charging service.
//!
//! Validates customer existence and currency support, delegates to the
//! card-charging capability and persists the outcome. Pure orchestration.

use billing_types::{
    AppError, CardCharger, Currency, CustomerId, CustomerStore, DomainError, Payment, PaymentId,
    PaymentRequest, PaymentStore,
};

/// Currencies accepted for new payments unless overridden in configuration.
///
/// A strict subset of the representable `Currency` values.
pub const DEFAULT_ACCEPTED_CURRENCIES: &[Currency] = &[Currency::USD, Currency::GBP];

/// Application service for charging payment cards.
pub struct PaymentProcessor<S, P, C> {
    customers: S,
    payments: P,
    charger: C,
    accepted_currencies: Vec<Currency>,
}

impl<S, P, C> PaymentProcessor<S, P, C>
where
    S: CustomerStore,
    P: PaymentStore,
    C: CardCharger,
{
    /// Creates a new processor with the default currency allow-list.
    pub fn new(customers: S, payments: P, charger: C) -> Self {
        Self {
            customers,
            payments,
            charger,
            accepted_currencies: DEFAULT_ACCEPTED_CURRENCIES.to_vec(),
        }
    }

    /// Replaces the accepted-currency allow-list.
    pub fn with_accepted_currencies(mut self, accepted: Vec<Currency>) -> Self {
        self.accepted_currencies = accepted;
        self
    }

    /// Charges the candidate payment's funding instrument and persists the
    /// payment on success.
    ///
    /// Validation order (fail-fast): customer existence, currency
    /// allow-list, candidate invariants. Only then is the charger invoked,
    /// exactly once, and only a debited outcome reaches the payment store.
    /// The persisted payment is attributed to `customer_id`; whatever the
    /// caller put on the candidate is never trusted.
    pub async fn charge_card(
        &self,
        customer_id: CustomerId,
        request: PaymentRequest,
    ) -> Result<Payment, AppError> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(DomainError::CustomerNotFound(customer_id).into());
        }

        let candidate = request.payment;

        if !self.accepted_currencies.contains(&candidate.currency) {
            return Err(DomainError::UnsupportedCurrency(candidate.currency).into());
        }

        let payment = Payment::new(
            customer_id,
            candidate.amount,
            candidate.currency,
            candidate.source,
            candidate.description,
        )
        .map_err(AppError::Domain)?;

        let charge = self
            .charger
            .charge_card(
                &payment.source,
                payment.amount,
                payment.currency,
                &payment.description,
            )
            .await?;

        if !charge.card_debited {
            return Err(DomainError::ChargeDeclined(customer_id).into());
        }

        Ok(self.payments.save(payment).await?)
    }

    /// Gets a payment by id.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, AppError> {
        self.payments
            .find_by_id(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Payment {}", id))))
    }
}
