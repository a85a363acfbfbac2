//! Customer registration service.
//!
//! Orchestrates phone validation, duplicate detection and persistence
//! through the injected ports. Contains NO infrastructure logic.

use billing_types::{
    AppError, Customer, CustomerId, CustomerIdGenerator, CustomerStore, DomainError,
    PhoneValidator, RandomCustomerIds, RegistrationRequest, UkPhoneNumberValidator,
};

/// Application service for registering customers.
///
/// Generic over the store, the phone-validation predicate and the id
/// generator, so tests can inject deterministic fakes for all three.
pub struct CustomerRegistry<S, V = UkPhoneNumberValidator, G = RandomCustomerIds> {
    store: S,
    validator: V,
    ids: G,
}

impl<S, V, G> CustomerRegistry<S, V, G>
where
    S: CustomerStore,
    V: PhoneValidator,
    G: CustomerIdGenerator,
{
    /// Creates a new registry with the given collaborators.
    pub fn new(store: S, validator: V, ids: G) -> Self {
        Self {
            store,
            validator,
            ids,
        }
    }

    /// Registers a new customer and returns the finalized record.
    ///
    /// Validation order (fail-fast):
    /// 1. The injected validator must accept the phone number.
    /// 2. A stored customer with the same phone number and the same name
    ///    makes the call idempotent: the stored record is returned without
    ///    a second save. Same phone with a different name fails.
    /// 3. A candidate without an id gets a freshly generated one.
    /// 4. Exactly one save call persists the customer.
    ///
    /// Name comparison is exact string equality, case-sensitive.
    pub async fn register_new_customer(
        &self,
        request: RegistrationRequest,
    ) -> Result<Customer, AppError> {
        let candidate = request.customer;

        if !self.validator.is_valid(&candidate.phone_number) {
            return Err(DomainError::InvalidPhoneNumber(candidate.phone_number).into());
        }

        if let Some(existing) = self
            .store
            .find_by_phone_number(&candidate.phone_number)
            .await?
        {
            if existing.name == candidate.name {
                return Ok(existing);
            }
            return Err(DomainError::PhoneNumberTaken(candidate.phone_number).into());
        }

        let id = candidate.id.unwrap_or_else(|| self.ids.next_id());
        let customer = Customer::new(id, candidate.name, candidate.phone_number)
            .map_err(AppError::Domain)?;

        Ok(self.store.save(customer).await?)
    }

    /// Gets a customer by id.
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, AppError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Customer {}", id))))
    }
}
