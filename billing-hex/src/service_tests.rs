//! CustomerRegistry and PaymentProcessor unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use billing_types::{
        AppError, CardCharge, CardCharger, ChargerError, Currency, Customer, CustomerCandidate,
        CustomerId, CustomerIdGenerator, CustomerStore, DomainError, Payment, PaymentCandidate,
        PaymentId, PaymentRequest, PaymentStore, PhoneValidator, RegistrationRequest, RepoError,
    };

    use crate::{CustomerRegistry, PaymentProcessor};

    // ─────────────────────────────────────────────────────────────────────────
    // Fakes
    // ─────────────────────────────────────────────────────────────────────────

    /// In-memory customer store recording how often it was hit.
    pub struct FakeCustomerStore {
        customers: Mutex<HashMap<CustomerId, Customer>>,
        phone_lookups: AtomicUsize,
        save_calls: AtomicUsize,
    }

    impl FakeCustomerStore {
        pub fn new() -> Self {
            Self {
                customers: Mutex::new(HashMap::new()),
                phone_lookups: AtomicUsize::new(0),
                save_calls: AtomicUsize::new(0),
            }
        }

        /// Seeds a customer without counting it as a save call.
        pub fn seed(&self, customer: Customer) {
            self.customers
                .lock()
                .unwrap()
                .insert(customer.id, customer);
        }

        pub fn save_calls(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }

        pub fn phone_lookups(&self) -> usize {
            self.phone_lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CustomerStore for FakeCustomerStore {
        async fn find_by_phone_number(
            &self,
            phone_number: &str,
        ) -> Result<Option<Customer>, RepoError> {
            self.phone_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .customers
                .lock()
                .unwrap()
                .values()
                .find(|c| c.phone_number == phone_number)
                .cloned())
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
            Ok(self.customers.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, customer: Customer) -> Result<Customer, RepoError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            self.customers
                .lock()
                .unwrap()
                .insert(customer.id, customer.clone());
            Ok(customer)
        }
    }

    /// In-memory payment store that assigns sequential ids on save.
    pub struct FakePaymentStore {
        payments: Mutex<Vec<Payment>>,
        save_calls: AtomicUsize,
    }

    impl FakePaymentStore {
        pub fn new() -> Self {
            Self {
                payments: Mutex::new(Vec::new()),
                save_calls: AtomicUsize::new(0),
            }
        }

        pub fn save_calls(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }

        pub fn saved(&self) -> Vec<Payment> {
            self.payments.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentStore for FakePaymentStore {
        async fn save(&self, mut payment: Payment) -> Result<Payment, RepoError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            let mut payments = self.payments.lock().unwrap();
            payment.id = Some(PaymentId::from_i64(payments.len() as i64 + 1));
            payments.push(payment.clone());
            Ok(payment)
        }

        async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
            Ok(self
                .payments
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == Some(id))
                .cloned())
        }
    }

    /// Charger returning a canned result and recording every invocation.
    pub struct FakeCharger {
        result: Mutex<Option<Result<CardCharge, ChargerError>>>,
        calls: Mutex<Vec<(String, Decimal, Currency, String)>>,
    }

    impl FakeCharger {
        pub fn debiting() -> Self {
            Self::with_result(Ok(CardCharge::debited()))
        }

        pub fn declining() -> Self {
            Self::with_result(Ok(CardCharge::declined()))
        }

        pub fn failing(message: &str) -> Self {
            Self::with_result(Err(ChargerError::Unavailable(message.to_string())))
        }

        fn with_result(result: Result<CardCharge, ChargerError>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<(String, Decimal, Currency, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CardCharger for FakeCharger {
        async fn charge_card(
            &self,
            source: &str,
            amount: Decimal,
            currency: Currency,
            description: &str,
        ) -> Result<CardCharge, ChargerError> {
            self.calls.lock().unwrap().push((
                source.to_string(),
                amount,
                currency,
                description.to_string(),
            ));
            self.result
                .lock()
                .unwrap()
                .take()
                .expect("charger called more than once")
        }
    }

    /// Validator with a fixed verdict.
    struct StubValidator(bool);

    impl PhoneValidator for StubValidator {
        fn is_valid(&self, _phone_number: &str) -> bool {
            self.0
        }
    }

    /// Id generator always returning the same id.
    struct FixedIds(CustomerId);

    impl CustomerIdGenerator for FixedIds {
        fn next_id(&self) -> CustomerId {
            self.0
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn registration(id: Option<CustomerId>, name: &str, phone: &str) -> RegistrationRequest {
        RegistrationRequest {
            customer: CustomerCandidate {
                id,
                name: name.to_string(),
                phone_number: phone.to_string(),
            },
        }
    }

    fn payment_request(amount: Decimal, currency: Currency) -> PaymentRequest {
        PaymentRequest {
            payment: PaymentCandidate {
                customer_id: None,
                amount,
                currency,
                source: "card123xx".to_string(),
                description: "Donation".to_string(),
            },
        }
    }

    fn stored_customer(name: &str, phone: &str) -> Customer {
        Customer::new(CustomerId::new(), name.to_string(), phone.to_string()).unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // CustomerRegistry
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_register_saves_new_customer_with_generated_id() {
        let store = Arc::new(FakeCustomerStore::new());
        let generated = CustomerId::new();
        let registry =
            CustomerRegistry::new(store.clone(), StubValidator(true), FixedIds(generated));

        let customer = registry
            .register_new_customer(registration(None, "Max", "+444443524365"))
            .await
            .unwrap();

        assert_eq!(customer.id, generated);
        assert_eq!(customer.name, "Max");
        assert_eq!(customer.phone_number, "+444443524365");
        assert_eq!(store.save_calls(), 1);

        let found = store
            .find_by_phone_number("+444443524365")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, generated);
    }

    #[tokio::test]
    async fn test_register_preserves_caller_assigned_id() {
        let store = Arc::new(FakeCustomerStore::new());
        let caller_id = CustomerId::new();
        let registry = CustomerRegistry::new(
            store.clone(),
            StubValidator(true),
            FixedIds(CustomerId::new()),
        );

        let customer = registry
            .register_new_customer(registration(Some(caller_id), "Max", "+4444565787"))
            .await
            .unwrap();

        assert_eq!(customer.id, caller_id);
        assert_eq!(store.save_calls(), 1);
    }

    #[tokio::test]
    async fn test_register_same_phone_same_name_is_idempotent() {
        let store = Arc::new(FakeCustomerStore::new());
        let existing = stored_customer("Max", "+444454678999");
        store.seed(existing.clone());
        let registry = CustomerRegistry::new(
            store.clone(),
            StubValidator(true),
            FixedIds(CustomerId::new()),
        );

        let customer = registry
            .register_new_customer(registration(None, "Max", "+444454678999"))
            .await
            .unwrap();

        // the stored record comes back, nothing is written again
        assert_eq!(customer, existing);
        assert_eq!(store.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_same_phone_different_name_fails() {
        let store = Arc::new(FakeCustomerStore::new());
        store.seed(stored_customer("John", "+440000990000"));
        let registry = CustomerRegistry::new(
            store.clone(),
            StubValidator(true),
            FixedIds(CustomerId::new()),
        );

        let result = registry
            .register_new_customer(registration(None, "Max", "+440000990000"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::PhoneNumberTaken(ref p))) if p == "+440000990000"
        ));
        assert_eq!(store.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_name_comparison_is_case_sensitive() {
        let store = Arc::new(FakeCustomerStore::new());
        store.seed(stored_customer("max", "+440000990000"));
        let registry = CustomerRegistry::new(
            store.clone(),
            StubValidator(true),
            FixedIds(CustomerId::new()),
        );

        let result = registry
            .register_new_customer(registration(None, "Max", "+440000990000"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::PhoneNumberTaken(_)))
        ));
    }

    #[tokio::test]
    async fn test_register_invalid_phone_fails_before_any_store_call() {
        let store = Arc::new(FakeCustomerStore::new());
        let registry = CustomerRegistry::new(
            store.clone(),
            StubValidator(false),
            FixedIds(CustomerId::new()),
        );

        let result = registry
            .register_new_customer(registration(None, "Max", "not-a-phone"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidPhoneNumber(ref p))) if p == "not-a-phone"
        ));
        assert_eq!(store.phone_lookups(), 0);
        assert_eq!(store.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_empty_name_fails() {
        let store = Arc::new(FakeCustomerStore::new());
        let registry = CustomerRegistry::new(
            store.clone(),
            StubValidator(true),
            FixedIds(CustomerId::new()),
        );

        let result = registry
            .register_new_customer(registration(None, "   ", "+444443524365"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::ValidationError(_)))
        ));
        assert_eq!(store.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_get_customer_not_found() {
        let store = Arc::new(FakeCustomerStore::new());
        let registry = CustomerRegistry::new(store, StubValidator(true), FixedIds(CustomerId::new()));

        let result = registry.get_customer(CustomerId::new()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // PaymentProcessor
    // ─────────────────────────────────────────────────────────────────────────

    struct ChargeSetup {
        customers: Arc<FakeCustomerStore>,
        payments: Arc<FakePaymentStore>,
        charger: Arc<FakeCharger>,
        customer_id: CustomerId,
    }

    fn charge_setup(charger: FakeCharger) -> ChargeSetup {
        let customers = Arc::new(FakeCustomerStore::new());
        let customer = stored_customer("Max", "+444443524365");
        let customer_id = customer.id;
        customers.seed(customer);

        ChargeSetup {
            customers,
            payments: Arc::new(FakePaymentStore::new()),
            charger: Arc::new(charger),
            customer_id,
        }
    }

    impl ChargeSetup {
        fn processor(
            &self,
        ) -> PaymentProcessor<Arc<FakeCustomerStore>, Arc<FakePaymentStore>, Arc<FakeCharger>>
        {
            PaymentProcessor::new(
                self.customers.clone(),
                self.payments.clone(),
                self.charger.clone(),
            )
        }
    }

    #[tokio::test]
    async fn test_charge_card_success_persists_payment() {
        let setup = charge_setup(FakeCharger::debiting());

        let payment = setup
            .processor()
            .charge_card(
                setup.customer_id,
                payment_request(dec!(100.00), Currency::USD),
            )
            .await
            .unwrap();

        assert!(payment.id.is_some());
        assert_eq!(payment.customer_id, setup.customer_id);
        assert_eq!(payment.amount, dec!(100.00));
        assert_eq!(payment.currency, Currency::USD);
        assert_eq!(setup.payments.save_calls(), 1);

        // the charger saw exactly the four candidate fields
        let calls = setup.charger.calls();
        assert_eq!(calls.len(), 1);
        let (source, amount, currency, description) = &calls[0];
        assert_eq!(source, "card123xx");
        assert_eq!(*amount, dec!(100.00));
        assert_eq!(*currency, Currency::USD);
        assert_eq!(description, "Donation");
    }

    #[tokio::test]
    async fn test_charge_card_overrides_caller_supplied_customer_id() {
        let setup = charge_setup(FakeCharger::debiting());

        let mut request = payment_request(dec!(100.00), Currency::USD);
        request.payment.customer_id = Some(CustomerId::new());

        let payment = setup
            .processor()
            .charge_card(setup.customer_id, request)
            .await
            .unwrap();

        assert_eq!(payment.customer_id, setup.customer_id);
        assert_eq!(setup.payments.saved()[0].customer_id, setup.customer_id);
    }

    #[tokio::test]
    async fn test_charge_card_declined_does_not_persist() {
        let setup = charge_setup(FakeCharger::declining());

        let result = setup
            .processor()
            .charge_card(
                setup.customer_id,
                payment_request(dec!(100.00), Currency::USD),
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::ChargeDeclined(id))) if id == setup.customer_id
        ));
        assert_eq!(setup.charger.calls().len(), 1);
        assert_eq!(setup.payments.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_charge_card_unknown_customer_touches_nothing() {
        let setup = charge_setup(FakeCharger::debiting());
        let unknown = CustomerId::new();

        let result = setup
            .processor()
            .charge_card(unknown, payment_request(dec!(100.00), Currency::USD))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::CustomerNotFound(id))) if id == unknown
        ));
        assert_eq!(setup.charger.calls().len(), 0);
        assert_eq!(setup.payments.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_charge_card_unsupported_currency_touches_nothing() {
        let setup = charge_setup(FakeCharger::debiting());

        let result = setup
            .processor()
            .charge_card(
                setup.customer_id,
                payment_request(dec!(100.00), Currency::EUR),
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::UnsupportedCurrency(Currency::EUR)))
        ));
        assert_eq!(setup.charger.calls().len(), 0);
        assert_eq!(setup.payments.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_charge_card_custom_allow_list() {
        let setup = charge_setup(FakeCharger::debiting());

        let payment = setup
            .processor()
            .with_accepted_currencies(vec![Currency::EUR])
            .charge_card(
                setup.customer_id,
                payment_request(dec!(50.00), Currency::EUR),
            )
            .await
            .unwrap();

        assert_eq!(payment.currency, Currency::EUR);
    }

    #[tokio::test]
    async fn test_charge_card_non_positive_amount_fails_before_charging() {
        let setup = charge_setup(FakeCharger::debiting());

        let result = setup
            .processor()
            .charge_card(setup.customer_id, payment_request(dec!(0), Currency::USD))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::ValidationError(_)))
        ));
        assert_eq!(setup.charger.calls().len(), 0);
        assert_eq!(setup.payments.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_charge_card_provider_failure_is_not_a_decline() {
        let setup = charge_setup(FakeCharger::failing("connection reset"));

        let result = setup
            .processor()
            .charge_card(
                setup.customer_id,
                payment_request(dec!(100.00), Currency::USD),
            )
            .await;

        assert!(matches!(result, Err(AppError::ProviderUnavailable(_))));
        assert_eq!(setup.payments.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_get_payment_not_found() {
        let setup = charge_setup(FakeCharger::debiting());

        let result = setup.processor().get_payment(PaymentId::from_i64(42)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
