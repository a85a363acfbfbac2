//! Phone-number validation port.

/// Pure predicate deciding whether a phone number is acceptable.
///
/// No side effects; substitutable with a stub in tests.
pub trait PhoneValidator: Send + Sync + 'static {
    fn is_valid(&self, phone_number: &str) -> bool;
}

/// Default validator: UK numbers in international format.
///
/// Accepts `+44` followed by exactly ten ASCII digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct UkPhoneNumberValidator;

impl PhoneValidator for UkPhoneNumberValidator {
    fn is_valid(&self, phone_number: &str) -> bool {
        phone_number
            .strip_prefix("+44")
            .map(|rest| rest.len() == 10 && rest.bytes().all(|b| b.is_ascii_digit()))
            .unwrap_or(false)
    }
}
