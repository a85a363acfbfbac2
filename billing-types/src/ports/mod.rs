//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod charger;
mod idgen;
mod phone;
mod store;

pub use charger::{CardCharger, ChargerError};
pub use idgen::{CustomerIdGenerator, RandomCustomerIds};
pub use phone::{PhoneValidator, UkPhoneNumberValidator};
pub use store::{CustomerStore, PaymentStore};
