//! Domain models for the billing service.

pub mod currency;
pub mod customer;
pub mod payment;

pub use currency::Currency;
pub use customer::{Customer, CustomerId};
pub use payment::{CardCharge, Payment, PaymentId};
