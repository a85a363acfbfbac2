//! Application services.
//!
//! Each service is a self-contained orchestration unit over injected ports;
//! neither calls the other.

mod charging;
mod registration;

pub use charging::{DEFAULT_ACCEPTED_CURRENCIES, PaymentProcessor};
pub use registration::CustomerRegistry;
