//! # Billing Hex
//!
//! Application service layer and HTTP adapter for the billing service.
//!
//! ## Architecture
//!
//! - `service/` - Application services (customer registration, card charging)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The services are generic over the port traits in `billing-types`, allowing
//! different store/charger implementations to be injected.

pub mod inbound;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{CustomerRegistry, PaymentProcessor};
