//! Customer-id generation port.
//!
//! Identifier generation is injected rather than called as a process-wide
//! global, so tests can supply deterministic ids.

use crate::domain::CustomerId;

/// Capability producing fresh, globally unique customer ids.
pub trait CustomerIdGenerator: Send + Sync + 'static {
    fn next_id(&self) -> CustomerId;
}

/// Production generator backed by random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCustomerIds;

impl CustomerIdGenerator for RandomCustomerIds {
    fn next_id(&self) -> CustomerId {
        CustomerId::new()
    }
}
