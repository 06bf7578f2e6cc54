//! Collaborator Interfaces
//!
//! The gateway consumes two external systems through narrow read-only
//! traits. Implementations are provided by the host and passed per call;
//! the gateway never holds them.

use lib_types::{Address, Amount};

/// Registry of dispatcher entities created by the external factory.
///
/// The gateway only ever asks one question: does this dispatcher exist.
pub trait DispatcherRegistry {
    /// Whether `dispatcher` has been created by the factory
    fn is_registered(&self, dispatcher: &Address) -> bool;
}

/// Read-only oracle supplying governance weight for eligibility checks.
pub trait VotingPowerOracle {
    /// Governance weight of `account` at the current state
    fn voting_power(&self, account: &Address) -> Amount;
}
