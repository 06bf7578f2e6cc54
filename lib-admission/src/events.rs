//! Gateway Event Notifications

use serde::{Deserialize, Serialize};
use std::fmt;

use lib_types::{Address, AssetId};

/// Events emitted by the gateway, drained by the host after each call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AdmissionEvent {
    /// A bankroll token was provisioned for a first-time admission.
    /// Never emitted for an idempotent re-join.
    BankrollTokenCreated {
        dispatcher: Address,
        asset: AssetId,
        token: Address,
    },

    /// The downstream rewards manager was changed
    RewardsManagerChanged { old: Address, new: Address },
}

impl fmt::Display for AdmissionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionEvent::BankrollTokenCreated { dispatcher, token, .. } => {
                write!(
                    f,
                    "BankrollTokenCreated(dispatcher={}, token={})",
                    hex::encode(&dispatcher.as_bytes()[..8]),
                    hex::encode(&token.as_bytes()[..8])
                )
            }
            AdmissionEvent::RewardsManagerChanged { old, new } => {
                write!(
                    f,
                    "RewardsManagerChanged({} -> {})",
                    hex::encode(&old.as_bytes()[..8]),
                    hex::encode(&new.as_bytes()[..8])
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_roundtrip() {
        let event = AdmissionEvent::BankrollTokenCreated {
            dispatcher: Address::new([1u8; 32]),
            asset: AssetId::NATIVE,
            token: Address::new([2u8; 32]),
        };
        let serialized = bincode::serialize(&event).unwrap();
        let deserialized: AdmissionEvent = bincode::deserialize(&serialized).unwrap();
        assert_eq!(event, deserialized);
    }
}
