//! Token Event Notifications
//!
//! Every successful state mutation appends exactly the events describing
//! it; rejected calls append nothing. The host drains pending events with
//! [`crate::BankrollToken::take_events`] after each call.

use serde::{Deserialize, Serialize};
use std::fmt;

use lib_types::{Address, Amount, Ppm, Timestamp};

/// Balance-, approval- and configuration-change notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenEvent {
    /// Balance moved between accounts
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },

    /// Allowance set or adjusted
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },

    /// Supply created
    Minted { to: Address, amount: Amount },

    /// Supply destroyed
    Burned { from: Address, amount: Amount },

    /// A signed transfer authorization was consumed
    AuthorizationUsed {
        authorizer: Address,
        nonce: [u8; 32],
    },

    /// Supply-manager capability reassigned
    SupplyManagerChanged { old: Address, new: Address },

    /// Metadata-manager capability reassigned
    MetadataManagerChanged { old: Address, new: Address },

    /// Mint cap reconfigured
    MintCapChanged { old: Ppm, new: Ppm },

    /// Supply-change cooldown reconfigured
    SupplyChangeWaitingPeriodChanged { old: Timestamp, new: Timestamp },

    /// Display name/symbol changed
    MetadataUpdated { name: String, symbol: String },
}

impl fmt::Display for TokenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenEvent::Transfer { from, to, amount } => {
                write!(
                    f,
                    "Transfer({} -> {}, {})",
                    hex::encode(&from.as_bytes()[..8]),
                    hex::encode(&to.as_bytes()[..8]),
                    amount
                )
            }
            TokenEvent::Approval { owner, spender, amount } => {
                write!(
                    f,
                    "Approval({} -> {}, {})",
                    hex::encode(&owner.as_bytes()[..8]),
                    hex::encode(&spender.as_bytes()[..8]),
                    amount
                )
            }
            TokenEvent::Minted { amount, .. } => write!(f, "Minted({})", amount),
            TokenEvent::Burned { amount, .. } => write!(f, "Burned({})", amount),
            TokenEvent::AuthorizationUsed { nonce, .. } => {
                write!(f, "AuthorizationUsed({})", hex::encode(&nonce[..8]))
            }
            TokenEvent::SupplyManagerChanged { .. } => write!(f, "SupplyManagerChanged"),
            TokenEvent::MetadataManagerChanged { .. } => write!(f, "MetadataManagerChanged"),
            TokenEvent::MintCapChanged { old, new } => {
                write!(f, "MintCapChanged({} -> {})", old, new)
            }
            TokenEvent::SupplyChangeWaitingPeriodChanged { old, new } => {
                write!(f, "SupplyChangeWaitingPeriodChanged({} -> {})", old, new)
            }
            TokenEvent::MetadataUpdated { name, symbol } => {
                write!(f, "MetadataUpdated({}, {})", name, symbol)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = TokenEvent::Transfer {
            from: Address::new([1u8; 32]),
            to: Address::new([2u8; 32]),
            amount: 100,
        };
        let rendered = format!("{}", event);
        assert!(rendered.starts_with("Transfer("));
        assert!(rendered.contains("100"));
    }

    #[test]
    fn test_event_serde_roundtrip() {
        let event = TokenEvent::Minted {
            to: Address::new([3u8; 32]),
            amount: 42,
        };
        let serialized = bincode::serialize(&event).unwrap();
        let deserialized: TokenEvent = bincode::deserialize(&serialized).unwrap();
        assert_eq!(event, deserialized);
    }
}
