//! Bankroll Token Contract
//!
//! This crate defines the capped-supply, permit-enabled accounting token
//! issued per admitted (dispatcher, asset) pair.
//!
//! Admission and supply-manager provisioning are enforced in
//! `lib-admission`.
//!
//! # Key Types
//!
//! - [`BankrollToken`]: the token contract
//! - [`TokenInit`]: construction parameters
//! - [`SupplyChangeGate`]: the cooldown state machine view
//! - [`TokenEvent`]: balance-/approval-/configuration-change notifications
//!
//! # Signing
//!
//! Off-chain authorizations (permit, transfer/receive with authorization)
//! sign BLAKE3 digests bound to a per-deployment domain separator; see
//! [`digests`].

pub mod constants;
pub mod contract;
pub mod digests;
pub mod errors;
pub mod events;

pub use constants::{
    DOMAIN_VERSION, INFINITE_ALLOWANCE, SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM,
};
pub use contract::{BankrollToken, SupplyChangeGate, TokenInit};
pub use errors::{TokenError, TokenResult};
pub use events::TokenEvent;
