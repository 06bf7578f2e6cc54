//! Bankroll Admission Gateway
//!
//! This crate implements the `Bouncer`: the gateway that admits
//! dispatchers into the pooled-capital program, provisions each one a
//! dedicated bankroll token (`lib-tokens`) and holds the supply-manager
//! capability for every token it deploys until migration to a successor
//! gateway.
//!
//! # Key Types
//!
//! - [`Bouncer`]: the gateway
//! - [`BouncerConfig`] / [`TokenDefaults`]: immutable construction-time
//!   configuration
//! - [`DispatcherRegistry`] / [`VotingPowerOracle`]: consumed collaborator
//!   interfaces, injected per call
//! - [`AdmissionEvent`]: creation and administration notifications

pub mod bouncer;
pub mod config;
pub mod errors;
pub mod events;
pub mod traits;

pub use bouncer::Bouncer;
pub use config::{BouncerConfig, TokenDefaults};
pub use errors::{AdmissionError, AdmissionResult};
pub use events::AdmissionEvent;
pub use traits::{DispatcherRegistry, VotingPowerOracle};
