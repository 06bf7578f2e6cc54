//! Bouncer - Admission Gateway
//!
//! The gateway onboards dispatchers into the pooled-capital program and
//! provisions each one a dedicated bankroll token.
//!
//! # Invariants (CRITICAL)
//!
//! **I1: Single writer**
//! - the admission registry is written only by its owning gateway; no
//!   external actor can insert or overwrite entries
//!
//! **I2: Entry immutability**
//! - once a (dispatcher, asset) entry is set it never changes;
//!   re-admission returns the recorded address and provisions nothing
//!
//! **I3: Deterministic token addresses**
//! - token addresses derive from (gateway, dispatcher, asset) with no
//!   randomness; same inputs always produce the same address
//!
//! **I4: Capability handoff**
//! - migration is one atomic supply-manager reassignment; afterwards this
//!   gateway holds no authority over the token

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use lib_crypto::hash_blake3_prefixed;
use lib_tokens::{BankrollToken, TokenInit};
use lib_types::{Address, AssetId, CallContext};

use crate::config::BouncerConfig;
use crate::errors::{AdmissionError, AdmissionResult};
use crate::events::AdmissionEvent;
use crate::traits::{DispatcherRegistry, VotingPowerOracle};

/// Domain tag for deterministic token address derivation
const TOKEN_ADDRESS_TAG: &[u8] = b"BANKROLL_TOKEN_V1";

/// Admission gateway: provisions bankroll tokens and holds the
/// supply-manager capability for every token it deploys until migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bouncer {
    /// Address identity of this gateway instance
    address: Address,
    /// Immutable configuration
    config: BouncerConfig,
    /// Admission registry: (dispatcher, asset) -> token address.
    /// Entries are immutable once set.
    bankroll_tokens: HashMap<(Address, AssetId), Address>,
    /// Token instances this gateway currently supply-manages
    tokens: HashMap<Address, BankrollToken>,
    /// Downstream rewards manager (zero until set)
    rewards_manager: Address,
    #[serde(skip)]
    events: Vec<AdmissionEvent>,
}

impl Bouncer {
    /// Create a gateway at `address` with the given configuration.
    pub fn new(address: Address, config: BouncerConfig) -> AdmissionResult<Self> {
        if address.is_zero() {
            return Err(AdmissionError::ZeroAddress);
        }
        config.validate()?;
        Ok(Self {
            address,
            config,
            bankroll_tokens: HashMap::new(),
            tokens: HashMap::new(),
            rewards_manager: Address::zero(),
            events: Vec::new(),
        })
    }

    // =========================================================================
    // Read-only surface
    // =========================================================================

    /// Address identity of this gateway
    pub fn address(&self) -> Address {
        self.address
    }

    /// Immutable configuration
    pub fn config(&self) -> &BouncerConfig {
        &self.config
    }

    /// Recorded token address for (dispatcher, asset), if admitted
    pub fn bankroll_token(&self, dispatcher: &Address, asset: &AssetId) -> Option<Address> {
        self.bankroll_tokens.get(&(*dispatcher, *asset)).copied()
    }

    /// A token instance this gateway supply-manages
    pub fn token(&self, address: &Address) -> Option<&BankrollToken> {
        self.tokens.get(address)
    }

    /// Mutable access to a held token, for the host to route token calls
    pub fn token_mut(&mut self, address: &Address) -> Option<&mut BankrollToken> {
        self.tokens.get_mut(address)
    }

    /// Current rewards manager (zero until set)
    pub fn rewards_manager(&self) -> Address {
        self.rewards_manager
    }

    /// Drain pending event notifications
    pub fn take_events(&mut self) -> Vec<AdmissionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending event notifications, in emission order
    pub fn events(&self) -> &[AdmissionEvent] {
        &self.events
    }

    // =========================================================================
    // Admission
    // =========================================================================

    /// Admit `dispatcher` for the native asset, provisioning its bankroll
    /// token on first admission.
    ///
    /// Idempotent: an existing entry is returned as-is, with no new
    /// provisioning and no creation event. Eligibility (registry
    /// membership, voting-power floor) is only evaluated for first-time
    /// admissions.
    pub fn join(
        &mut self,
        ctx: &CallContext,
        dispatcher: Address,
        registry: &dyn DispatcherRegistry,
        oracle: &dyn VotingPowerOracle,
    ) -> AdmissionResult<Address> {
        if dispatcher.is_zero() {
            return Err(AdmissionError::ZeroAddress);
        }
        let asset = AssetId::NATIVE;
        if let Some(existing) = self.bankroll_token(&dispatcher, &asset) {
            debug!(%dispatcher, token = %existing, "dispatcher already admitted");
            return Ok(existing);
        }
        if !registry.is_registered(&dispatcher) {
            return Err(AdmissionError::UnknownDispatcher { dispatcher });
        }
        let power = oracle.voting_power(&dispatcher);
        if power < self.config.required_voting_power {
            return Err(AdmissionError::InsufficientVotingPower {
                have: power,
                required: self.config.required_voting_power,
            });
        }

        let token_address = self.derive_token_address(&dispatcher, &asset);
        let defaults = &self.config.token_defaults;
        let token = BankrollToken::new(TokenInit {
            address: token_address,
            chain_id: self.config.chain_id,
            name: format!("Bankroll: {}", hex::encode(&dispatcher.as_bytes()[..4])),
            symbol: "BRT".to_string(),
            decimals: defaults.decimals,
            initial_supply: defaults.initial_supply,
            initial_holder: dispatcher,
            supply_manager: self.address,
            metadata_manager: self.config.role_admin,
            mint_cap: defaults.mint_cap,
            supply_change_waiting_period: defaults.supply_change_waiting_period,
            created_at: ctx.now,
        })?;

        self.bankroll_tokens.insert((dispatcher, asset), token_address);
        self.tokens.insert(token_address, token);
        self.events.push(AdmissionEvent::BankrollTokenCreated {
            dispatcher,
            asset,
            token: token_address,
        });
        info!(%dispatcher, token = %token_address, "admitted dispatcher");
        Ok(token_address)
    }

    // =========================================================================
    // Migration
    // =========================================================================

    /// Hand the supply-manager capability for `token` to a successor
    /// gateway. Admin capability required; the target must be non-zero.
    ///
    /// On success the instance is returned to the caller for delivery to
    /// the successor (see [`Bouncer::adopt`]); this gateway retains no
    /// further authority over it. The admission registry entry remains
    /// readable.
    pub fn migrate(
        &mut self,
        ctx: &CallContext,
        token: Address,
        new_bouncer: Address,
    ) -> AdmissionResult<BankrollToken> {
        self.require_admin(ctx)?;
        if new_bouncer.is_zero() {
            return Err(AdmissionError::ZeroAddress);
        }
        let mut instance = self
            .tokens
            .remove(&token)
            .ok_or(AdmissionError::TokenNotFound { token })?;
        let handoff = ctx.reissued_as(self.address);
        if let Err(err) = instance.set_supply_manager(&handoff, new_bouncer) {
            self.tokens.insert(token, instance);
            return Err(err.into());
        }
        info!(%token, %new_bouncer, "migrated bankroll token");
        Ok(instance)
    }

    /// Record a migrated token on the successor side.
    ///
    /// The instance must already be supply-managed by this gateway (the
    /// predecessor's `migrate` made the single atomic reassignment). A
    /// conflicting registry entry is rejected; an identical one is a
    /// no-op record.
    pub fn adopt(
        &mut self,
        dispatcher: Address,
        asset: AssetId,
        token: BankrollToken,
    ) -> AdmissionResult<()> {
        let token_address = token.address();
        if token.supply_manager() != self.address {
            return Err(AdmissionError::ForeignToken {
                token: token_address,
            });
        }
        if let Some(existing) = self.bankroll_token(&dispatcher, &asset) {
            if existing != token_address {
                return Err(AdmissionError::AlreadyAdmitted { dispatcher });
            }
        }
        self.bankroll_tokens
            .insert((dispatcher, asset), token_address);
        self.tokens.insert(token_address, token);
        info!(%dispatcher, token = %token_address, "adopted migrated token");
        Ok(())
    }

    // =========================================================================
    // Administration
    // =========================================================================

    /// Record the downstream rewards manager. Admin capability required.
    pub fn set_rewards_manager(
        &mut self,
        ctx: &CallContext,
        new: Address,
    ) -> AdmissionResult<()> {
        self.require_admin(ctx)?;
        let old = self.rewards_manager;
        self.rewards_manager = new;
        self.events
            .push(AdmissionEvent::RewardsManagerChanged { old, new });
        Ok(())
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn require_admin(&self, ctx: &CallContext) -> AdmissionResult<()> {
        if ctx.caller != self.config.admin {
            return Err(AdmissionError::NotAdmin { caller: ctx.caller });
        }
        Ok(())
    }

    /// Deterministic token address for (gateway, dispatcher, asset).
    fn derive_token_address(&self, dispatcher: &Address, asset: &AssetId) -> Address {
        Address::new(hash_blake3_prefixed(
            TOKEN_ADDRESS_TAG,
            &[
                self.address.as_bytes(),
                dispatcher.as_bytes(),
                asset.as_bytes(),
            ],
        ))
    }
}
