//! BankrollToken Contract
//!
//! The canonical capped-supply accounting token issued per admitted
//! (dispatcher, asset) pair.
//!
//! # Invariants (CRITICAL)
//!
//! **I1: Conservation**
//! - sum of all balances equals `total_supply` at every observable point
//!
//! **I2: Single-writer capabilities**
//! - `supply_manager` alone may mint/burn and reassign its own capability
//! - `metadata_manager` alone may rename and reassign its own capability
//!
//! **I3: Supply-change gate**
//! - mint/burn only when `now >= supply_change_allowed_after`
//! - every successful mint/burn reschedules the gate to
//!   `now + supply_change_waiting_period`
//!
//! **I4: Replay safety**
//! - permit nonces are strictly monotonic per owner
//! - authorization nonces are single-use per authorizer
//!
//! All preconditions are validated before any mutation; a rejected call
//! leaves no partial effects.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use lib_crypto::{recover_signer, SignatureProof};
use lib_types::{Address, Amount, CallContext, Ppm, Timestamp, PPM_DENOMINATOR};

use crate::constants::{INFINITE_ALLOWANCE, SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM};
use crate::digests;
use crate::errors::{TokenError, TokenResult};
use crate::events::TokenEvent;

/// Supply-change gate state, derived from the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyChangeGate {
    /// `now < supply_change_allowed_after`: mint/burn rejected
    Locked,
    /// `now >= supply_change_allowed_after`: one mint/burn may proceed
    Unlocked,
}

/// Construction parameters for a bankroll token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInit {
    /// Address identity of this token deployment
    pub address: Address,
    /// Executing chain identifier, bound into signing digests
    pub chain_id: u64,
    /// Display name
    pub name: String,
    /// Display symbol
    pub symbol: String,
    /// Display decimals (no effect on invariants)
    pub decimals: u8,
    /// Supply credited to `initial_holder` at creation
    pub initial_supply: Amount,
    /// Recipient of the initial supply
    pub initial_holder: Address,
    /// Initial supply-manager capability holder
    pub supply_manager: Address,
    /// Initial metadata-manager capability holder
    pub metadata_manager: Address,
    /// Per-mint cap in parts-per-million of the pre-mint supply
    pub mint_cap: Ppm,
    /// Cooldown between supply changes, seconds
    pub supply_change_waiting_period: Timestamp,
    /// Creation time; the gate starts locked until
    /// `created_at + supply_change_waiting_period`
    pub created_at: Timestamp,
}

/// Capped-supply fungible credential with delegated approvals and a
/// cooldown-gated mint/burn state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankrollToken {
    address: Address,
    chain_id: u64,
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<Address, HashMap<Address, Amount>>,
    supply_manager: Address,
    metadata_manager: Address,
    mint_cap: Ppm,
    supply_change_waiting_period: Timestamp,
    supply_change_allowed_after: Timestamp,
    nonces: HashMap<Address, u64>,
    used_authorizations: HashMap<Address, HashSet<[u8; 32]>>,
    #[serde(skip)]
    events: Vec<TokenEvent>,
}

impl BankrollToken {
    /// Create a new bankroll token.
    ///
    /// The initial supply is a creation credit, not a mint: it is not
    /// subject to the cooldown gate, which starts locked until
    /// `created_at + supply_change_waiting_period`.
    pub fn new(init: TokenInit) -> TokenResult<Self> {
        if init.supply_change_waiting_period < SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM {
            return Err(TokenError::WaitingPeriodBelowMinimum {
                requested: init.supply_change_waiting_period,
                minimum: SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM,
            });
        }
        if init.supply_manager.is_zero() || init.metadata_manager.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        if init.initial_supply > 0 && init.initial_holder.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let supply_change_allowed_after = init
            .created_at
            .checked_add(init.supply_change_waiting_period)
            .ok_or(TokenError::Overflow)?;

        let mut balances = HashMap::new();
        let mut events = Vec::new();
        if init.initial_supply > 0 {
            balances.insert(init.initial_holder, init.initial_supply);
            events.push(TokenEvent::Minted {
                to: init.initial_holder,
                amount: init.initial_supply,
            });
        }

        Ok(Self {
            address: init.address,
            chain_id: init.chain_id,
            name: init.name,
            symbol: init.symbol,
            decimals: init.decimals,
            total_supply: init.initial_supply,
            balances,
            allowances: HashMap::new(),
            supply_manager: init.supply_manager,
            metadata_manager: init.metadata_manager,
            mint_cap: init.mint_cap,
            supply_change_waiting_period: init.supply_change_waiting_period,
            supply_change_allowed_after,
            nonces: HashMap::new(),
            used_authorizations: HashMap::new(),
            events,
        })
    }

    // =========================================================================
    // Read-only surface
    // =========================================================================

    /// Address identity of this deployment
    pub fn address(&self) -> Address {
        self.address
    }

    /// Executing chain identifier
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display decimals
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Supply currently in circulation
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of an account
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Allowance granted by `owner` to `spender`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Next permit nonce for `owner`
    pub fn nonce(&self, owner: &Address) -> u64 {
        self.nonces.get(owner).copied().unwrap_or(0)
    }

    /// Current supply-manager capability holder
    pub fn supply_manager(&self) -> Address {
        self.supply_manager
    }

    /// Current metadata-manager capability holder
    pub fn metadata_manager(&self) -> Address {
        self.metadata_manager
    }

    /// Per-mint cap in parts-per-million of the pre-mint supply
    pub fn mint_cap(&self) -> Ppm {
        self.mint_cap
    }

    /// Cooldown between supply changes, seconds
    pub fn supply_change_waiting_period(&self) -> Timestamp {
        self.supply_change_waiting_period
    }

    /// Earliest time the next supply change may execute
    pub fn supply_change_allowed_after(&self) -> Timestamp {
        self.supply_change_allowed_after
    }

    /// Gate state at time `now`
    pub fn supply_change_gate(&self, now: Timestamp) -> SupplyChangeGate {
        if now < self.supply_change_allowed_after {
            SupplyChangeGate::Locked
        } else {
            SupplyChangeGate::Unlocked
        }
    }

    /// Whether `authorizer` has already consumed `nonce`
    pub fn authorization_used(&self, authorizer: &Address, nonce: &[u8; 32]) -> bool {
        self.used_authorizations
            .get(authorizer)
            .map(|used| used.contains(nonce))
            .unwrap_or(false)
    }

    /// Signing domain separator, derived from the current name.
    ///
    /// Recomputed on every call, never cached: signatures commit to the
    /// metadata in force at verification time, not at deployment.
    pub fn domain_separator(&self) -> [u8; 32] {
        digests::domain_separator(&self.name, self.chain_id, &self.address)
    }

    /// Digest an owner signs to authorize a permit with the owner's
    /// current nonce
    pub fn permit_digest(
        &self,
        owner: &Address,
        spender: &Address,
        value: Amount,
        deadline: Timestamp,
    ) -> [u8; 32] {
        digests::permit_digest(
            &self.domain_separator(),
            owner,
            spender,
            value,
            self.nonce(owner),
            deadline,
        )
    }

    /// Digest a holder signs to authorize a direct transfer
    pub fn transfer_authorization_digest(
        &self,
        from: &Address,
        to: &Address,
        value: Amount,
        valid_after: Timestamp,
        valid_before: Timestamp,
        nonce: &[u8; 32],
    ) -> [u8; 32] {
        digests::transfer_authorization_digest(
            &self.domain_separator(),
            from,
            to,
            value,
            valid_after,
            valid_before,
            nonce,
        )
    }

    /// Digest a holder signs to authorize a payee-submitted transfer
    pub fn receive_authorization_digest(
        &self,
        from: &Address,
        to: &Address,
        value: Amount,
        valid_after: Timestamp,
        valid_before: Timestamp,
        nonce: &[u8; 32],
    ) -> [u8; 32] {
        digests::receive_authorization_digest(
            &self.domain_separator(),
            from,
            to,
            value,
            valid_after,
            valid_before,
            nonce,
        )
    }

    /// Drain pending event notifications
    pub fn take_events(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending event notifications, in emission order
    pub fn events(&self) -> &[TokenEvent] {
        &self.events
    }

    /// Conservation check: sum of balances equals total supply.
    pub fn is_consistent(&self) -> bool {
        let mut sum: Amount = 0;
        for balance in self.balances.values() {
            sum = match sum.checked_add(*balance) {
                Some(v) => v,
                None => return false,
            };
        }
        sum == self.total_supply
    }

    // =========================================================================
    // Balance movement
    // =========================================================================

    /// Transfer `amount` from the caller to `to`.
    pub fn transfer(&mut self, ctx: &CallContext, to: Address, amount: Amount) -> TokenResult<()> {
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.move_balance(ctx.caller, to, amount)?;
        self.events.push(TokenEvent::Transfer {
            from: ctx.caller,
            to,
            amount,
        });
        Ok(())
    }

    /// Transfer `amount` from `from` to `to` on the caller's allowance.
    ///
    /// An allowance equal to the infinite sentinel is left untouched;
    /// any other allowance is decremented and the new value announced.
    pub fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> TokenResult<()> {
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let current = self.allowance(&from, &ctx.caller);
        if current != INFINITE_ALLOWANCE && current < amount {
            return Err(TokenError::AllowanceExceeded {
                have: current,
                need: amount,
            });
        }
        self.move_balance(from, to, amount)?;
        if current != INFINITE_ALLOWANCE {
            let remaining = current - amount;
            self.set_allowance(from, ctx.caller, remaining);
            self.events.push(TokenEvent::Approval {
                owner: from,
                spender: ctx.caller,
                amount: remaining,
            });
        }
        self.events.push(TokenEvent::Transfer { from, to, amount });
        Ok(())
    }

    /// Set the caller's allowance for `spender` unconditionally.
    pub fn approve(&mut self, ctx: &CallContext, spender: Address, amount: Amount) -> bool {
        self.set_allowance(ctx.caller, spender, amount);
        self.events.push(TokenEvent::Approval {
            owner: ctx.caller,
            spender,
            amount,
        });
        true
    }

    /// Set an allowance on a signed off-chain authorization.
    ///
    /// The digest binds (owner, spender, value, the owner's current
    /// nonce, deadline) under the recomputed domain separator. On success
    /// the owner's nonce advances by exactly one, consuming the
    /// signature.
    pub fn permit(
        &mut self,
        ctx: &CallContext,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: Timestamp,
        proof: &SignatureProof,
    ) -> TokenResult<()> {
        if deadline < ctx.now {
            return Err(TokenError::SignatureExpired {
                deadline,
                now: ctx.now,
            });
        }
        let digest = self.permit_digest(&owner, &spender, value, deadline);
        let signer = recover_signer(&digest, proof).map_err(|_| TokenError::SignerMismatch)?;
        if signer != owner {
            return Err(TokenError::SignerMismatch);
        }
        let next = self
            .nonce(&owner)
            .checked_add(1)
            .ok_or(TokenError::Overflow)?;
        self.nonces.insert(owner, next);
        self.set_allowance(owner, spender, value);
        self.events.push(TokenEvent::Approval {
            owner,
            spender,
            amount: value,
        });
        Ok(())
    }

    // =========================================================================
    // Authorized transfers
    // =========================================================================

    /// Execute a transfer pre-authorized by `from`'s signature.
    ///
    /// Valid strictly inside the `(valid_after, valid_before)` window;
    /// the 32-byte nonce is single-use per authorizer. No allowance is
    /// involved: the signature itself is the spending authority.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer_with_authorization(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        value: Amount,
        valid_after: Timestamp,
        valid_before: Timestamp,
        nonce: [u8; 32],
        proof: &SignatureProof,
    ) -> TokenResult<()> {
        let digest = self.transfer_authorization_digest(
            &from,
            &to,
            value,
            valid_after,
            valid_before,
            &nonce,
        );
        self.consume_authorization(ctx, from, to, value, valid_after, valid_before, nonce, &digest, proof)
    }

    /// Execute a payee-submitted transfer pre-authorized by `from`.
    ///
    /// Identical to [`Self::transfer_with_authorization`] except the
    /// caller must be the payee, preventing third parties from
    /// front-running the submission.
    #[allow(clippy::too_many_arguments)]
    pub fn receive_with_authorization(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        value: Amount,
        valid_after: Timestamp,
        valid_before: Timestamp,
        nonce: [u8; 32],
        proof: &SignatureProof,
    ) -> TokenResult<()> {
        if ctx.caller != to {
            return Err(TokenError::CallerNotPayee { caller: ctx.caller });
        }
        let digest = self.receive_authorization_digest(
            &from,
            &to,
            value,
            valid_after,
            valid_before,
            &nonce,
        );
        self.consume_authorization(ctx, from, to, value, valid_after, valid_before, nonce, &digest, proof)
    }

    // =========================================================================
    // Supply changes
    // =========================================================================

    /// Mint `amount` to `to`. Supply-manager only, cooldown-gated, capped
    /// at `total_supply * mint_cap / 1_000_000` of the pre-mint supply.
    pub fn mint(&mut self, ctx: &CallContext, to: Address, amount: Amount) -> TokenResult<()> {
        self.require_supply_manager(ctx)?;
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.require_unlocked(ctx.now)?;
        let cap = self
            .total_supply
            .checked_mul(self.mint_cap as Amount)
            .ok_or(TokenError::Overflow)?
            / PPM_DENOMINATOR;
        if amount > cap {
            return Err(TokenError::MintCapExceeded { amount, cap });
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let new_balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let next_allowed = ctx
            .now
            .checked_add(self.supply_change_waiting_period)
            .ok_or(TokenError::Overflow)?;

        self.total_supply = new_supply;
        self.balances.insert(to, new_balance);
        self.supply_change_allowed_after = next_allowed;
        self.events.push(TokenEvent::Minted { to, amount });
        debug!(
            token = %self.address,
            amount,
            total_supply = self.total_supply,
            allowed_after = next_allowed,
            "minted supply"
        );
        Ok(())
    }

    /// Burn `amount` from `from`. Supply-manager only, cooldown-gated.
    ///
    /// The supply manager spends an allowance from `from` like any other
    /// spender; the infinite sentinel is left untouched.
    pub fn burn(&mut self, ctx: &CallContext, from: Address, amount: Amount) -> TokenResult<()> {
        self.require_supply_manager(ctx)?;
        if from.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.require_unlocked(ctx.now)?;
        let current = self.allowance(&from, &ctx.caller);
        if current != INFINITE_ALLOWANCE && current < amount {
            return Err(TokenError::AllowanceExceeded {
                have: current,
                need: amount,
            });
        }
        let balance = self.balance_of(&from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: balance,
                need: amount,
            });
        }
        let next_allowed = ctx
            .now
            .checked_add(self.supply_change_waiting_period)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(from, balance - amount);
        self.total_supply -= amount;
        if current != INFINITE_ALLOWANCE {
            let remaining = current - amount;
            self.set_allowance(from, ctx.caller, remaining);
            self.events.push(TokenEvent::Approval {
                owner: from,
                spender: ctx.caller,
                amount: remaining,
            });
        }
        self.supply_change_allowed_after = next_allowed;
        self.events.push(TokenEvent::Burned { from, amount });
        debug!(
            token = %self.address,
            amount,
            total_supply = self.total_supply,
            allowed_after = next_allowed,
            "burned supply"
        );
        Ok(())
    }

    // =========================================================================
    // Capability and configuration changes
    // =========================================================================

    /// Reassign the supply-manager capability. Current holder only.
    pub fn set_supply_manager(&mut self, ctx: &CallContext, new: Address) -> TokenResult<()> {
        self.require_supply_manager(ctx)?;
        let old = self.supply_manager;
        self.supply_manager = new;
        self.events
            .push(TokenEvent::SupplyManagerChanged { old, new });
        Ok(())
    }

    /// Reassign the metadata-manager capability. Current holder only.
    pub fn set_metadata_manager(&mut self, ctx: &CallContext, new: Address) -> TokenResult<()> {
        self.require_metadata_manager(ctx)?;
        let old = self.metadata_manager;
        self.metadata_manager = new;
        self.events
            .push(TokenEvent::MetadataManagerChanged { old, new });
        Ok(())
    }

    /// Reconfigure the per-mint cap. Supply-manager only.
    pub fn set_mint_cap(&mut self, ctx: &CallContext, value: Ppm) -> TokenResult<()> {
        self.require_supply_manager(ctx)?;
        let old = self.mint_cap;
        self.mint_cap = value;
        self.events
            .push(TokenEvent::MintCapChanged { old, new: value });
        Ok(())
    }

    /// Reconfigure the supply-change cooldown. Supply-manager only; the
    /// protocol floor is inclusive.
    pub fn set_supply_change_waiting_period(
        &mut self,
        ctx: &CallContext,
        value: Timestamp,
    ) -> TokenResult<()> {
        self.require_supply_manager(ctx)?;
        if value < SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM {
            return Err(TokenError::WaitingPeriodBelowMinimum {
                requested: value,
                minimum: SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM,
            });
        }
        let old = self.supply_change_waiting_period;
        self.supply_change_waiting_period = value;
        self.events
            .push(TokenEvent::SupplyChangeWaitingPeriodChanged { old, new: value });
        Ok(())
    }

    /// Change the display name and symbol. Metadata-manager only.
    ///
    /// Signing digests derive from the current name, so authorizations
    /// signed under the previous name stop verifying here.
    pub fn update_token_metadata(
        &mut self,
        ctx: &CallContext,
        name: String,
        symbol: String,
    ) -> TokenResult<()> {
        self.require_metadata_manager(ctx)?;
        self.name = name.clone();
        self.symbol = symbol.clone();
        self.events.push(TokenEvent::MetadataUpdated { name, symbol });
        Ok(())
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn require_supply_manager(&self, ctx: &CallContext) -> TokenResult<()> {
        if ctx.caller != self.supply_manager {
            return Err(TokenError::NotSupplyManager { caller: ctx.caller });
        }
        Ok(())
    }

    fn require_metadata_manager(&self, ctx: &CallContext) -> TokenResult<()> {
        if ctx.caller != self.metadata_manager {
            return Err(TokenError::NotMetadataManager { caller: ctx.caller });
        }
        Ok(())
    }

    fn require_unlocked(&self, now: Timestamp) -> TokenResult<()> {
        if now < self.supply_change_allowed_after {
            return Err(TokenError::SupplyChangeLocked {
                allowed_after: self.supply_change_allowed_after,
                now,
            });
        }
        Ok(())
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);
    }

    /// Move a balance with full validation, no allowance involved.
    fn move_balance(&mut self, from: Address, to: Address, amount: Amount) -> TokenResult<()> {
        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }
        let to_balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.balances.insert(from, from_balance - amount);
        self.balances.insert(to, to_balance);
        Ok(())
    }

    /// Shared tail of the with-authorization transfers: window check,
    /// nonce consumption, signer check, balance move.
    #[allow(clippy::too_many_arguments)]
    fn consume_authorization(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        value: Amount,
        valid_after: Timestamp,
        valid_before: Timestamp,
        nonce: [u8; 32],
        digest: &[u8; 32],
        proof: &SignatureProof,
    ) -> TokenResult<()> {
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        if ctx.now <= valid_after {
            return Err(TokenError::AuthorizationNotYetValid {
                valid_after,
                now: ctx.now,
            });
        }
        if ctx.now >= valid_before {
            return Err(TokenError::AuthorizationExpired {
                valid_before,
                now: ctx.now,
            });
        }
        if self.authorization_used(&from, &nonce) {
            return Err(TokenError::AuthorizationReused);
        }
        let signer = recover_signer(digest, proof).map_err(|_| TokenError::SignerMismatch)?;
        if signer != from {
            return Err(TokenError::SignerMismatch);
        }
        self.move_balance(from, to, value)?;
        self.used_authorizations.entry(from).or_default().insert(nonce);
        self.events
            .push(TokenEvent::AuthorizationUsed { authorizer: from, nonce });
        self.events.push(TokenEvent::Transfer {
            from,
            to,
            amount: value,
        });
        Ok(())
    }
}
