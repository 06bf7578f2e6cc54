//! Admission gateway integration tests
//!
//! Exercises the full lifecycle across crates: admission, token
//! operations under the provisioned supply manager, signed approvals,
//! and migration to a successor gateway.

use std::collections::{HashMap, HashSet};

use lib_admission::{
    AdmissionError, AdmissionEvent, Bouncer, BouncerConfig, DispatcherRegistry, TokenDefaults,
    VotingPowerOracle,
};
use lib_crypto::KeyPair;
use lib_tokens::{SupplyChangeGate, TokenError};
use lib_types::{Address, Amount, AssetId, CallContext, PPM_DENOMINATOR};

const T0: u64 = 1_700_000_000;
const DAY: u64 = 86_400;

struct StaticRegistry {
    registered: HashSet<Address>,
}

impl DispatcherRegistry for StaticRegistry {
    fn is_registered(&self, dispatcher: &Address) -> bool {
        self.registered.contains(dispatcher)
    }
}

struct StaticOracle {
    power: HashMap<Address, Amount>,
}

impl VotingPowerOracle for StaticOracle {
    fn voting_power(&self, account: &Address) -> Amount {
        self.power.get(account).copied().unwrap_or(0)
    }
}

fn admin() -> Address {
    Address::new([0xADu8; 32])
}

fn dispatcher() -> Address {
    Address::new([0xD1u8; 32])
}

fn make_config() -> BouncerConfig {
    BouncerConfig {
        global_max_contribution_bps: 2_000,
        dispatcher_max_contribution_bps: 500,
        required_voting_power: 1_000,
        admin: admin(),
        role_admin: admin(),
        chain_id: 7,
        token_defaults: TokenDefaults {
            mint_cap: 20_000, // 2%
            supply_change_waiting_period: DAY,
            initial_supply: 10_000_000,
            decimals: 18,
        },
    }
}

fn make_world() -> (Bouncer, StaticRegistry, StaticOracle) {
    let bouncer = Bouncer::new(Address::new([0xB0u8; 32]), make_config()).unwrap();
    let registry = StaticRegistry {
        registered: [dispatcher()].into_iter().collect(),
    };
    let oracle = StaticOracle {
        power: [(dispatcher(), 50_000)].into_iter().collect(),
    };
    (bouncer, registry, oracle)
}

fn ctx(caller: Address, now: u64) -> CallContext {
    CallContext::new(caller, now)
}

#[test]
fn test_full_admission_lifecycle() {
    let (mut bouncer, registry, oracle) = make_world();
    let gateway = bouncer.address();

    // --- admission ---
    let token_address = bouncer
        .join(&ctx(dispatcher(), T0), dispatcher(), &registry, &oracle)
        .unwrap();
    let events = bouncer.take_events();
    assert_eq!(
        events,
        vec![AdmissionEvent::BankrollTokenCreated {
            dispatcher: dispatcher(),
            asset: AssetId::NATIVE,
            token: token_address,
        }]
    );

    // re-join: same address, nothing provisioned, nothing emitted
    let again = bouncer
        .join(&ctx(dispatcher(), T0 + 10), dispatcher(), &registry, &oracle)
        .unwrap();
    assert_eq!(again, token_address);
    assert!(bouncer.take_events().is_empty());

    // --- token operations under the dispatcher ---
    let alice_key = KeyPair::from_seed([1u8; 32]);
    let alice = alice_key.address();
    let bob = Address::new([0x0Bu8; 32]);

    {
        let token = bouncer.token_mut(&token_address).unwrap();
        token.take_events();
        token
            .transfer(&ctx(dispatcher(), T0), alice, 1_000)
            .unwrap();
        assert_eq!(token.balance_of(&alice), 1_000);

        // signed approval: alice permits bob
        let deadline = T0 + 3_600;
        let digest = token.permit_digest(&alice, &bob, 400, deadline);
        let proof = alice_key.sign_digest(&digest);
        token
            .permit(&ctx(bob, T0), alice, bob, 400, deadline, &proof)
            .unwrap();
        assert_eq!(token.nonce(&alice), 1);

        token.transfer_from(&ctx(bob, T0), alice, bob, 400).unwrap();
        assert_eq!(token.balance_of(&bob), 400);
        assert!(token.is_consistent());
    }

    // --- supply changes under the gateway's capability ---
    {
        let token = bouncer.token_mut(&token_address).unwrap();

        // locked at creation
        assert_eq!(token.supply_change_gate(T0), SupplyChangeGate::Locked);
        let early = token.mint(&ctx(gateway, T0), alice, 1);
        assert!(matches!(early, Err(TokenError::SupplyChangeLocked { .. })));

        // unlocked after the waiting period; mint exactly at cap
        let now = T0 + DAY;
        let cap = token.total_supply() * token.mint_cap() as Amount / PPM_DENOMINATOR;
        token.mint(&ctx(gateway, now), alice, cap).unwrap();
        assert_eq!(token.supply_change_allowed_after(), now + DAY);

        // gate relocked immediately after a successful supply change
        let relocked = token.mint(&ctx(gateway, now + 1), alice, 1);
        assert!(matches!(
            relocked,
            Err(TokenError::SupplyChangeLocked { .. })
        ));

        // burn once the gate reopens, spending the gateway's allowance
        let later = now + DAY;
        token.approve(&ctx(bob, later), gateway, 100);
        token.burn(&ctx(gateway, later), bob, 100).unwrap();
        assert_eq!(token.balance_of(&bob), 300);
        assert!(token.is_consistent());
    }

    // --- migration ---
    let successor_address = Address::new([0xB1u8; 32]);
    let mut successor = Bouncer::new(successor_address, make_config()).unwrap();

    // only the admin capability may migrate
    let denied = bouncer.migrate(&ctx(dispatcher(), T0 + 3 * DAY), token_address, successor_address);
    assert!(matches!(denied, Err(AdmissionError::NotAdmin { .. })));
    assert_eq!(
        bouncer.token(&token_address).unwrap().supply_manager(),
        bouncer.address()
    );

    let migrated = bouncer
        .migrate(&ctx(admin(), T0 + 3 * DAY), token_address, successor_address)
        .unwrap();
    assert_eq!(migrated.supply_manager(), successor_address);
    successor
        .adopt(dispatcher(), AssetId::NATIVE, migrated)
        .unwrap();

    // the predecessor keeps the mapping readable but holds no instance
    assert_eq!(
        bouncer.bankroll_token(&dispatcher(), &AssetId::NATIVE),
        Some(token_address)
    );
    assert!(bouncer.token(&token_address).is_none());

    // the successor exercises the capability; the predecessor cannot
    {
        let token = successor.token_mut(&token_address).unwrap();
        let now = T0 + 5 * DAY;
        let stale = token.mint(&ctx(gateway, now), alice, 1);
        assert!(matches!(stale, Err(TokenError::NotSupplyManager { .. })));
        token.mint(&ctx(successor_address, now), alice, 1).unwrap();
        assert!(token.is_consistent());
    }
}

#[test]
fn test_rewards_manager_administration() {
    let (mut bouncer, _, _) = make_world();
    let rewards = Address::new([0x77u8; 32]);

    let denied = bouncer.set_rewards_manager(&ctx(dispatcher(), T0), rewards);
    assert!(matches!(denied, Err(AdmissionError::NotAdmin { .. })));

    bouncer.set_rewards_manager(&ctx(admin(), T0), rewards).unwrap();
    assert_eq!(bouncer.rewards_manager(), rewards);
    assert_eq!(
        bouncer.take_events(),
        vec![AdmissionEvent::RewardsManagerChanged {
            old: Address::zero(),
            new: rewards,
        }]
    );
}

#[test]
fn test_eligibility_is_enforced_before_provisioning() {
    let (mut bouncer, registry, _) = make_world();
    let weak_oracle = StaticOracle {
        power: [(dispatcher(), 999)].into_iter().collect(),
    };

    let result = bouncer.join(&ctx(dispatcher(), T0), dispatcher(), &registry, &weak_oracle);
    assert_eq!(
        result,
        Err(AdmissionError::InsufficientVotingPower {
            have: 999,
            required: 1_000,
        })
    );
    assert_eq!(bouncer.bankroll_token(&dispatcher(), &AssetId::NATIVE), None);
    assert!(bouncer.take_events().is_empty());
}
