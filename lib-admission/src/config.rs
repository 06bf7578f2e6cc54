//! Gateway Configuration
//!
//! All configuration is supplied at construction and immutable
//! thereafter. [`BouncerConfig::validate`] runs once, before the gateway
//! accepts its first call.

use serde::{Deserialize, Serialize};

use lib_types::{Address, Amount, Bps, Ppm, Timestamp, MAX_BPS};

use lib_tokens::SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM;

use crate::errors::{AdmissionError, AdmissionResult};

/// Provisioning defaults applied to every bankroll token the gateway
/// deploys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDefaults {
    /// Per-mint cap in parts-per-million of the pre-mint supply
    pub mint_cap: Ppm,
    /// Cooldown between supply changes, seconds
    pub supply_change_waiting_period: Timestamp,
    /// Supply credited to the dispatcher at provisioning
    pub initial_supply: Amount,
    /// Display decimals
    pub decimals: u8,
}

/// Immutable gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BouncerConfig {
    /// Ceiling on total pooled contribution, basis points
    pub global_max_contribution_bps: Bps,
    /// Ceiling on any single dispatcher's contribution, basis points
    pub dispatcher_max_contribution_bps: Bps,
    /// Minimum governance weight required for admission
    pub required_voting_power: Amount,
    /// Holder of the gateway admin capability (gates migrate and
    /// rewards-manager changes, never join)
    pub admin: Address,
    /// Role administrator; becomes metadata manager of provisioned tokens
    pub role_admin: Address,
    /// Executing chain identifier bound into token signing digests
    pub chain_id: u64,
    /// Token provisioning defaults
    pub token_defaults: TokenDefaults,
}

impl BouncerConfig {
    /// Validate internal consistency.
    ///
    /// Percentage ceilings must nest (`dispatcher <= global <= 100%`),
    /// both role addresses must be non-zero and the token cooldown must
    /// be at or above the protocol floor.
    pub fn validate(&self) -> AdmissionResult<()> {
        if self.admin.is_zero() || self.role_admin.is_zero() {
            return Err(AdmissionError::ZeroAddress);
        }
        if self.global_max_contribution_bps > MAX_BPS {
            return Err(AdmissionError::InvalidConfig(format!(
                "global contribution ceiling {} exceeds {} bps",
                self.global_max_contribution_bps, MAX_BPS
            )));
        }
        if self.dispatcher_max_contribution_bps > self.global_max_contribution_bps {
            return Err(AdmissionError::InvalidConfig(format!(
                "dispatcher ceiling {} exceeds global ceiling {}",
                self.dispatcher_max_contribution_bps, self.global_max_contribution_bps
            )));
        }
        if self.token_defaults.supply_change_waiting_period < SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM
        {
            return Err(AdmissionError::InvalidConfig(format!(
                "token waiting period {} below protocol minimum {}",
                self.token_defaults.supply_change_waiting_period,
                SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> BouncerConfig {
        BouncerConfig {
            global_max_contribution_bps: 2_000,
            dispatcher_max_contribution_bps: 500,
            required_voting_power: 1_000,
            admin: Address::new([1u8; 32]),
            role_admin: Address::new([2u8; 32]),
            chain_id: 1,
            token_defaults: TokenDefaults {
                mint_cap: 20_000,
                supply_change_waiting_period: SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM,
                initial_supply: 1_000_000,
                decimals: 18,
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_zero_admin_rejected() {
        let mut config = valid_config();
        config.admin = Address::zero();
        assert_eq!(config.validate(), Err(AdmissionError::ZeroAddress));
    }

    #[test]
    fn test_dispatcher_ceiling_must_nest() {
        let mut config = valid_config();
        config.dispatcher_max_contribution_bps = 3_000;
        assert!(matches!(
            config.validate(),
            Err(AdmissionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_global_ceiling_bounded() {
        let mut config = valid_config();
        config.global_max_contribution_bps = MAX_BPS + 1;
        config.dispatcher_max_contribution_bps = MAX_BPS + 1;
        assert!(matches!(
            config.validate(),
            Err(AdmissionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_short_token_cooldown_rejected() {
        let mut config = valid_config();
        config.token_defaults.supply_change_waiting_period =
            SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM - 1;
        assert!(matches!(
            config.validate(),
            Err(AdmissionError::InvalidConfig(_))
        ));
    }
}
