//! Token Contract Constants

use lib_types::{Amount, Timestamp};

/// Protocol floor for the supply-change waiting period (one day).
///
/// A token may never be configured with a shorter cooldown between
/// supply changes.
pub const SUPPLY_CHANGE_WAITING_PERIOD_MINIMUM: Timestamp = 86_400;

/// Sentinel allowance denoting infinite approval.
///
/// An allowance equal to this value is never decremented by spending.
pub const INFINITE_ALLOWANCE: Amount = Amount::MAX;

/// Version string bound into every signing domain separator
pub const DOMAIN_VERSION: &str = "1";

/// Domain tag for the signing domain separator
pub const DOMAIN_SEPARATOR_TAG: &[u8] = b"BANKROLL_DOMAIN_V1";

/// Domain tag for permit digests
pub const PERMIT_TAG: &[u8] = b"BANKROLL_PERMIT_V1";

/// Domain tag for transfer-with-authorization digests
pub const TRANSFER_AUTHORIZATION_TAG: &[u8] = b"BANKROLL_TRANSFER_AUTH_V1";

/// Domain tag for receive-with-authorization digests
pub const RECEIVE_AUTHORIZATION_TAG: &[u8] = b"BANKROLL_RECEIVE_AUTH_V1";
