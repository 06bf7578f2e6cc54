//! Token Contract Errors

use lib_types::{Address, Amount, Timestamp};
use thiserror::Error;

/// Error during token operations
///
/// Every precondition is validated before any state mutation; a returned
/// error means no partial effects persist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("caller {caller} is not the supply manager")]
    NotSupplyManager { caller: Address },

    #[error("caller {caller} is not the metadata manager")]
    NotMetadataManager { caller: Address },

    #[error("caller {caller} is not the authorization payee")]
    CallerNotPayee { caller: Address },

    #[error("zero address not allowed")]
    ZeroAddress,

    #[error("supply change locked until {allowed_after}, now {now}")]
    SupplyChangeLocked {
        allowed_after: Timestamp,
        now: Timestamp,
    },

    #[error("signature expired at {deadline}, now {now}")]
    SignatureExpired { deadline: Timestamp, now: Timestamp },

    #[error("authorization not valid until {valid_after}, now {now}")]
    AuthorizationNotYetValid {
        valid_after: Timestamp,
        now: Timestamp,
    },

    #[error("authorization expired at {valid_before}, now {now}")]
    AuthorizationExpired {
        valid_before: Timestamp,
        now: Timestamp,
    },

    #[error("authorization nonce already used")]
    AuthorizationReused,

    #[error("signature does not recover to the claimed signer")]
    SignerMismatch,

    #[error("mint amount {amount} exceeds cap {cap}")]
    MintCapExceeded { amount: Amount, cap: Amount },

    #[error("waiting period {requested} below protocol minimum {minimum}")]
    WaitingPeriodBelowMinimum {
        requested: Timestamp,
        minimum: Timestamp,
    },

    #[error("amount {need} exceeds allowance {have}")]
    AllowanceExceeded { have: Amount, need: Amount },

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("arithmetic overflow")]
    Overflow,
}

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;
