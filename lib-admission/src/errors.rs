//! Admission Gateway Errors

use lib_types::{Address, Amount};
use thiserror::Error;

use lib_tokens::TokenError;

/// Error during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("caller {caller} does not hold the gateway admin capability")]
    NotAdmin { caller: Address },

    #[error("zero address not allowed")]
    ZeroAddress,

    #[error("dispatcher {dispatcher} is not registered")]
    UnknownDispatcher { dispatcher: Address },

    #[error("voting power {have} below required {required}")]
    InsufficientVotingPower { have: Amount, required: Amount },

    #[error("no bankroll token held at {token}")]
    TokenNotFound { token: Address },

    #[error("token {token} is not supply-managed by this gateway")]
    ForeignToken { token: Address },

    #[error("dispatcher {dispatcher} already admitted with a different token")]
    AlreadyAdmitted { dispatcher: Address },

    #[error("invalid gateway configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Result type for gateway operations
pub type AdmissionResult<T> = Result<T, AdmissionError>;
