//! Call Context
//!
//! Every state-mutating operation in the core receives an immutable
//! [`CallContext`]: the authenticated caller identity and the clock
//! snapshot the call is evaluated against. Authorization and timing checks
//! derive exclusively from this context, never from user-supplied
//! parameters, so spending and capability authority cannot be forged by
//! parameter tampering.

use serde::{Deserialize, Serialize};

use crate::primitives::{Address, Timestamp};

/// Immutable per-call execution context.
///
/// The host guarantees:
/// - `caller` has been authenticated before the call is dispatched
/// - `now` is monotonically non-decreasing across calls and is never
///   rewound; precision below one second must not be assumed
///
/// Calls are strictly serialized per entity: all checks are evaluated
/// against the state snapshot visible at call entry, and a rejected call
/// leaves no partial effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Authenticated identity the call executes as
    pub caller: Address,
    /// Clock snapshot for this call, in seconds
    pub now: Timestamp,
}

impl CallContext {
    /// Create a context for `caller` at time `now`
    pub fn new(caller: Address, now: Timestamp) -> Self {
        Self { caller, now }
    }

    /// Derive a context with the same clock but a different caller.
    ///
    /// Used when one core entity invokes another on its own authority
    /// (the gateway calling into a token it manages).
    pub fn reissued_as(&self, caller: Address) -> Self {
        Self { caller, now: self.now }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reissue_keeps_clock() {
        let a = Address::new([1u8; 32]);
        let b = Address::new([2u8; 32]);
        let ctx = CallContext::new(a, 1_700_000_000);
        let re = ctx.reissued_as(b);
        assert_eq!(re.caller, b);
        assert_eq!(re.now, ctx.now);
    }
}
