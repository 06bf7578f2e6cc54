//! Signing Digests
//!
//! Canonical digest derivation for off-chain authorizations. All digests
//! are BLAKE3 over a domain tag plus length-prefixed fields, making the
//! encoding injective across field boundaries.
//!
//! The domain separator binds a signature to one token deployment: its
//! current display name, a fixed version string, the executing chain id
//! and the token's own address. It is derived from the *current* name on
//! every call, never cached, so signers always commit to the metadata in
//! force at verification time.

use lib_crypto::hash_blake3_prefixed;
use lib_types::{Address, Amount, Timestamp};

use crate::constants::{
    DOMAIN_SEPARATOR_TAG, DOMAIN_VERSION, PERMIT_TAG, RECEIVE_AUTHORIZATION_TAG,
    TRANSFER_AUTHORIZATION_TAG,
};

/// Derive the signing domain separator for one token deployment.
pub fn domain_separator(name: &str, chain_id: u64, token: &Address) -> [u8; 32] {
    hash_blake3_prefixed(
        DOMAIN_SEPARATOR_TAG,
        &[
            name.as_bytes(),
            DOMAIN_VERSION.as_bytes(),
            &chain_id.to_le_bytes(),
            token.as_bytes(),
        ],
    )
}

/// Digest signed by a token holder to authorize a permit.
///
/// Binds (owner, spender, value, the owner's next nonce, deadline) under
/// the token's domain separator.
pub fn permit_digest(
    domain: &[u8; 32],
    owner: &Address,
    spender: &Address,
    value: Amount,
    nonce: u64,
    deadline: Timestamp,
) -> [u8; 32] {
    hash_blake3_prefixed(
        PERMIT_TAG,
        &[
            domain,
            owner.as_bytes(),
            spender.as_bytes(),
            &value.to_le_bytes(),
            &nonce.to_le_bytes(),
            &deadline.to_le_bytes(),
        ],
    )
}

/// Digest signed by a holder to authorize a direct transfer within a
/// validity window.
pub fn transfer_authorization_digest(
    domain: &[u8; 32],
    from: &Address,
    to: &Address,
    value: Amount,
    valid_after: Timestamp,
    valid_before: Timestamp,
    nonce: &[u8; 32],
) -> [u8; 32] {
    authorization_digest(
        TRANSFER_AUTHORIZATION_TAG,
        domain,
        from,
        to,
        value,
        valid_after,
        valid_before,
        nonce,
    )
}

/// Digest signed by a holder to authorize a payee-submitted transfer
/// within a validity window.
pub fn receive_authorization_digest(
    domain: &[u8; 32],
    from: &Address,
    to: &Address,
    value: Amount,
    valid_after: Timestamp,
    valid_before: Timestamp,
    nonce: &[u8; 32],
) -> [u8; 32] {
    authorization_digest(
        RECEIVE_AUTHORIZATION_TAG,
        domain,
        from,
        to,
        value,
        valid_after,
        valid_before,
        nonce,
    )
}

#[allow(clippy::too_many_arguments)]
fn authorization_digest(
    tag: &[u8],
    domain: &[u8; 32],
    from: &Address,
    to: &Address,
    value: Amount,
    valid_after: Timestamp,
    valid_before: Timestamp,
    nonce: &[u8; 32],
) -> [u8; 32] {
    hash_blake3_prefixed(
        tag,
        &[
            domain,
            from.as_bytes(),
            to.as_bytes(),
            &value.to_le_bytes(),
            &valid_after.to_le_bytes(),
            &valid_before.to_le_bytes(),
            nonce,
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_binds_name() {
        let token = Address::new([9u8; 32]);
        let a = domain_separator("Bankroll A", 1, &token);
        let b = domain_separator("Bankroll B", 1, &token);
        assert_ne!(a, b);
    }

    #[test]
    fn test_domain_binds_chain_and_address() {
        let token = Address::new([9u8; 32]);
        let other = Address::new([8u8; 32]);
        assert_ne!(
            domain_separator("Bankroll", 1, &token),
            domain_separator("Bankroll", 2, &token)
        );
        assert_ne!(
            domain_separator("Bankroll", 1, &token),
            domain_separator("Bankroll", 1, &other)
        );
    }

    #[test]
    fn test_permit_digest_binds_nonce() {
        let domain = [1u8; 32];
        let owner = Address::new([2u8; 32]);
        let spender = Address::new([3u8; 32]);
        let a = permit_digest(&domain, &owner, &spender, 100, 0, 1_000);
        let b = permit_digest(&domain, &owner, &spender, 100, 1, 1_000);
        assert_ne!(a, b);
    }

    #[test]
    fn test_transfer_and_receive_digests_differ() {
        let domain = [1u8; 32];
        let from = Address::new([2u8; 32]);
        let to = Address::new([3u8; 32]);
        let nonce = [4u8; 32];
        let a = transfer_authorization_digest(&domain, &from, &to, 5, 0, 10, &nonce);
        let b = receive_authorization_digest(&domain, &from, &to, 5, 0, 10, &nonce);
        assert_ne!(a, b);
    }
}
