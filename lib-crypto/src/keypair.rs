//! Ed25519 keypairs
//!
//! Keys exist at the edges of the core: participants hold them to sign
//! permits and authorized transfers; the core itself only ever sees
//! verifying keys and 32-byte digests. Addresses are derived by hashing
//! the verifying key, so an address commits to exactly one key.

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use std::fmt;

use lib_types::Address;

use crate::signature::{address_from_public_key, Signature64, SignatureProof};

/// An ed25519 signing key with its derived core address.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new keypair from the system entropy source
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Deterministic keypair from a 32-byte seed.
    ///
    /// Intended for tests and reproducible fixtures; production keys come
    /// from [`KeyPair::generate`].
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// The ed25519 verifying key bytes
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The core address derived from the verifying key
    pub fn address(&self) -> Address {
        address_from_public_key(&self.public_key())
    }

    /// Sign a 32-byte digest, producing a self-contained proof
    pub fn sign_digest(&self, digest: &[u8; 32]) -> SignatureProof {
        let signature = self.signing_key.sign(digest);
        SignatureProof {
            public_key: self.public_key(),
            signature: Signature64::new(signature.to_bytes()),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never expose the signing key
        write!(f, "KeyPair({})", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_seed_is_deterministic() {
        let a = KeyPair::from_seed([42u8; 32]);
        let b = KeyPair::from_seed([42u8; 32]);
        assert_eq!(a.address(), b.address());
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_distinct_seeds_distinct_addresses() {
        let a = KeyPair::from_seed([1u8; 32]);
        let b = KeyPair::from_seed([2u8; 32]);
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_generate_produces_nonzero_address() {
        let keypair = KeyPair::generate();
        assert!(!keypair.address().is_zero());
    }

    #[test]
    fn test_debug_does_not_leak_key_material() {
        let keypair = KeyPair::from_seed([3u8; 32]);
        let rendered = format!("{:?}", keypair);
        assert!(!rendered.contains(&hex::encode([3u8; 32])));
    }
}
