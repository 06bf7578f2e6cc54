//! Signature types and verification
//!
//! Off-chain authorizations (permits, authorized transfers) are ed25519
//! signatures over a 32-byte digest. A proof carries the claimed signer's
//! verifying key alongside the signature; verification either yields the
//! address derived from that key or fails. Callers compare the yielded
//! address against the claimed owner; a mismatch is a forgery, not a
//! malformed input.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;

use lib_types::Address;

use crate::hashing::hash_blake3_prefixed;

/// Domain tag for deriving an address from a verifying key
const ADDRESS_DOMAIN_TAG: &[u8] = b"BANKROLL_ADDR_V1";

/// Error during signature verification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("malformed verifying key")]
    MalformedKey,

    #[error("signature verification failed")]
    SignatureInvalid,
}

/// 64-byte signature wrapper for serde compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature64(pub [u8; 64]);

impl Signature64 {
    /// Create a new signature from bytes
    pub fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the inner bytes
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl serde::Serialize for Signature64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Signature64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: Vec<u8> = serde::Deserialize::deserialize(deserializer)?;
        if bytes.len() != 64 {
            return Err(serde::de::Error::custom(format!(
                "Expected 64 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Signature64(arr))
    }
}

/// A signed authorization: the signature plus the signer's verifying key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignatureProof {
    /// ed25519 verifying key of the claimed signer
    pub public_key: [u8; 32],
    /// Signature over the 32-byte digest
    pub signature: Signature64,
}

/// Derive the core address for an ed25519 verifying key.
pub fn address_from_public_key(public_key: &[u8; 32]) -> Address {
    Address::new(hash_blake3_prefixed(ADDRESS_DOMAIN_TAG, &[public_key]))
}

/// Verify `proof` over `digest` and return the signer's derived address.
///
/// A valid proof yields the address of the key that actually signed; it is
/// the caller's job to compare it against the claimed owner.
pub fn recover_signer(digest: &[u8; 32], proof: &SignatureProof) -> Result<Address, CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(&proof.public_key).map_err(|_| CryptoError::MalformedKey)?;
    let signature = Signature::from_bytes(proof.signature.as_bytes());
    verifying_key
        .verify(digest, &signature)
        .map_err(|_| CryptoError::SignatureInvalid)?;
    Ok(address_from_public_key(&proof.public_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::KeyPair;

    #[test]
    fn test_recover_signer_roundtrip() {
        let keypair = KeyPair::from_seed([7u8; 32]);
        let digest = crate::hashing::hash_blake3(b"authorize 100 units");
        let proof = keypair.sign_digest(&digest);

        let recovered = recover_signer(&digest, &proof).unwrap();
        assert_eq!(recovered, keypair.address());
    }

    #[test]
    fn test_recover_rejects_tampered_digest() {
        let keypair = KeyPair::from_seed([7u8; 32]);
        let digest = crate::hashing::hash_blake3(b"authorize 100 units");
        let proof = keypair.sign_digest(&digest);

        let other = crate::hashing::hash_blake3(b"authorize 101 units");
        assert_eq!(
            recover_signer(&other, &proof),
            Err(CryptoError::SignatureInvalid)
        );
    }

    #[test]
    fn test_recover_yields_actual_signer_not_claimed_owner() {
        let signer = KeyPair::from_seed([1u8; 32]);
        let other = KeyPair::from_seed([2u8; 32]);
        let digest = crate::hashing::hash_blake3(b"payload");
        let proof = signer.sign_digest(&digest);

        let recovered = recover_signer(&digest, &proof).unwrap();
        assert_ne!(recovered, other.address());
    }

    #[test]
    fn test_signature64_serde_roundtrip() {
        let sig = Signature64::new([9u8; 64]);
        let serialized = bincode::serialize(&sig).unwrap();
        let deserialized: Signature64 = bincode::deserialize(&serialized).unwrap();
        assert_eq!(sig, deserialized);
    }
}
