//! Cryptographic primitives for the bankroll admission core.
//!
//! # Key Types
//!
//! - [`KeyPair`]: ed25519 signing key with a derived core address
//! - [`SignatureProof`]: signature plus the claimed signer's verifying key
//! - [`recover_signer`]: verify a proof over a digest, yielding the
//!   signer's address
//!
//! BLAKE3 is the canonical hash for all commitments (addresses, token
//! addresses, signing digests).

pub mod hashing;
pub mod keypair;
pub mod signature;

pub use hashing::{hash_blake3, hash_blake3_multiple, hash_blake3_prefixed};
pub use keypair::KeyPair;
pub use signature::{
    address_from_public_key, recover_signer, CryptoError, Signature64, SignatureProof,
};
