//! Hashing helpers
//!
//! BLAKE3 is the canonical hash function for all core commitments:
//! address derivation, token address derivation, and signing digests.
//! Using an alternate hash for any of these produces mismatched
//! commitments between signers and verifiers.

/// Blake3 hash of a single buffer
pub fn hash_blake3(data: &[u8]) -> [u8; 32] {
    blake3::hash(data).into()
}

/// Hash multiple data segments as one continuous stream
pub fn hash_blake3_multiple(data_segments: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for segment in data_segments {
        hasher.update(segment);
    }
    hasher.finalize().into()
}

/// Hash length-prefixed segments.
///
/// Each segment is prefixed with its little-endian u16 length, making the
/// encoding injective across segment boundaries (no two distinct segment
/// lists hash alike by concatenation).
pub fn hash_blake3_prefixed(domain_tag: &[u8], data_segments: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(domain_tag);
    for segment in data_segments {
        hasher.update(&(segment.len() as u16).to_le_bytes());
        hasher.update(segment);
    }
    hasher.finalize().into()
}
