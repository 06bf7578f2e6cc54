//! Canonical Primitive Types for the Bankroll Core
//!
//! Rule: No String identifiers in core state. Ever.
//!
//! These types are the foundational building blocks for all admission- and
//! supply-critical data structures. They are designed to be:
//! - Fixed-size (no dynamic allocation)
//! - Deterministically serializable
//! - Efficient to copy and compare

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Token amounts (supports up to ~340 undecillion units)
pub type Amount = u128;

/// Wall-clock seconds since the UNIX epoch, as supplied by the host clock
pub type Timestamp = u64;

/// Parts-per-million for cap calculations (1_000_000 = 100%)
pub type Ppm = u32;

/// Basis points for percentage calculations (10_000 = 100%)
pub type Bps = u16;

/// Maximum basis points (100%)
pub const MAX_BPS: Bps = 10_000;

/// Parts-per-million denominator (100%)
pub const PPM_DENOMINATOR: Amount = 1_000_000;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// 32-byte address (derived from a public key)
///
/// The all-zero value is the null sentinel; operations that forbid the null
/// address reject it explicitly.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Create a new Address from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a zeroed Address (the null sentinel)
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// ASSET TYPES
// ============================================================================

/// 32-byte asset identifier
///
/// A bankroll token is provisioned per (dispatcher, asset) pair. The
/// all-zero id denotes the native base asset.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    /// Native base asset (all zeros)
    pub const NATIVE: Self = Self([0u8; 32]);

    /// Create a new AssetId from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the native asset
    pub fn is_native(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "AssetId(NATIVE)")
        } else {
            write!(f, "AssetId({})", hex::encode(&self.0[..8]))
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "NATIVE")
        } else {
            write!(f, "{}", hex::encode(self.0))
        }
    }
}

impl From<[u8; 32]> for AssetId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AssetId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_basics() {
        let addr = Address::new([3u8; 32]);
        assert!(!addr.is_zero());
        assert_eq!(addr.as_bytes(), &[3u8; 32]);

        let zero = Address::zero();
        assert!(zero.is_zero());
    }

    #[test]
    fn test_asset_id_native() {
        let native = AssetId::NATIVE;
        assert!(native.is_native());
        assert_eq!(format!("{}", native), "NATIVE");

        let custom = AssetId::new([1u8; 32]);
        assert!(!custom.is_native());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let addr = Address::new([42u8; 32]);
        let serialized = bincode::serialize(&addr).unwrap();
        let deserialized: Address = bincode::deserialize(&serialized).unwrap();
        assert_eq!(addr, deserialized);

        let asset = AssetId::new([7u8; 32]);
        let serialized = bincode::serialize(&asset).unwrap();
        let deserialized: AssetId = bincode::deserialize(&serialized).unwrap();
        assert_eq!(asset, deserialized);
    }

    #[test]
    fn test_from_array() {
        let bytes = [5u8; 32];
        let addr: Address = bytes.into();
        assert_eq!(addr.0, bytes);

        let asset: AssetId = bytes.into();
        assert_eq!(asset.0, bytes);
    }
}
