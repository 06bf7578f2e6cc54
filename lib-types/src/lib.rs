//! Bankroll core primitives.
//! Stable, protocol-neutral, behavior-free.
//!
//! Rule: No String identifiers in core state. Ever.

pub mod context;
pub mod primitives;

pub use context::CallContext;
pub use primitives::{
    Address, Amount, AssetId, Bps, Ppm, Timestamp, MAX_BPS, PPM_DENOMINATOR,
};
