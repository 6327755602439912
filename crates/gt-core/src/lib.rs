//! gt-core: shared foundation for the geartrain crates.
//!
//! Gear handles, the `Real` scalar with tolerance-aware comparison, scalar
//! input checks, and `uom` aliases for the rotational quantities reported
//! by the CLI.

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{GtError, GtResult};
pub use ids::GearId;
pub use numeric::*;
pub use units::*;
