//! Network-specific error types.

use gt_core::GearId;
use thiserror::Error;

use crate::network::Relation;
use crate::validate::Violation;

/// Result type for gear network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors raised by gear construction, relation changes and state queries.
///
/// Every rejected mutation leaves the network untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Tooth count must be a positive whole number.
    #[error("Teeth number must be a positive whole number (n>0), got {teeth}")]
    InvalidTeeth { teeth: i64 },

    /// Radius must be strictly positive.
    #[error("Radius must be a positive number, got {radius}")]
    InvalidRadius { radius: f64 },

    /// Handle was not issued by this network.
    #[error("Gear {gear} does not belong to this network")]
    UnknownGear { gear: GearId },

    /// A gear cannot be related to itself.
    #[error("Gear {gear} cannot be in a {relation} relation with itself")]
    SelfRelation { gear: GearId, relation: Relation },

    /// Meshing was requested between gears on the same axis.
    #[error("Gears {a} and {b} share an axis and cannot be meshed")]
    SharesAxis { a: GearId, b: GearId },

    /// An axial link was requested between gears that are meshed.
    #[error("Gears {a} and {b} are meshed and cannot share an axis")]
    AlreadyMeshed { a: GearId, b: GearId },

    /// Period is undefined for a gear that is not turning.
    #[error("Period is undefined at zero frequency")]
    ZeroFrequency,

    /// Forces can only be evaluated at a positive radial distance.
    #[error("Radial distance must be positive, got {distance}")]
    NonPositiveDistance { distance: f64 },

    /// The network no longer satisfies its gear ratio rules.
    #[error("Invariant violated: {0}")]
    Invariant(Violation),
}
