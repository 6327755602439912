//! gt-network: gear network model and state synchronization for geartrain.
//!
//! Provides:
//! - The [`Gear`] value object (tooth count, radius, frequency, torque)
//! - The [`GearNetwork`] arena with mesh and axial relations
//! - Synchronization that restores gear ratio rules after every mutation
//! - Invariant checking over a whole network
//!
//! # Example
//!
//! ```
//! use gt_network::GearNetwork;
//!
//! let mut net = GearNetwork::new();
//! let a = net.add_gear_with_teeth(30).unwrap();
//! let b = net.add_gear_with_teeth(60).unwrap();
//! net.connect_mesh(a, b).unwrap();
//! net.set_frequency(a, 1.0).unwrap();
//!
//! assert_eq!(net.gear(b).unwrap().frequency(), -0.5);
//! ```

pub mod error;
pub mod gear;
pub mod network;
pub(crate) mod sync;
pub mod validate;

// Re-exports for ergonomics
pub use error::{NetworkError, NetworkResult};
pub use gear::Gear;
pub use gt_core::GearId;
pub use network::{GearNetwork, GearNode, Relation};
pub use sync::SyncReport;
pub use validate::Violation;
