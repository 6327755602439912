//! Gear network arena: gear storage, relation sets and mutation entry points.

use core::fmt;
use std::collections::BTreeSet;

use gt_core::{GearId, Real};

use crate::error::{NetworkError, NetworkResult};
use crate::gear::Gear;
use crate::sync::{self, SyncReport};

/// Kind of relation between two gears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Teeth engaged: direction reverses, speed and torque scale by tooth ratio.
    Mesh,
    /// Rigidly sharing a rotation axis: identical frequency and torque.
    Axial,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Mesh => write!(f, "mesh"),
            Relation::Axial => write!(f, "axial"),
        }
    }
}

/// A gear plus its direct relations inside the network.
///
/// Relation sets hold handles, sorted for deterministic traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct GearNode {
    pub(crate) gear: Gear,
    pub(crate) meshed: BTreeSet<GearId>,
    pub(crate) coaxial: BTreeSet<GearId>,
}

impl GearNode {
    fn new(gear: Gear) -> Self {
        Self {
            gear,
            meshed: BTreeSet::new(),
            coaxial: BTreeSet::new(),
        }
    }

    pub fn gear(&self) -> &Gear {
        &self.gear
    }

    /// Gears whose teeth engage this one.
    pub fn meshed(&self) -> &BTreeSet<GearId> {
        &self.meshed
    }

    /// Gears directly linked onto this gear's axis.
    pub fn coaxial(&self) -> &BTreeSet<GearId> {
        &self.coaxial
    }
}

/// The gear network: owns every gear and every relation.
///
/// Gears are addressed by [`GearId`] handles issued by [`GearNetwork::add`].
/// The network only grows; gears and relations are never removed.
///
/// Every state or relation mutation re-synchronizes the affected part of
/// the network before returning, so after each call:
/// - gears on a common axis share frequency and torque
/// - meshed gears have equal and opposite tooth speed, and torques scaled
///   by the tooth ratio with reversed sign
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GearNetwork {
    pub(crate) nodes: Vec<GearNode>,
}

impl GearNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of gears in the network.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Take ownership of a gear and return its handle.
    pub fn add(&mut self, gear: Gear) -> GearId {
        let id = GearId::from_index(self.nodes.len() as u32);
        tracing::debug!(gear = %id, teeth = gear.teeth(), radius = gear.radius(), "gear added");
        self.nodes.push(GearNode::new(gear));
        id
    }

    /// Construct a gear and add it.
    pub fn add_gear(&mut self, teeth: i64, radius: Real) -> NetworkResult<GearId> {
        Ok(self.add(Gear::new(teeth, radius)?))
    }

    /// Construct a gear whose radius equals its tooth count and add it.
    pub fn add_gear_with_teeth(&mut self, teeth: i64) -> NetworkResult<GearId> {
        Ok(self.add(Gear::with_teeth(teeth)?))
    }

    /// Iterate over all handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = GearId> + '_ {
        (0..self.nodes.len()).map(|i| GearId::from_index(i as u32))
    }

    /// Iterate over all gears with their handles.
    pub fn gears(&self) -> impl Iterator<Item = (GearId, &Gear)> + '_ {
        self.ids().zip(self.nodes.iter().map(|node| &node.gear))
    }

    pub fn node(&self, id: GearId) -> NetworkResult<&GearNode> {
        self.nodes
            .get(id.slot())
            .ok_or(NetworkError::UnknownGear { gear: id })
    }

    pub fn gear(&self, id: GearId) -> NetworkResult<&Gear> {
        Ok(&self.node(id)?.gear)
    }

    fn node_mut(&mut self, id: GearId) -> NetworkResult<&mut GearNode> {
        self.nodes
            .get_mut(id.slot())
            .ok_or(NetworkError::UnknownGear { gear: id })
    }

    // ---- State mutation ----

    /// Spin `id` at frequency `f`, keeping its torque, then re-synchronize.
    pub fn set_frequency(&mut self, id: GearId, f: Real) -> NetworkResult<SyncReport> {
        self.node_mut(id)?.gear.frequency = f;
        tracing::debug!(gear = %id, frequency = f, "frequency set");
        Ok(self.synchronize(id))
    }

    /// Apply torque `t` to `id`, keeping its frequency, then re-synchronize.
    pub fn apply_torque(&mut self, id: GearId, t: Real) -> NetworkResult<SyncReport> {
        self.node_mut(id)?.gear.torque = t;
        tracing::debug!(gear = %id, torque = t, "torque applied");
        Ok(self.synchronize(id))
    }

    /// Set the tooth speed of `id`, i.e. frequency `v / teeth`.
    pub fn set_tooth_speed(&mut self, id: GearId, v: Real) -> NetworkResult<SyncReport> {
        let teeth = self.gear(id)?.teeth() as Real;
        self.set_frequency(id, v / teeth)
    }

    /// Push the edge of `id` with force `f`.
    pub fn apply_edge_force(&mut self, id: GearId, f: Real) -> NetworkResult<SyncReport> {
        let radius = self.gear(id)?.radius();
        self.apply_torque(id, f * radius)
    }

    /// Push `id` with force `f` at radial distance `r` from its axis.
    pub fn apply_force_at_radius(
        &mut self,
        id: GearId,
        f: Real,
        r: Real,
    ) -> NetworkResult<SyncReport> {
        self.apply_torque(id, f * r)
    }

    // ---- Relation mutation ----

    /// Mesh `a` with `b`.
    ///
    /// The gear carrying the larger torque drives the following
    /// synchronization: `b` if `b.torque > a.torque`, otherwise `a`. Ties
    /// therefore go to `a`.
    ///
    /// # Errors
    /// [`NetworkError::SharesAxis`] if the gears are directly on one axis,
    /// [`NetworkError::SelfRelation`] if `a == b`.
    ///
    /// Only direct axial links are checked. Gears joined on an axis through
    /// a third gear can still be meshed; the result breaks the axial group
    /// and is reported by [`GearNetwork::check_invariants`].
    pub fn connect_mesh(&mut self, a: GearId, b: GearId) -> NetworkResult<SyncReport> {
        let torque_a = self.gear(a)?.torque();
        let torque_b = self.gear(b)?.torque();
        if torque_b > torque_a {
            self.connect_mesh_from(b, a)
        } else {
            self.connect_mesh_from(a, b)
        }
    }

    /// Mesh `driver` with `driven`; `driver` always keeps its state and
    /// overwrites the other side, even when at rest.
    ///
    /// Rejected under the same conditions as [`GearNetwork::connect_mesh`].
    pub fn connect_mesh_from(
        &mut self,
        driver: GearId,
        driven: GearId,
    ) -> NetworkResult<SyncReport> {
        self.check_pair(driver, driven, Relation::Mesh)?;
        if self.shares_axis(driver, driven)? {
            tracing::debug!(a = %driver, b = %driven, "mesh rejected: gears share an axis");
            return Err(NetworkError::SharesAxis {
                a: driver,
                b: driven,
            });
        }

        self.nodes[driver.slot()].meshed.insert(driven);
        self.nodes[driven.slot()].meshed.insert(driver);
        tracing::debug!(driver = %driver, driven = %driven, "gears meshed");
        Ok(self.synchronize(driver))
    }

    /// Put `b` on the axis of `a`; `b`'s side takes over `a`'s state.
    ///
    /// # Errors
    /// [`NetworkError::AlreadyMeshed`] if the gears are directly meshed,
    /// [`NetworkError::SelfRelation`] if `a == b`.
    pub fn connect_axial(&mut self, a: GearId, b: GearId) -> NetworkResult<SyncReport> {
        self.check_pair(a, b, Relation::Axial)?;
        if self.is_meshed(a, b)? {
            tracing::debug!(a = %a, b = %b, "axial link rejected: gears are meshed");
            return Err(NetworkError::AlreadyMeshed { a, b });
        }

        self.nodes[a.slot()].coaxial.insert(b);
        self.nodes[b.slot()].coaxial.insert(a);
        tracing::debug!(a = %a, b = %b, "gears linked on axis");
        Ok(self.synchronize(a))
    }

    /// Link `gears` into one axial group by connecting consecutive pairs.
    ///
    /// Every pair is checked before anything is linked, so a rejected call
    /// leaves the network unchanged. The first gear's state wins.
    pub fn create_axis(&mut self, gears: &[GearId]) -> NetworkResult<SyncReport> {
        for pair in gears.windows(2) {
            self.check_pair(pair[0], pair[1], Relation::Axial)?;
            if self.is_meshed(pair[0], pair[1])? {
                return Err(NetworkError::AlreadyMeshed {
                    a: pair[0],
                    b: pair[1],
                });
            }
        }
        // Single gears still have to exist.
        for &id in gears {
            self.node(id)?;
        }

        let mut total = SyncReport::default();
        for pair in gears.windows(2) {
            total.absorb(self.connect_axial(pair[0], pair[1])?);
        }
        Ok(total)
    }

    fn check_pair(&self, a: GearId, b: GearId, relation: Relation) -> NetworkResult<()> {
        self.node(a)?;
        self.node(b)?;
        if a == b {
            return Err(NetworkError::SelfRelation { gear: a, relation });
        }
        Ok(())
    }

    fn synchronize(&mut self, origin: GearId) -> SyncReport {
        let report = sync::synchronize(&mut self.nodes, origin);
        tracing::debug!(
            origin = %origin,
            visited = report.visited,
            updated = report.updated,
            "network synchronized"
        );
        report
    }

    // ---- Queries ----

    /// Whether `b` is directly on `a`'s axis (not transitive).
    pub fn shares_axis(&self, a: GearId, b: GearId) -> NetworkResult<bool> {
        self.node(b)?;
        Ok(self.node(a)?.coaxial.contains(&b))
    }

    /// Whether `a` and `b` are directly meshed.
    pub fn is_meshed(&self, a: GearId, b: GearId) -> NetworkResult<bool> {
        self.node(b)?;
        Ok(self.node(a)?.meshed.contains(&b))
    }

    /// Every gear reachable from `id` through axial links, `id` included,
    /// sorted by handle.
    pub fn axial_group(&self, id: GearId) -> NetworkResult<Vec<GearId>> {
        self.node(id)?;
        let mut group = BTreeSet::from([id]);
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            for &next in &self.nodes[cur.slot()].coaxial {
                if group.insert(next) {
                    stack.push(next);
                }
            }
        }
        Ok(group.into_iter().collect())
    }
}
