//! Synchronization traversal.
//!
//! Starting from the gear whose state just changed, propagate frequency and
//! torque outward along both relation kinds:
//!
//! ```text
//! mesh:   m.frequency = -(cur.frequency * cur.teeth) / m.teeth
//!         m.torque    = -(m.teeth * cur.torque) / cur.teeth
//! axial:  x.frequency = cur.frequency
//!         x.torque    = cur.torque
//! ```
//!
//! The walk uses an explicit stack and a settled flag per gear, so every
//! gear is written at most once per call and cycles of either relation kind
//! terminate after O(edges) steps. An axial neighbour that already carries
//! the propagated state is a fixed point: its branch is not explored.

use gt_core::{GearId, Real};

use crate::network::GearNode;

/// Summary of one synchronization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Gears reached by the traversal, origin included.
    pub visited: usize,
    /// Gears whose frequency or torque actually changed.
    pub updated: usize,
}

impl SyncReport {
    /// Fold another pass into this one.
    pub fn absorb(&mut self, other: SyncReport) {
        self.visited += other.visited;
        self.updated += other.updated;
    }
}

/// Re-derive the state of every gear reachable from `origin`.
///
/// `origin` must index into `nodes`.
pub(crate) fn synchronize(nodes: &mut [GearNode], origin: GearId) -> SyncReport {
    let mut settled = vec![false; nodes.len()];
    let mut stack = vec![origin];
    settled[origin.slot()] = true;

    let mut report = SyncReport {
        visited: 1,
        updated: 0,
    };

    while let Some(cur) = stack.pop() {
        let (frequency, torque, teeth) = {
            let gear = &nodes[cur.slot()].gear;
            (gear.frequency, gear.torque, gear.teeth() as Real)
        };
        let meshed: Vec<GearId> = nodes[cur.slot()].meshed.iter().copied().collect();
        let coaxial: Vec<GearId> = nodes[cur.slot()].coaxial.iter().copied().collect();

        for m in meshed {
            let idx = m.slot();
            if settled[idx] {
                continue;
            }
            settled[idx] = true;
            report.visited += 1;

            let gear = &mut nodes[idx].gear;
            let m_teeth = gear.teeth() as Real;
            let next_frequency = -(frequency * teeth) / m_teeth;
            let next_torque = -(m_teeth * torque) / teeth;
            if gear.frequency != next_frequency || gear.torque != next_torque {
                report.updated += 1;
            }
            gear.frequency = next_frequency;
            gear.torque = next_torque;
            tracing::trace!(from = %cur, to = %m, frequency = next_frequency, torque = next_torque, "mesh step");
            stack.push(m);
        }

        for x in coaxial {
            let idx = x.slot();
            if settled[idx] {
                continue;
            }
            let gear = &mut nodes[idx].gear;
            if gear.frequency == frequency && gear.torque == torque {
                continue;
            }
            settled[idx] = true;
            report.visited += 1;
            report.updated += 1;

            gear.frequency = frequency;
            gear.torque = torque;
            tracing::trace!(from = %cur, to = %x, frequency, torque, "axial step");
            stack.push(x);
        }
    }

    report
}
