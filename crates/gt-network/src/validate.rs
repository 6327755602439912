//! Invariant checking over a whole network.

use gt_core::{GearId, Real, Tolerances, nearly_equal};
use thiserror::Error;

use crate::error::{NetworkError, NetworkResult};
use crate::network::{GearNetwork, GearNode, Relation};

/// A broken gear ratio rule or a malformed relation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("gear {gear} is in a {relation} relation with itself")]
    SelfRelation { gear: GearId, relation: Relation },

    #[error("gear {gear} lists {other} as {relation} but not the reverse")]
    Asymmetric {
        gear: GearId,
        other: GearId,
        relation: Relation,
    },

    #[error("gear {gear} refers to missing gear {other}")]
    Dangling { gear: GearId, other: GearId },

    #[error("gears {a} and {b} are both meshed and on one axis")]
    MeshAndAxial { a: GearId, b: GearId },

    #[error("gears {a} and {b} share an axis but differ in frequency or torque")]
    AxialMismatch { a: GearId, b: GearId },

    #[error("meshed gears {a} and {b} break the tooth ratio")]
    MeshMismatch { a: GearId, b: GearId },
}

/// Collect every violation in `nodes`.
///
/// Each unordered pair is reported at most once per rule.
pub(crate) fn check_nodes(nodes: &[GearNode], tol: Tolerances) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        let id = GearId::from_index(i as u32);

        for (relation, set) in [(Relation::Mesh, &node.meshed), (Relation::Axial, &node.coaxial)] {
            for &other in set {
                if other == id {
                    violations.push(Violation::SelfRelation { gear: id, relation });
                    continue;
                }
                let Some(other_node) = nodes.get(other.slot()) else {
                    violations.push(Violation::Dangling { gear: id, other });
                    continue;
                };
                let reverse = match relation {
                    Relation::Mesh => &other_node.meshed,
                    Relation::Axial => &other_node.coaxial,
                };
                if !reverse.contains(&id) {
                    violations.push(Violation::Asymmetric {
                        gear: id,
                        other,
                        relation,
                    });
                }
                // Remaining rules once per pair.
                if other < id {
                    continue;
                }
                let (a, b) = (&node.gear, &other_node.gear);
                match relation {
                    Relation::Mesh => {
                        if node.coaxial.contains(&other) {
                            violations.push(Violation::MeshAndAxial { a: id, b: other });
                        }
                        let a_teeth = a.teeth() as Real;
                        let b_teeth = b.teeth() as Real;
                        let speed_ok = nearly_equal(a.tooth_speed(), -b.tooth_speed(), tol);
                        let torque_ok =
                            nearly_equal(b.torque(), -(b_teeth * a.torque()) / a_teeth, tol);
                        if !(speed_ok && torque_ok) {
                            violations.push(Violation::MeshMismatch { a: id, b: other });
                        }
                    }
                    Relation::Axial => {
                        if !(nearly_equal(a.frequency(), b.frequency(), tol)
                            && nearly_equal(a.torque(), b.torque(), tol))
                        {
                            violations.push(Violation::AxialMismatch { a: id, b: other });
                        }
                    }
                }
            }
        }
    }

    violations
}

impl GearNetwork {
    /// Every invariant violation currently present, empty when consistent.
    ///
    /// Axial equality is checked per direct link, which implies equality
    /// across the whole axial group.
    pub fn check_invariants(&self, tol: Tolerances) -> Vec<Violation> {
        check_nodes(&self.nodes, tol)
    }

    /// Fail with the first invariant violation, if any.
    pub fn validate(&self, tol: Tolerances) -> NetworkResult<()> {
        match self.check_invariants(tol).into_iter().next() {
            Some(violation) => Err(NetworkError::Invariant(violation)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_network_is_valid() {
        let net = GearNetwork::new();
        assert!(net.validate(Tolerances::default()).is_ok());
    }

    #[test]
    fn synchronized_train_is_valid() {
        let mut net = GearNetwork::new();
        let a = net.add_gear_with_teeth(12).unwrap();
        let b = net.add_gear_with_teeth(36).unwrap();
        let c = net.add_gear_with_teeth(9).unwrap();
        net.connect_mesh(a, b).unwrap();
        net.connect_axial(b, c).unwrap();
        net.set_frequency(a, 7.0).unwrap();
        net.apply_torque(c, 3.0).unwrap();

        assert!(net.check_invariants(Tolerances::default()).is_empty());
    }

    #[test]
    fn detects_tampered_state() {
        let mut net = GearNetwork::new();
        let a = net.add_gear_with_teeth(10).unwrap();
        let b = net.add_gear_with_teeth(20).unwrap();
        let c = net.add_gear_with_teeth(30).unwrap();
        net.connect_mesh(a, b).unwrap();
        net.connect_axial(b, c).unwrap();
        net.set_frequency(a, 1.0).unwrap();

        net.nodes[c.slot()].gear.torque = 99.0;
        net.nodes[a.slot()].gear.frequency = 5.0;

        let violations = net.check_invariants(Tolerances::default());
        assert!(violations.contains(&Violation::AxialMismatch { a: b, b: c }));
        assert!(violations.contains(&Violation::MeshMismatch { a, b }));
        assert!(matches!(
            net.validate(Tolerances::default()),
            Err(NetworkError::Invariant(_))
        ));
    }

    #[test]
    fn detects_malformed_relations() {
        let mut net = GearNetwork::new();
        let a = net.add_gear_with_teeth(10).unwrap();
        let b = net.add_gear_with_teeth(20).unwrap();
        net.nodes[a.slot()].meshed.insert(a);
        net.nodes[a.slot()].coaxial.insert(b);
        net.nodes[a.slot()].meshed.insert(b);
        net.nodes[b.slot()].meshed.insert(a);

        let violations = net.check_invariants(Tolerances::default());
        assert!(violations.contains(&Violation::SelfRelation {
            gear: a,
            relation: Relation::Mesh
        }));
        assert!(violations.contains(&Violation::Asymmetric {
            gear: a,
            other: b,
            relation: Relation::Axial
        }));
        assert!(violations.contains(&Violation::MeshAndAxial { a, b }));
    }
}
