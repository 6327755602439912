//! Integration tests for gt-network.

use gt_core::Tolerances;
use gt_network::{GearNetwork, NetworkError};

fn state(net: &GearNetwork, id: gt_network::GearId) -> (f64, f64) {
    let gear = net.gear(id).unwrap();
    (gear.frequency(), gear.torque())
}

#[test]
fn basic_mesh_ratio() {
    let mut net = GearNetwork::new();
    let a = net.add_gear_with_teeth(30).unwrap();
    let b = net.add_gear_with_teeth(60).unwrap();
    net.connect_mesh(a, b).unwrap();

    net.set_frequency(a, 1.0).unwrap();
    net.apply_torque(a, 10.0).unwrap();

    assert_eq!(state(&net, a), (1.0, 10.0));
    assert_eq!(state(&net, b), (-0.5, -20.0));
}

#[test]
fn full_train_walkthrough() {
    // A(30) -mesh- B(60) =axis= C(6), later D(600) meshed onto C.
    let mut net = GearNetwork::new();
    let a = net.add_gear_with_teeth(30).unwrap();
    let b = net.add_gear_with_teeth(60).unwrap();
    net.connect_mesh(a, b).unwrap();
    net.set_frequency(a, 1.0).unwrap();
    net.apply_torque(a, 10.0).unwrap();
    net.apply_torque(a, 30.0).unwrap();

    // Axial fan-out: C inherits B's state.
    let c = net.add_gear_with_teeth(6).unwrap();
    net.connect_axial(b, c).unwrap();
    assert_eq!(state(&net, a), (1.0, 30.0));
    assert_eq!(state(&net, b), (-0.5, -60.0));
    assert_eq!(state(&net, c), (-0.5, -60.0));

    // Torque on C flows back through B into A.
    net.apply_torque(c, 10.0).unwrap();
    assert_eq!(state(&net, a), (1.0, -5.0));
    assert_eq!(state(&net, b), (-0.5, 10.0));
    assert_eq!(state(&net, c), (-0.5, 10.0));

    // Reconnection reset: the resting D drives the new mesh.
    let d = net.add_gear_with_teeth(600).unwrap();
    net.connect_mesh_from(d, c).unwrap();
    for id in [a, b, c, d] {
        let (f, t) = state(&net, id);
        assert_eq!(f, 0.0, "frequency of {id}");
        assert_eq!(t, 0.0, "torque of {id}");
    }

    net.set_frequency(d, 1.0).unwrap();
    net.apply_torque(d, 1000.0).unwrap();
    assert_eq!(state(&net, a), (200.0, 5.0));
    assert_eq!(state(&net, b), (-100.0, -10.0));
    assert_eq!(state(&net, c), (-100.0, -10.0));
    assert_eq!(state(&net, d), (1.0, 1000.0));

    assert!(net.validate(Tolerances::default()).is_ok());
}

#[test]
fn resting_gear_wins_over_negative_torque() {
    // After the axial fan-out C carries -60 Nm, so the resting D (0 Nm) has
    // the larger torque, drives the new mesh and stops the whole train.
    let mut net = GearNetwork::new();
    let a = net.add_gear_with_teeth(30).unwrap();
    let b = net.add_gear_with_teeth(60).unwrap();
    net.connect_mesh(a, b).unwrap();
    net.apply_torque(a, 30.0).unwrap();
    net.set_frequency(a, 1.0).unwrap();

    let c = net.add_gear_with_teeth(6).unwrap();
    net.connect_axial(b, c).unwrap();
    assert_eq!(state(&net, c), (-0.5, -60.0));

    let d = net.add_gear_with_teeth(600).unwrap();
    net.connect_mesh(c, d).unwrap();
    for id in [a, b, c, d] {
        assert_eq!(state(&net, id), (0.0, 0.0), "state of {id}");
    }
    assert!(net.validate(Tolerances::default()).is_ok());
}

#[test]
fn mesh_across_indirect_axial_link_is_accepted_but_inconsistent() {
    // a and c only share an axis through b, so the mesh is not rejected;
    // the broken axial group shows up in the invariant check.
    let mut net = GearNetwork::new();
    let a = net.add_gear_with_teeth(10).unwrap();
    let b = net.add_gear_with_teeth(20).unwrap();
    let c = net.add_gear_with_teeth(30).unwrap();
    net.create_axis(&[a, b, c]).unwrap();
    net.set_frequency(a, 2.0).unwrap();

    assert!(!net.shares_axis(a, c).unwrap());
    net.connect_mesh(a, c).unwrap();
    assert!(net.is_meshed(a, c).unwrap());
    assert!(!net.check_invariants(Tolerances::default()).is_empty());
}

#[test]
fn priority_mesh_keeps_loaded_side() {
    // Same layout as the walkthrough, but with the torque priority rule:
    // C carries more torque than the resting D, so D is overwritten.
    let mut net = GearNetwork::new();
    let b = net.add_gear_with_teeth(60).unwrap();
    let c = net.add_gear_with_teeth(6).unwrap();
    net.connect_axial(b, c).unwrap();
    net.set_frequency(c, -0.5).unwrap();
    net.apply_torque(c, 10.0).unwrap();

    let d = net.add_gear_with_teeth(600).unwrap();
    net.connect_mesh(d, c).unwrap();

    assert_eq!(state(&net, c), (-0.5, 10.0));
    assert_eq!(state(&net, b), (-0.5, 10.0));
    assert_eq!(state(&net, d), (0.005, -1000.0));
}

#[test]
fn construction_validation() {
    let mut net = GearNetwork::new();
    assert_eq!(
        net.add_gear_with_teeth(-3).unwrap_err(),
        NetworkError::InvalidTeeth { teeth: -3 }
    );
    assert!(net.add_gear(10, 0.0).is_err());
    assert!(net.is_empty());
}

#[test]
fn rejected_mesh_is_a_no_op() {
    let mut net = GearNetwork::new();
    let a = net.add_gear_with_teeth(20).unwrap();
    let b = net.add_gear_with_teeth(40).unwrap();
    let c = net.add_gear_with_teeth(10).unwrap();
    net.connect_axial(a, b).unwrap();
    net.connect_mesh(b, c).unwrap();
    net.set_frequency(a, 2.0).unwrap();
    net.apply_torque(c, -4.0).unwrap();
    let before = net.clone();

    assert_eq!(
        net.connect_mesh(a, b).unwrap_err(),
        NetworkError::SharesAxis { a, b }
    );
    assert_eq!(net, before);

    assert_eq!(
        net.connect_axial(c, b).unwrap_err(),
        NetworkError::AlreadyMeshed { a: c, b }
    );
    assert_eq!(net, before);
}

#[test]
fn axial_cycle_terminates() {
    let mut net = GearNetwork::new();
    let a = net.add_gear_with_teeth(10).unwrap();
    let b = net.add_gear_with_teeth(20).unwrap();
    let c = net.add_gear_with_teeth(30).unwrap();
    net.connect_axial(a, b).unwrap();
    net.connect_axial(b, c).unwrap();
    net.connect_axial(c, a).unwrap();

    net.set_frequency(a, 10.0).unwrap();
    net.apply_torque(b, 2.0).unwrap();

    for id in [a, b, c] {
        assert_eq!(state(&net, id), (10.0, 2.0));
    }
    assert!(net.check_invariants(Tolerances::default()).is_empty());
}

#[test]
fn locked_mesh_loop_terminates_and_is_reported() {
    // Three gears meshed in a ring cannot turn; the walk still ends.
    let mut net = GearNetwork::new();
    let a = net.add_gear_with_teeth(10).unwrap();
    let b = net.add_gear_with_teeth(20).unwrap();
    let c = net.add_gear_with_teeth(30).unwrap();
    net.connect_mesh(a, b).unwrap();
    net.connect_mesh(b, c).unwrap();
    net.connect_mesh(c, a).unwrap();

    net.set_frequency(a, 3.0).unwrap();
    assert!(!net.check_invariants(Tolerances::default()).is_empty());
}

#[test]
fn mesh_on_shared_axis_branch() {
    // B(120) drives C(360), C shares an axis with D(300), D drives E(240).
    let mut net = GearNetwork::new();
    let b = net.add_gear_with_teeth(120).unwrap();
    let c = net.add_gear_with_teeth(360).unwrap();
    let d = net.add_gear_with_teeth(300).unwrap();
    let e = net.add_gear_with_teeth(240).unwrap();
    net.connect_mesh(b, c).unwrap();
    net.connect_axial(c, d).unwrap();
    net.connect_mesh(d, e).unwrap();

    net.apply_torque(b, 900.0).unwrap();
    // 900 * (360/120) * (240/300), sign flips twice.
    assert!((net.gear(e).unwrap().torque() - 2160.0).abs() < 1e-9);
}

#[test]
fn pendulum_clock_train() {
    let mut net = GearNetwork::new();
    let a = net.add_gear(80, 0.03).unwrap();
    let rest: Vec<_> = [18, 60, 10, 60, 10, 60, 6, 30]
        .into_iter()
        .map(|n| net.add_gear_with_teeth(n).unwrap())
        .collect();
    let (b, c, d, e, f, g, h, i) = (
        rest[0], rest[1], rest[2], rest[3], rest[4], rest[5], rest[6], rest[7],
    );

    net.connect_mesh(a, b).unwrap();
    net.connect_axial(b, c).unwrap();
    net.connect_mesh(c, d).unwrap();
    net.connect_axial(d, e).unwrap();
    net.connect_mesh(e, f).unwrap();
    net.connect_axial(f, g).unwrap();
    net.connect_mesh(g, h).unwrap();
    net.connect_axial(h, i).unwrap();

    net.set_tooth_speed(i, 0.5).unwrap();
    net.apply_edge_force(a, 16.709).unwrap();

    // i turns at 0.5/30 Hz; four meshes, so a turns the same way, geared
    // by 6/60 * 10/60 * 10/60 * 18/80.
    let expected_a = (0.5 / 30.0) * (6.0 / 60.0) * (10.0 / 60.0) * (10.0 / 60.0) * (18.0 / 80.0);
    let period = net.gear(a).unwrap().period().unwrap();
    assert!((period - 1.0 / expected_a).abs() / period.abs() < 1e-9);
    assert!(net.validate(Tolerances::default()).is_ok());
}
