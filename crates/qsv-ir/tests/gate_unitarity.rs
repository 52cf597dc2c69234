//! Property-based tests for the gate catalog.
//!
//! Every matrix the catalog can produce must satisfy U†U = I.

use ndarray::Array2;
use num_complex::Complex64;
use proptest::prelude::*;
use qsv_ir::{CustomGate, StandardGate, is_unitary};

const TOL: f64 = 1e-10;

fn arb_angle() -> impl Strategy<Value = f64> {
    -4.0 * std::f64::consts::PI..4.0 * std::f64::consts::PI
}

fn arb_standard_gate() -> impl Strategy<Value = StandardGate> {
    let fixed = prop::sample::select(vec![
        StandardGate::I,
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::S,
        StandardGate::Sdg,
        StandardGate::T,
        StandardGate::Tdg,
        StandardGate::CX,
        StandardGate::CY,
        StandardGate::CZ,
        StandardGate::Swap,
    ]);
    let rotations = prop_oneof![
        arb_angle().prop_map(StandardGate::Rx),
        arb_angle().prop_map(StandardGate::Ry),
        arb_angle().prop_map(StandardGate::Rz),
        arb_angle().prop_map(StandardGate::P),
        arb_angle().prop_map(StandardGate::CP),
    ];
    prop_oneof![fixed, rotations]
}

proptest! {
    #[test]
    fn standard_gates_are_unitary(gate in arb_standard_gate()) {
        let m = gate.matrix();
        let dim = 1usize << gate.num_qubits();
        prop_assert_eq!(m.dim(), (dim, dim));
        prop_assert!(is_unitary(&m, TOL), "{} is not unitary", gate.name());
    }

    #[test]
    fn controlled_rotations_are_unitary(theta in arb_angle()) {
        for base in [StandardGate::Rx(theta), StandardGate::Ry(theta), StandardGate::Rz(theta)] {
            let gate = CustomGate::controlled("c", &base.matrix());
            prop_assert!(gate.is_ok());
            let m = gate.unwrap().to_array().unwrap();
            prop_assert!(is_unitary(&m, TOL));
        }
    }
}

#[test]
fn inverse_pairs_compose_to_identity() {
    let pairs = [
        (StandardGate::S, StandardGate::Sdg),
        (StandardGate::T, StandardGate::Tdg),
        (StandardGate::Rx(0.7), StandardGate::Rx(-0.7)),
        (StandardGate::CP(1.1), StandardGate::CP(-1.1)),
    ];
    for (a, b) in pairs {
        let product = a.matrix().dot(&b.matrix());
        let dim = product.nrows();
        let eye: Array2<Complex64> = Array2::eye(dim);
        for (x, y) in product.iter().zip(eye.iter()) {
            assert!((x - y).norm() < TOL, "{} * {} != I", a.name(), b.name());
        }
    }
}

#[test]
fn t_squared_is_s() {
    let t2 = StandardGate::T.matrix().dot(&StandardGate::T.matrix());
    let s = StandardGate::S.matrix();
    for (x, y) in t2.iter().zip(s.iter()) {
        assert!((x - y).norm() < TOL);
    }
}
