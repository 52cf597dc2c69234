//! Property-based tests: random circuits preserve the norm and sample
//! reproducibly.

use proptest::prelude::*;
use qsv_ir::{Circuit, QubitId, StandardGate};
use qsv_sim::{MeasurementBindings, StatevectorEngine, sample};

const MAX_WIDTH: u32 = 5;

#[derive(Debug, Clone)]
enum Op {
    One(StandardGate, u32),
    Two(StandardGate, u32, u32),
}

fn arb_angle() -> impl Strategy<Value = f64> {
    -2.0 * std::f64::consts::PI..2.0 * std::f64::consts::PI
}

fn arb_one_qubit_gate() -> impl Strategy<Value = StandardGate> {
    prop_oneof![
        prop::sample::select(vec![
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::T,
            StandardGate::Tdg,
        ]),
        arb_angle().prop_map(StandardGate::Rx),
        arb_angle().prop_map(StandardGate::Ry),
        arb_angle().prop_map(StandardGate::Rz),
    ]
}

fn arb_two_qubit_gate() -> impl Strategy<Value = StandardGate> {
    prop_oneof![
        prop::sample::select(vec![
            StandardGate::CX,
            StandardGate::CY,
            StandardGate::CZ,
            StandardGate::Swap,
        ]),
        arb_angle().prop_map(StandardGate::CP),
    ]
}

fn arb_op(width: u32) -> impl Strategy<Value = Op> {
    let one = (arb_one_qubit_gate(), 0..width).prop_map(|(g, q)| Op::One(g, q));
    // Second operand is an offset so the two qubits never coincide.
    let two = (arb_two_qubit_gate(), 0..width, 1..width.max(2))
        .prop_map(move |(g, a, off)| Op::Two(g, a, (a + off) % width.max(2)));
    if width < 2 {
        one.boxed()
    } else {
        prop_oneof![2 => one, 1 => two].boxed()
    }
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1..=MAX_WIDTH).prop_flat_map(|width| {
        prop::collection::vec(arb_op(width), 0..30).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("random", width, width);
            for op in ops {
                let added = match op {
                    Op::One(g, q) => circuit.add_gate(g, [QubitId(q)]).map(|_| ()),
                    Op::Two(g, a, b) => circuit.add_gate(g, [QubitId(a), QubitId(b)]).map(|_| ()),
                };
                added.expect("generated operands are in range");
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn evolution_preserves_norm(circuit in arb_circuit()) {
        let state = StatevectorEngine::new().run(&circuit).unwrap();
        prop_assert!((state.norm_sqr() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sampling_is_reproducible(circuit in arb_circuit(), seed in any::<u64>()) {
        let state = StatevectorEngine::new().run(&circuit).unwrap();
        let bindings = MeasurementBindings::all_qubits(circuit.num_qubits());
        let a = sample(&state, &bindings, 64, seed).unwrap();
        let b = sample(&state, &bindings, 64, seed).unwrap();
        prop_assert_eq!(a.total_shots(), 64);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn probabilities_sum_to_one(circuit in arb_circuit()) {
        let state = StatevectorEngine::new().run(&circuit).unwrap();
        let total: f64 = state.probability_map().values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}
