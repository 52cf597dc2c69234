//! Benchmarks for statevector evolution and sampling
//!
//! Run with: cargo bench -p qsv-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qsv_ir::{Circuit, QubitId};
use qsv_sim::{MeasurementBindings, StatevectorEngine, sample};
use std::f64::consts::PI;

/// A layer of H, a ladder of CX and a layer of Ry, repeated `layers` times.
fn layered_circuit(num_qubits: u32, layers: usize) -> Circuit {
    let mut circuit = Circuit::with_size("bench", num_qubits, num_qubits);
    for _ in 0..layers {
        for q in 0..num_qubits {
            circuit.h(QubitId(q)).unwrap();
        }
        for q in 0..num_qubits.saturating_sub(1) {
            circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
        }
        for q in 0..num_qubits {
            circuit.ry(PI / 7.0, QubitId(q)).unwrap();
        }
    }
    circuit.measure_all().unwrap();
    circuit
}

fn bench_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolution");
    let engine = StatevectorEngine::new();

    for num_qubits in [4u32, 10, 16] {
        let circuit = layered_circuit(num_qubits, 4);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| engine.run(black_box(circuit)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let engine = StatevectorEngine::new();

    for num_qubits in [4u32, 10, 16] {
        let circuit = layered_circuit(num_qubits, 2);
        let state = engine.run(&circuit).unwrap();
        let bindings = MeasurementBindings::from_circuit(&circuit).unwrap();
        group.bench_with_input(
            BenchmarkId::new("1024_shots", num_qubits),
            &state,
            |b, state| {
                b.iter(|| sample(black_box(state), &bindings, 1024, 42).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_evolution, bench_sampling);
criterion_main!(benches);
