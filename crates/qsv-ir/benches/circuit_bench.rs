//! Benchmarks for circuit construction
//!
//! Run with: cargo bench -p qsv-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qsv_ir::{Circuit, QubitId};
use std::f64::consts::PI;

fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("h_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10, 0);
        b.iter(|| {
            circuit.h(black_box(QubitId(0))).unwrap();
        });
    });

    group.bench_function("ry_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10, 0);
        b.iter(|| {
            circuit
                .ry(black_box(PI / 4.0), black_box(QubitId(0)))
                .unwrap();
        });
    });

    group.bench_function("cx_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10, 0);
        b.iter(|| {
            circuit
                .cx(black_box(QubitId(0)), black_box(QubitId(1)))
                .unwrap();
        });
    });

    group.finish();
}

fn bench_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth");

    for num_qubits in &[4u32, 12, 24] {
        let mut circuit = Circuit::with_size("bench", *num_qubits, *num_qubits);
        for layer in 0..20 {
            for q in 0..*num_qubits {
                circuit.h(QubitId(q)).unwrap();
            }
            for q in (layer % 2..num_qubits - 1).step_by(2) {
                circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
            }
        }
        circuit.measure_all().unwrap();

        group.bench_with_input(
            BenchmarkId::new("layered", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.depth()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_gate_addition, bench_depth);
criterion_main!(benches);
