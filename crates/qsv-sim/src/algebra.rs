//! Dense complex vector algebra over `2^n` amplitude vectors.
//!
//! Scalar arithmetic (add, multiply, conjugate, magnitude squared) comes from
//! [`num_complex::Complex64`]. This module adds the two vector operations the
//! engine needs: embedding a small gate matrix into the full register without
//! building the `2^n × 2^n` operator, and Kronecker products.

use ndarray::Array2;
use num_complex::Complex64;
use rustc_hash::FxHashSet;

use crate::error::{SimError, SimResult};

/// Apply a `2^k × 2^k` matrix to `targets` of an `n`-qubit state, in place.
///
/// Target `j` is bit `j` of the matrix's local basis index. For each basis
/// index `i`, the local row is read from `i`'s bits at the target positions and
/// contracted with the `2^k` amplitudes that agree with `i` on every other
/// bit. Results are accumulated into `scratch` and then swapped into `state`,
/// so no amplitude is read after it has been overwritten.
///
/// Cost is `O(2^n · 2^k)` time and `O(2^n)` extra memory.
pub fn apply_matrix_with_scratch(
    state: &mut Vec<Complex64>,
    scratch: &mut Vec<Complex64>,
    num_qubits: usize,
    matrix: &Array2<Complex64>,
    targets: &[usize],
) -> SimResult<()> {
    validate_targets(num_qubits, matrix, targets)?;

    let dim = 1usize << targets.len();
    let target_mask = targets.iter().fold(0usize, |m, &t| m | (1 << t));

    // offsets[c] sets the target bits to the local pattern c.
    let offsets: Vec<usize> = (0..dim)
        .map(|c| {
            targets
                .iter()
                .enumerate()
                .filter(|(j, _)| c >> j & 1 == 1)
                .fold(0usize, |acc, (_, &t)| acc | (1 << t))
        })
        .collect();

    scratch.clear();
    scratch.resize(state.len(), Complex64::new(0.0, 0.0));

    for (i, out) in scratch.iter_mut().enumerate() {
        let row = targets
            .iter()
            .enumerate()
            .fold(0usize, |acc, (j, &t)| acc | ((i >> t & 1) << j));
        let base = i & !target_mask;
        let mut acc = Complex64::new(0.0, 0.0);
        for (col, &offset) in offsets.iter().enumerate() {
            let m = matrix[[row, col]];
            if m.re != 0.0 || m.im != 0.0 {
                acc += m * state[base | offset];
            }
        }
        *out = acc;
    }

    std::mem::swap(state, scratch);
    Ok(())
}

/// Apply a gate matrix in place, allocating a temporary scratch buffer.
pub fn apply_matrix(
    state: &mut Vec<Complex64>,
    num_qubits: usize,
    matrix: &Array2<Complex64>,
    targets: &[usize],
) -> SimResult<()> {
    let mut scratch = Vec::with_capacity(state.len());
    apply_matrix_with_scratch(state, &mut scratch, num_qubits, matrix, targets)
}

fn validate_targets(
    num_qubits: usize,
    matrix: &Array2<Complex64>,
    targets: &[usize],
) -> SimResult<()> {
    if let Some(&qubit) = targets.iter().find(|&&t| t >= num_qubits) {
        return Err(SimError::InvalidQubitIndex { qubit, num_qubits });
    }

    let mut seen = FxHashSet::default();
    if let Some(&dup) = targets.iter().find(|&&t| !seen.insert(t)) {
        return Err(SimError::InvalidGateTargets(format!(
            "qubit {dup} appears more than once"
        )));
    }

    if targets.is_empty() {
        return Err(SimError::InvalidGateTargets("no target qubits".into()));
    }

    let dim = 1usize << targets.len();
    if matrix.dim() != (dim, dim) {
        let (rows, cols) = matrix.dim();
        return Err(SimError::InvalidGateTargets(format!(
            "{rows}x{cols} matrix cannot act on {} qubits",
            targets.len()
        )));
    }

    Ok(())
}

/// Kronecker product of two vectors.
///
/// `result[i * b.len() + j] = a[i] * b[j]`: with qubit 0 as the least
/// significant bit, `b` occupies the low-order qubits.
pub fn tensor_product(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    a.iter()
        .flat_map(|&x| b.iter().map(move |&y| x * y))
        .collect()
}

/// Kronecker product of two matrices (`b` on the low-order qubits).
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    Array2::from_shape_fn((ar * br, ac * bc), |(r, c)| {
        a[[r / br, c / bc]] * b[[r % br, c % bc]]
    })
}

/// Sum of squared magnitudes.
pub fn norm_sqr(state: &[Complex64]) -> f64 {
    state.iter().map(Complex64::norm_sqr).sum()
}
