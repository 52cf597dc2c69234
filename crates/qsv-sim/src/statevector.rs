//! Dense statevector representation.

use ndarray::Array2;
use num_complex::Complex64;
use std::collections::BTreeMap;

use qsv_ir::{Gate, QubitId};

use crate::algebra;
use crate::error::{SimError, SimResult};

/// Hard ceiling on register width; `2^30` amplitudes is 16 GiB.
pub const MAX_QUBITS: usize = 30;

/// Tolerance for the unit-norm check on user-supplied amplitudes.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// A pure quantum state over `n` qubits.
///
/// Amplitude `i` belongs to the basis state whose bit `k` is the value of
/// qubit `k` (qubit 0 is the least significant bit).
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(SimError::StateSpaceTooLarge {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Wrap existing amplitudes. The length must be a power of two and the
    /// vector must have unit norm.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return Err(SimError::InvalidAmplitudes(format!(
                "length {len} is not a power of two"
            )));
        }
        let num_qubits = len.trailing_zeros() as usize;
        if num_qubits > MAX_QUBITS {
            return Err(SimError::StateSpaceTooLarge {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let norm = algebra::norm_sqr(&amplitudes);
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimError::InvalidAmplitudes(format!(
                "squared norm is {norm}, expected 1"
            )));
        }
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// All amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Consume the statevector and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Apply a catalog or custom gate to `targets` (control qubits first).
    pub fn apply_gate(&mut self, gate: &Gate, targets: &[QubitId]) -> SimResult<()> {
        let matrix = gate.matrix()?;
        let targets: Vec<usize> = targets.iter().map(|q| q.index()).collect();
        self.apply_matrix(&matrix, &targets)
    }

    /// Apply a raw `2^k × 2^k` matrix to `targets`.
    pub fn apply_matrix(&mut self, matrix: &Array2<Complex64>, targets: &[usize]) -> SimResult<()> {
        algebra::apply_matrix(&mut self.amplitudes, self.num_qubits, matrix, targets)
    }

    pub(crate) fn apply_matrix_with_scratch(
        &mut self,
        matrix: &Array2<Complex64>,
        targets: &[usize],
        scratch: &mut Vec<Complex64>,
    ) -> SimResult<()> {
        algebra::apply_matrix_with_scratch(
            &mut self.amplitudes,
            scratch,
            self.num_qubits,
            matrix,
            targets,
        )
    }

    /// Squared norm; 1 for any state reached by unitary evolution.
    pub fn norm_sqr(&self) -> f64 {
        algebra::norm_sqr(&self.amplitudes)
    }

    /// Born-rule probabilities in basis-index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Probability of observing basis state `index`.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, Complex64::norm_sqr)
    }

    /// Probabilities keyed by basis bitstring (see [`Self::basis_bitstring`]).
    pub fn probability_map(&self) -> BTreeMap<String, f64> {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(i, a)| (self.basis_bitstring(i), a.norm_sqr()))
            .collect()
    }

    /// Render a basis index in binary, qubit `n-1` leftmost and qubit 0
    /// rightmost.
    pub fn basis_bitstring(&self, index: usize) -> String {
        (0..self.num_qubits)
            .rev()
            .map(|k| if index >> k & 1 == 1 { '1' } else { '0' })
            .collect()
    }

    /// Bloch vector `(x, y, z)` of the reduced state of `qubit`.
    ///
    /// The length is 1 for a qubit in a pure product state and shrinks
    /// towards 0 as the qubit becomes entangled with the rest of the register.
    pub fn bloch_vector(&self, qubit: QubitId) -> SimResult<[f64; 3]> {
        let q = qubit.index();
        if q >= self.num_qubits {
            return Err(SimError::InvalidQubitIndex {
                qubit: q,
                num_qubits: self.num_qubits,
            });
        }
        let mask = qubit.mask();

        // rho_01 = sum over the other qubits of a(q=0) * conj(a(q=1))
        let mut coherence = Complex64::new(0.0, 0.0);
        let mut p0 = 0.0;
        let mut p1 = 0.0;
        for (i, a) in self.amplitudes.iter().enumerate() {
            if i & mask == 0 {
                let b = self.amplitudes[i | mask];
                coherence += a * b.conj();
                p0 += a.norm_sqr();
            } else {
                p1 += a.norm_sqr();
            }
        }

        Ok([2.0 * coherence.re, -2.0 * coherence.im, p0 - p1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsv_ir::StandardGate;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn apply(sv: &mut Statevector, gate: StandardGate, qubits: &[u32]) {
        let targets: Vec<QubitId> = qubits.iter().copied().map(QubitId).collect();
        sv.apply_gate(&gate.into(), &targets).unwrap();
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2).unwrap();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
        assert_eq!(sv.dim(), 4);
    }

    #[test]
    fn test_too_many_qubits() {
        assert!(matches!(
            Statevector::new(MAX_QUBITS + 1),
            Err(SimError::StateSpaceTooLarge { .. })
        ));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1).unwrap();
        apply(&mut sv, StandardGate::H, &[0]);

        assert!(approx_eq(sv.amplitudes[0], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn test_x_gate() {
        let mut sv = Statevector::new(1).unwrap();
        apply(&mut sv, StandardGate::X, &[0]);

        assert!(approx_eq(sv.amplitudes[0], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(1.0, 0.0)));
        assert_eq!(sv.probability(1), 1.0);
    }

    #[test]
    fn test_from_amplitudes_validation() {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(Statevector::from_amplitudes(vec![h, h]).is_ok());
        assert!(matches!(
            Statevector::from_amplitudes(vec![h, h, h]),
            Err(SimError::InvalidAmplitudes(_))
        ));
        assert!(matches!(
            Statevector::from_amplitudes(vec![h, Complex64::new(0.0, 0.0)]),
            Err(SimError::InvalidAmplitudes(_))
        ));
        let sv = Statevector::from_amplitudes(vec![Complex64::new(1.0, 0.0)]).unwrap();
        assert_eq!(sv.num_qubits(), 0);
    }

    #[test]
    fn test_basis_bitstring_is_binary_index() {
        let sv = Statevector::new(3).unwrap();
        // index 1 = qubit 0 set
        assert_eq!(sv.basis_bitstring(1), "001");
        // index 6 = qubits 1 and 2 set
        assert_eq!(sv.basis_bitstring(6), "110");
    }

    #[test]
    fn test_probability_map_covers_all_states() {
        let mut sv = Statevector::new(2).unwrap();
        apply(&mut sv, StandardGate::X, &[1]);
        let probs = sv.probability_map();
        assert_eq!(probs.len(), 4);
        assert!((probs["10"] - 1.0).abs() < 1e-12);
        assert_eq!(probs["00"], 0.0);
    }

    #[test]
    fn test_bloch_vectors() {
        let mut sv = Statevector::new(3).unwrap();
        // q0 = |0>, q1 = |+>, q2 = |+i>
        apply(&mut sv, StandardGate::H, &[1]);
        apply(&mut sv, StandardGate::H, &[2]);
        apply(&mut sv, StandardGate::S, &[2]);

        let close = |v: [f64; 3], e: [f64; 3]| v.iter().zip(e).all(|(a, b)| (a - b).abs() < 1e-10);
        assert!(close(sv.bloch_vector(QubitId(0)).unwrap(), [0.0, 0.0, 1.0]));
        assert!(close(sv.bloch_vector(QubitId(1)).unwrap(), [1.0, 0.0, 0.0]));
        assert!(close(sv.bloch_vector(QubitId(2)).unwrap(), [0.0, 1.0, 0.0]));
        assert!(sv.bloch_vector(QubitId(3)).is_err());
    }

    #[test]
    fn test_bell_qubit_is_maximally_mixed() {
        let mut sv = Statevector::new(2).unwrap();
        apply(&mut sv, StandardGate::H, &[0]);
        apply(&mut sv, StandardGate::CX, &[0, 1]);
        for q in 0..2 {
            let v = sv.bloch_vector(QubitId(q)).unwrap();
            assert!(v.iter().all(|c| c.abs() < 1e-12));
        }
    }
}
