//! Quantum gate types and the gate catalog.
//!
//! Every gate knows its arity and can produce its unitary as a dense
//! `2^k × 2^k` matrix. Multi-qubit matrices are indexed by the *local* basis
//! index of the gate's target list: target `j` is bit `j` of the local index.
//! For a controlled gate applied to `[control, target]` the local index is
//! therefore `control + 2 * target`.

use ndarray::{Array2, array};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

use crate::error::{IrError, IrResult};

/// Largest gate arity the catalog and the simulator accept.
pub const MAX_GATE_ARITY: u32 = 2;

/// Tolerance used when checking that a user-supplied matrix is unitary.
pub const UNITARY_TOLERANCE: f64 = 1e-9;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

#[inline]
fn re(v: f64) -> Complex64 {
    Complex64::new(v, 0.0)
}

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate diag(1, e^{iθ}).
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled phase gate.
    CP(f64),
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CP(_)
            | StandardGate::Swap => 2,
        }
    }

    /// Get the rotation angle, if the gate is parameterized.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::CP(t) => Some(*t),
            _ => None,
        }
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> Array2<Complex64> {
        match self {
            StandardGate::I => Array2::eye(2),
            StandardGate::X => pauli_x(),
            StandardGate::Y => pauli_y(),
            StandardGate::Z => phase(std::f64::consts::PI),
            StandardGate::H => hadamard(),
            StandardGate::S => phase(FRAC_PI_2),
            StandardGate::Sdg => phase(-FRAC_PI_2),
            StandardGate::T => phase(FRAC_PI_4),
            StandardGate::Tdg => phase(-FRAC_PI_4),
            StandardGate::Rx(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                array![[re(c), Complex64::new(0.0, -s)], [Complex64::new(0.0, -s), re(c)]]
            }
            StandardGate::Ry(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                array![[re(c), re(-s)], [re(s), re(c)]]
            }
            StandardGate::Rz(theta) => array![
                [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
                [ZERO, Complex64::from_polar(1.0, theta / 2.0)]
            ],
            StandardGate::P(theta) => phase(*theta),
            StandardGate::CX => controlled_unchecked(&pauli_x()),
            StandardGate::CY => controlled_unchecked(&pauli_y()),
            StandardGate::CZ => controlled_unchecked(&phase(std::f64::consts::PI)),
            StandardGate::CP(theta) => controlled_unchecked(&phase(*theta)),
            StandardGate::Swap => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE]
            ],
        }
    }
}

fn pauli_x() -> Array2<Complex64> {
    array![[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> Array2<Complex64> {
    array![[ZERO, -I], [I, ZERO]]
}

fn hadamard() -> Array2<Complex64> {
    let h = re(FRAC_1_SQRT_2);
    array![[h, h], [h, -h]]
}

/// diag(1, e^{iθ}). Z, S and T are the θ = π, π/2, π/4 cases.
fn phase(theta: f64) -> Array2<Complex64> {
    // Snap the exact Clifford phases so Z gives -1 rather than -1 + 1.2e-16i.
    let p = if theta == std::f64::consts::PI {
        -ONE
    } else if theta == FRAC_PI_2 {
        I
    } else if theta == -FRAC_PI_2 {
        -I
    } else {
        Complex64::from_polar(1.0, theta)
    };
    array![[ONE, ZERO], [ZERO, p]]
}

fn controlled_unchecked(base: &Array2<Complex64>) -> Array2<Complex64> {
    let mut m = Array2::eye(4);
    // Local indices 1 and 3 are the control = 1 subspace (target = 0, 1).
    let sub = [1usize, 3];
    for (r, &row) in sub.iter().enumerate() {
        for (c, &col) in sub.iter().enumerate() {
            m[[row, col]] = base[[r, c]];
        }
    }
    m
}

/// Build the 4×4 controlled version of a 2×2 gate.
///
/// The result acts on `[control, target]`: identity when the control is 0,
/// `base` on the target when the control is 1.
pub fn controlled(base: &Array2<Complex64>) -> IrResult<Array2<Complex64>> {
    if base.dim() != (2, 2) {
        return Err(IrError::InvalidMatrix {
            gate_name: "controlled".into(),
            expected: 2,
            got: base.len(),
        });
    }
    Ok(controlled_unchecked(base))
}

/// Check that `U†U = I` within `tol`.
pub fn is_unitary(matrix: &Array2<Complex64>, tol: f64) -> bool {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return false;
    }
    let adjoint = matrix.t().mapv(|z| z.conj());
    let product = adjoint.dot(matrix);
    product.indexed_iter().all(|((r, c), z)| {
        let expected = if r == c { ONE } else { ZERO };
        (*z - expected).norm() < tol
    })
}

/// A user-defined gate carrying its own unitary.
///
/// Decoding goes through [`CustomGate::from_matrix`], so a deserialized gate
/// has already passed [`CustomGate::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCustomGate")]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Unitary matrix, row-major, `2^n × 2^n`.
    pub matrix: Vec<Complex64>,
}

#[derive(Deserialize)]
struct RawCustomGate {
    name: String,
    num_qubits: u32,
    matrix: Vec<Complex64>,
}

impl TryFrom<RawCustomGate> for CustomGate {
    type Error = IrError;

    fn try_from(raw: RawCustomGate) -> IrResult<Self> {
        CustomGate::from_matrix(raw.name, raw.num_qubits, raw.matrix)
    }
}

impl CustomGate {
    /// Create a gate from a row-major matrix.
    ///
    /// The matrix must be `2^num_qubits` square and unitary, and the arity
    /// must be between 1 and [`MAX_GATE_ARITY`].
    pub fn from_matrix(
        name: impl Into<String>,
        num_qubits: u32,
        matrix: Vec<Complex64>,
    ) -> IrResult<Self> {
        let gate = Self {
            name: name.into(),
            num_qubits,
            matrix,
        };
        gate.validate()?;
        Ok(gate)
    }

    /// Wrap the controlled version of a 2×2 `base` as a two-qubit gate.
    pub fn controlled(name: impl Into<String>, base: &Array2<Complex64>) -> IrResult<Self> {
        let name = name.into();
        let matrix = controlled(base).map_err(|_| IrError::InvalidMatrix {
            gate_name: name.clone(),
            expected: 2,
            got: base.len(),
        })?;
        Self::from_matrix(name, 2, matrix.iter().copied().collect())
    }

    /// Check shape, arity and unitarity.
    pub fn validate(&self) -> IrResult<()> {
        if self.num_qubits == 0 || self.num_qubits > MAX_GATE_ARITY {
            return Err(IrError::InvalidGateTargets {
                gate_name: self.name.clone(),
                reason: format!(
                    "arity {} is not supported (1..={MAX_GATE_ARITY})",
                    self.num_qubits
                ),
            });
        }
        let dim = 1usize << self.num_qubits;
        if self.matrix.len() != dim * dim {
            return Err(IrError::InvalidMatrix {
                gate_name: self.name.clone(),
                expected: dim,
                got: self.matrix.len(),
            });
        }
        if !is_unitary(&self.to_array()?, UNITARY_TOLERANCE) {
            return Err(IrError::NonUnitary {
                gate_name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// The matrix as a square array.
    pub fn to_array(&self) -> IrResult<Array2<Complex64>> {
        if self.num_qubits == 0 || self.num_qubits > MAX_GATE_ARITY {
            return Err(IrError::InvalidGateTargets {
                gate_name: self.name.clone(),
                reason: format!(
                    "arity {} is not supported (1..={MAX_GATE_ARITY})",
                    self.num_qubits
                ),
            });
        }
        let dim = 1usize << self.num_qubits;
        Array2::from_shape_vec((dim, dim), self.matrix.clone()).map_err(|_| {
            IrError::InvalidMatrix {
                gate_name: self.name.clone(),
                expected: dim,
                got: self.matrix.len(),
            }
        })
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom user-defined gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }

    /// The unitary matrix of this gate.
    ///
    /// Custom matrices are re-checked, since their fields are public.
    pub fn matrix(&self) -> IrResult<Array2<Complex64>> {
        match self {
            GateKind::Standard(g) => Ok(g.matrix()),
            GateKind::Custom(g) => {
                g.validate()?;
                g.to_array()
            }
        }
    }
}

/// A gate with an optional display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Create a new gate from a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> IrResult<Array2<Complex64>> {
        self.kind.matrix()
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}
