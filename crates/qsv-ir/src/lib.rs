//! qsv Circuit Model and Gate Catalog
//!
//! This crate provides the data structures the statevector simulator consumes:
//! qubit and classical-bit identifiers, a closed catalog of standard gates with
//! their unitary matrices, user-defined matrix gates, and an ordered circuit
//! builder. It performs no simulation.
//!
//! # Conventions
//!
//! - Qubit 0 is the least significant bit of a basis index.
//! - Multi-qubit gate matrices are indexed by the local basis index of the
//!   target list, with target `j` at bit `j`. Controlled gates take
//!   `[control, target]`.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qsv_ir::{Circuit, ClbitId, QubitId, StandardGate};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! circuit.add_gate(StandardGate::H, [QubitId(0)]).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.add_measurement(QubitId(0), ClbitId(0)).unwrap();
//! circuit.add_measurement(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `P` | 1 | Phase gate diag(1, e^{iθ}) |
//! | `CX`, `CY`, `CZ` | 2 | Controlled Pauli gates |
//! | `CP` | 2 | Controlled phase |
//! | `Swap` | 2 | SWAP gate |
//!
//! Arbitrary controlled gates are built with [`CustomGate::controlled`].

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{
    CustomGate, Gate, GateKind, MAX_GATE_ARITY, StandardGate, UNITARY_TOLERANCE, controlled,
    is_unitary,
};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
