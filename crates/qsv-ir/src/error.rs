//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building circuits or gates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index is outside `[0, n)`.
    #[error(
        "Qubit {qubit} is out of range for a {num_qubits}-qubit circuit{}",
        format_gate_context(.gate_name)
    )]
    InvalidQubitIndex {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit index is outside `[0, m)`.
    #[error("Classical bit {clbit} is out of range for a circuit with {num_clbits} classical bits")]
    InvalidClassicalBitIndex {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        num_clbits: u32,
    },

    /// Target list does not fit the gate: wrong arity or duplicate qubits.
    #[error("Invalid targets for gate '{gate_name}': {reason}")]
    InvalidGateTargets {
        /// Name of the gate.
        gate_name: String,
        /// What is wrong with the targets.
        reason: String,
    },

    /// Gate matrix has the wrong shape for its arity.
    #[error("Matrix for gate '{gate_name}' must be {expected}x{expected}, got {got} entries")]
    InvalidMatrix {
        /// Name of the gate.
        gate_name: String,
        /// Expected dimension (2^arity).
        expected: usize,
        /// Number of entries supplied.
        got: usize,
    },

    /// Gate matrix is not unitary.
    #[error("Matrix for gate '{gate_name}' is not unitary")]
    NonUnitary {
        /// Name of the gate.
        gate_name: String,
    },

    /// JSON encoding or decoding failed.
    #[error("Circuit serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
