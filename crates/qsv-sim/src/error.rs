//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by statevector evolution and sampling.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A gate or measurement references a qubit outside the register.
    #[error("Qubit {qubit} is out of range for a {num_qubits}-qubit statevector")]
    InvalidQubitIndex {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the statevector.
        num_qubits: usize,
    },

    /// A measurement binding targets a classical bit outside the register.
    #[error("Classical bit {clbit} is out of range for {num_clbits} classical bits")]
    InvalidClassicalBitIndex {
        /// The offending classical bit index.
        clbit: usize,
        /// Width of the classical register.
        num_clbits: usize,
    },

    /// Duplicate targets, or a matrix that does not match its targets.
    #[error("Invalid gate targets: {0}")]
    InvalidGateTargets(String),

    /// Shot count must be at least 1.
    #[error("Shot count must be at least 1, got {0}")]
    InvalidShotCount(u32),

    /// The requested register would exceed the configured qubit cap.
    #[error("{requested} qubits requested but the simulator is capped at {max}")]
    StateSpaceTooLarge {
        /// Qubits requested.
        requested: usize,
        /// Configured cap.
        max: usize,
    },

    /// Supplied amplitudes do not form a valid statevector.
    #[error("Invalid amplitudes: {0}")]
    InvalidAmplitudes(String),

    /// Simulator configuration could not be parsed or is out of range.
    #[error("Invalid simulator configuration: {0}")]
    Config(String),

    /// JSON encoding of a result failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Circuit builder or gate catalog returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qsv_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
