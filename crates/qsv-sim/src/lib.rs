//! qsv Statevector Simulator
//!
//! Exact statevector simulation of circuits built with `qsv-ir`, plus
//! Born-rule measurement sampling with reproducible seeds.
//!
//! # Features
//!
//! - **Exact Evolution**: Dense `2^n` amplitude vector, gates applied without
//!   building the full operator
//! - **All Catalog Gates**: Standard gates and custom 1-/2-qubit unitaries
//! - **Seeded Sampling**: Same seed, same counts
//! - **State Inspection**: Amplitudes, probabilities and single-qubit Bloch
//!   vectors
//!
//! Measurements are deferred to the end of the circuit: the engine never
//! collapses the state, and the sampler reads bound qubits from the final
//! distribution.
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB (default cap) |
//! | 30 | ~16 GB (hard limit) |
//!
//! # Example
//!
//! ```rust
//! use qsv_ir::Circuit;
//! use qsv_sim::Simulator;
//!
//! let circuit = Circuit::bell().unwrap();
//! let result = Simulator::new().execute(&circuit, 1000, 42).unwrap();
//!
//! // Only |00⟩ and |11⟩ are ever observed
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! ```
//!
//! Inspecting the state directly:
//!
//! ```rust
//! use qsv_ir::{Circuit, QubitId};
//! use qsv_sim::{StatevectorEngine, state_probabilities};
//!
//! let mut circuit = Circuit::with_size("plus", 1, 0);
//! circuit.h(QubitId(0)).unwrap();
//!
//! let state = StatevectorEngine::new().run(&circuit).unwrap();
//! let probs = state_probabilities(&state);
//! assert!((probs["0"] - 0.5).abs() < 1e-12);
//!
//! let [x, _, _] = state.bloch_vector(QubitId(0)).unwrap();
//! assert!((x - 1.0).abs() < 1e-12);
//! ```

pub mod algebra;
pub mod config;
pub mod engine;
pub mod error;
pub mod sampler;
pub mod simulator;
pub mod statevector;

pub use config::{DEFAULT_MAX_QUBITS, SimConfig};
pub use engine::{Evolution, Phase, StatevectorEngine, state_probabilities};
pub use error::{SimError, SimResult};
pub use sampler::{Counts, MeasurementBindings, sample, sample_with_rng};
pub use simulator::{ExecutionResult, Simulator};
pub use statevector::{MAX_QUBITS, Statevector};
