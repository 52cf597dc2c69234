//! Statevector evolution engine.
//!
//! A run moves through these phases:
//!
//! ```text
//!   Uninitialized ──start()──→ Initialized |0…0⟩ ──step()──→ Evolving ──finish()──→ Statevector
//!                                                 ↺ step()
//! ```
//!
//! `finish` consumes the [`Evolution`], so a finalized run has no phase left
//! to query; the returned [`Statevector`] is the final state.
//!
//! Measurements are deferred: a `Measure` instruction only records which
//! qubits were bound, and the state is never collapsed mid-circuit. Gates that
//! act on an already-measured qubit are still applied to the full state. This
//! is exact for circuits that measure at the end and is not a general
//! mid-circuit measurement simulator.

use num_complex::Complex64;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

use qsv_ir::{Circuit, Instruction, InstructionKind};

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Where an [`Evolution`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh |0…0⟩ state, no instruction consumed yet.
    Initialized,
    /// At least one instruction has been consumed.
    Evolving,
}

/// An in-progress run that exclusively owns its statevector.
pub struct Evolution {
    state: Statevector,
    scratch: Vec<Complex64>,
    phase: Phase,
    measured: FxHashSet<usize>,
    instructions: usize,
    gates_applied: usize,
}

impl Evolution {
    /// Allocate |0…0⟩ over `num_qubits`, enforcing the configured cap.
    pub fn start(num_qubits: usize, config: &SimConfig) -> SimResult<Self> {
        if num_qubits > config.max_qubits {
            return Err(SimError::StateSpaceTooLarge {
                requested: num_qubits,
                max: config.max_qubits,
            });
        }
        let state = Statevector::new(num_qubits)?;
        Ok(Self {
            scratch: Vec::with_capacity(state.dim()),
            state,
            phase: Phase::Initialized,
            measured: FxHashSet::default(),
            instructions: 0,
            gates_applied: 0,
        })
    }

    /// Consume one instruction.
    pub fn step(&mut self, instruction: &Instruction) -> SimResult<()> {
        let num_qubits = self.state.num_qubits();
        if let Some(q) = instruction.qubits.iter().find(|q| q.index() >= num_qubits) {
            return Err(SimError::InvalidQubitIndex {
                qubit: q.index(),
                num_qubits,
            });
        }

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let targets: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
                if targets.iter().any(|t| self.measured.contains(t)) {
                    debug!(
                        gate = gate.name(),
                        "gate acts on a measured qubit; measurement stays deferred"
                    );
                }
                let matrix = gate.matrix()?;
                self.state
                    .apply_matrix_with_scratch(&matrix, &targets, &mut self.scratch)?;
                self.gates_applied += 1;
                trace!(gate = gate.name(), ?targets, "applied gate");
            }
            InstructionKind::Measure => {
                for (qubit, clbit) in instruction.measurement_pairs() {
                    trace!(%qubit, %clbit, "deferred measurement binding");
                    self.measured.insert(qubit.index());
                }
            }
            InstructionKind::Barrier => {}
        }

        self.instructions += 1;
        self.phase = Phase::Evolving;
        Ok(())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The state after the instructions consumed so far.
    pub fn state(&self) -> &Statevector {
        &self.state
    }

    /// Qubits bound by a measurement so far, in ascending order.
    pub fn measured_qubits(&self) -> Vec<usize> {
        let mut qubits: Vec<_> = self.measured.iter().copied().collect();
        qubits.sort_unstable();
        qubits
    }

    /// Number of gates applied so far.
    pub fn gates_applied(&self) -> usize {
        self.gates_applied
    }

    /// Finish the run and hand out the final state.
    pub fn finish(self) -> Statevector {
        debug!(
            instructions = self.instructions,
            gates = self.gates_applied,
            "evolution finalized"
        );
        self.state
    }
}

/// Runs circuits to their final statevector.
#[derive(Debug, Clone, Default)]
pub struct StatevectorEngine {
    config: SimConfig,
}

impl StatevectorEngine {
    /// Create an engine with the default qubit cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Begin a step-by-step run of an `num_qubits`-wide register.
    pub fn start(&self, num_qubits: usize) -> SimResult<Evolution> {
        Evolution::start(num_qubits, &self.config)
    }

    /// Apply every gate of `circuit` to |0…0⟩ and return the final state.
    ///
    /// Measurement bindings and barriers leave the state untouched.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name(), num_qubits = circuit.num_qubits()))]
    pub fn run(&self, circuit: &Circuit) -> SimResult<Statevector> {
        let mut evolution = self.start(circuit.num_qubits())?;
        debug!("Circuit has {} instructions", circuit.len());

        for inst in circuit.instructions() {
            evolution.step(inst)?;
        }

        Ok(evolution.finish())
    }
}

/// Born-rule probability of every basis state, keyed by bitstring.
///
/// Keys are binary basis indices: qubit 0 is the rightmost character.
pub fn state_probabilities(state: &Statevector) -> BTreeMap<String, f64> {
    state.probability_map()
}
