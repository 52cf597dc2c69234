//! Shot-based circuit execution.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument};

use qsv_ir::Circuit;

use crate::config::SimConfig;
use crate::engine::StatevectorEngine;
use crate::error::{SimError, SimResult};
use crate::sampler::{self, Counts, MeasurementBindings};

/// Result of running a circuit for a number of shots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement histogram.
    pub counts: Counts,
    /// Number of shots taken.
    pub shots: u32,
    /// Seed the sampler was started from.
    pub seed: u64,
    /// Width of the simulated register.
    pub num_qubits: usize,
    /// Wall-clock time for evolution and sampling.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result without timing information.
    pub fn new(counts: Counts, shots: u32, seed: u64, num_qubits: usize) -> Self {
        Self {
            counts,
            shots,
            seed,
            num_qubits,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs circuits to completion and samples their measurements.
///
/// Circuits without any measurement have every qubit sampled, with qubit `k`
/// read into classical bit `k`.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    engine: StatevectorEngine,
}

impl Simulator {
    /// Create a simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator with a custom configuration.
    pub fn with_config(config: SimConfig) -> SimResult<Self> {
        Ok(Self {
            engine: StatevectorEngine::with_config(config)?,
        })
    }

    /// Create a simulator from a JSON configuration value.
    pub fn from_config(value: &serde_json::Value) -> SimResult<Self> {
        Self::with_config(SimConfig::from_value(value)?)
    }

    /// The engine used for evolution.
    pub fn engine(&self) -> &StatevectorEngine {
        &self.engine
    }

    /// Evolve `circuit` and draw `shots` samples seeded by `seed`.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn execute(&self, circuit: &Circuit, shots: u32, seed: u64) -> SimResult<ExecutionResult> {
        if shots == 0 {
            return Err(SimError::InvalidShotCount(shots));
        }
        let start = Instant::now();

        debug!(
            "Running simulation: {} qubits, {} shots",
            circuit.num_qubits(),
            shots
        );

        let state = self.engine.run(circuit)?;

        let mut bindings = MeasurementBindings::from_circuit(circuit)?;
        if bindings.is_empty() {
            debug!("Circuit has no measurements, sampling all qubits");
            bindings = MeasurementBindings::all_qubits(circuit.num_qubits());
        }
        let counts = sampler::sample(&state, &bindings, shots, seed)?;

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(
            ExecutionResult::new(counts, shots, seed, circuit.num_qubits())
                .with_execution_time(elapsed.as_millis() as u64),
        )
    }
}
