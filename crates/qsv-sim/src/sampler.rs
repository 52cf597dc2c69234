//! Measurement sampling from a finalized statevector.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use qsv_ir::{Circuit, ClbitId, QubitId};

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Which qubit is read into which classical bit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasurementBindings {
    num_clbits: usize,
    bindings: Vec<(QubitId, ClbitId)>,
}

impl MeasurementBindings {
    /// Empty bindings over a classical register of `num_clbits` bits.
    pub fn new(num_clbits: usize) -> Self {
        Self {
            num_clbits,
            bindings: Vec::new(),
        }
    }

    /// Bind `qubit` to `clbit`. A later binding of the same clbit wins.
    pub fn bind(&mut self, qubit: QubitId, clbit: ClbitId) -> SimResult<&mut Self> {
        if clbit.index() >= self.num_clbits {
            return Err(SimError::InvalidClassicalBitIndex {
                clbit: clbit.index(),
                num_clbits: self.num_clbits,
            });
        }
        self.bindings.push((qubit, clbit));
        Ok(self)
    }

    /// The measurement bindings of `circuit`, in instruction order.
    pub fn from_circuit(circuit: &Circuit) -> SimResult<Self> {
        let mut bindings = Self::new(circuit.num_clbits());
        for (qubit, clbit) in circuit.measurement_bindings() {
            bindings.bind(qubit, clbit)?;
        }
        Ok(bindings)
    }

    /// Qubit `k` read into classical bit `k` for every `k < num_qubits`.
    pub fn all_qubits(num_qubits: usize) -> Self {
        Self {
            num_clbits: num_qubits,
            bindings: (0..num_qubits as u32)
                .map(|k| (QubitId(k), ClbitId(k)))
                .collect(),
        }
    }

    /// Width of the classical register.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// The bindings in the order they were added.
    pub fn bindings(&self) -> &[(QubitId, ClbitId)] {
        &self.bindings
    }

    /// True if no qubit is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Render a basis index as a classical bitstring.
    ///
    /// Classical bit 0 is the rightmost character; unbound bits read `'0'`.
    pub fn bitstring(&self, basis_index: usize) -> String {
        let mut bits = vec!['0'; self.num_clbits];
        // `bind` keeps every clbit below `num_clbits`
        for (qubit, clbit) in &self.bindings {
            bits[self.num_clbits - 1 - clbit.index()] = if basis_index & qubit.mask() != 0 {
                '1'
            } else {
                '0'
            };
        }
        bits.into_iter().collect()
    }

    fn check_qubits(&self, num_qubits: usize) -> SimResult<()> {
        match self.bindings.iter().find(|(q, _)| q.index() >= num_qubits) {
            Some((q, _)) => Err(SimError::InvalidQubitIndex {
                qubit: q.index(),
                num_qubits,
            }),
            None => Ok(()),
        }
    }
}

/// Measurement outcome histogram: bitstring to number of shots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from `(bitstring, count)` pairs.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, u64)>) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in pairs {
            counts.insert(bitstring, count);
        }
        counts
    }

    /// Add `count` shots to `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Shots observed for `bitstring` (0 if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no shots were recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over outcomes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Outcomes by descending count, ties broken by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome; the smallest bitstring wins a tie.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts
            .iter()
            .max_by_key(|(bitstring, count)| (**count, Reverse(*bitstring)))
    }

    /// Relative frequency of each outcome.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total_shots();
        if total == 0 {
            return BTreeMap::new();
        }
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Counts {
    type Item = (&'a String, &'a u64);
    type IntoIter = std::collections::hash_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Draw `shots` samples with a generator seeded from `seed`.
///
/// The same state, bindings, shots and seed always give the same counts.
pub fn sample(
    state: &Statevector,
    bindings: &MeasurementBindings,
    shots: u32,
    seed: u64,
) -> SimResult<Counts> {
    let mut rng = StdRng::seed_from_u64(seed);
    sample_with_rng(state, bindings, shots, &mut rng)
}

/// Draw `shots` samples using the caller's random number generator.
///
/// Each shot picks a basis index with probability `|a_i|^2` by inverting the
/// cumulative distribution, then reads the bound qubits into their classical
/// bits. The statevector is not modified.
#[instrument(skip(state, bindings, rng), fields(num_qubits = state.num_qubits()))]
pub fn sample_with_rng<R: Rng>(
    state: &Statevector,
    bindings: &MeasurementBindings,
    shots: u32,
    rng: &mut R,
) -> SimResult<Counts> {
    if shots == 0 {
        return Err(SimError::InvalidShotCount(shots));
    }
    bindings.check_qubits(state.num_qubits())?;

    let mut cdf = Vec::with_capacity(state.dim());
    let mut acc = 0.0;
    let mut last_nonzero = 0;
    for (i, a) in state.amplitudes().iter().enumerate() {
        let p = a.norm_sqr();
        if p > 0.0 {
            last_nonzero = i;
        }
        acc += p;
        cdf.push(acc);
    }
    let total = acc;

    let mut outcomes: FxHashMap<usize, u64> = FxHashMap::default();
    for _ in 0..shots {
        let r = rng.r#gen::<f64>() * total;
        let index = cdf.partition_point(|&c| c <= r).min(last_nonzero);
        *outcomes.entry(index).or_insert(0) += 1;
    }

    let mut counts = Counts::new();
    for (index, n) in outcomes {
        counts.insert(bindings.bitstring(index), n);
    }

    debug!(
        shots,
        distinct = counts.len(),
        "sampled {} bound classical bits",
        bindings.num_clbits()
    );
    Ok(counts)
}
