//! Simulator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::statevector::MAX_QUBITS;

/// Default register cap: 2^24 amplitudes is 256 MiB.
pub const DEFAULT_MAX_QUBITS: usize = 24;

/// Tunable limits for the statevector engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Largest circuit width the engine will allocate a statevector for.
    pub max_qubits: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

impl SimConfig {
    /// Config with a custom qubit cap.
    pub fn with_max_qubits(max_qubits: usize) -> SimResult<Self> {
        let config = Self { max_qubits };
        config.validate()?;
        Ok(config)
    }

    /// Read a config from a JSON value, ignoring unknown keys.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_value(value: &serde_json::Value) -> SimResult<Self> {
        let config: Self = serde_json::from_value(value.clone())
            .map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config from a JSON string.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Check the cap against the hard ceiling.
    pub fn validate(&self) -> SimResult<()> {
        if self.max_qubits > MAX_QUBITS {
            return Err(SimError::Config(format!(
                "max_qubits {} exceeds the hard limit of {MAX_QUBITS}",
                self.max_qubits
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_cap() {
        assert_eq!(SimConfig::default().max_qubits, 24);
    }

    #[test]
    fn test_from_value() {
        let config = SimConfig::from_value(&json!({ "max_qubits": 12, "label": "local" })).unwrap();
        assert_eq!(config.max_qubits, 12);

        let config = SimConfig::from_value(&json!({})).unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_rejects_cap_above_ceiling() {
        assert!(matches!(
            SimConfig::from_json(r#"{"max_qubits": 40}"#),
            Err(SimError::Config(_))
        ));
        assert!(SimConfig::with_max_qubits(MAX_QUBITS + 1).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SimConfig::from_json("{max_qubits"),
            Err(SimError::Config(_))
        ));
        assert!(matches!(
            SimConfig::from_value(&json!({ "max_qubits": "many" })),
            Err(SimError::Config(_))
        ));
    }
}
