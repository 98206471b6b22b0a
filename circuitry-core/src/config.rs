//! Evaluator configuration.

use serde::{Deserialize, Serialize};

/// Options for an evaluation pass.
///
/// Missing fields take their default when parsed from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Value given to a gate or output with no inputs.
    pub unconnected_value: bool,

    /// Whether output nodes produce [`OutputEvent`](crate::eval::OutputEvent)s.
    pub emit_output_events: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            unconnected_value: false,
            emit_output_events: true,
        }
    }
}

impl EvalConfig {
    /// Configuration that resolves silently: no output events.
    pub fn quiet() -> Self {
        Self {
            emit_output_events: false,
            ..Self::default()
        }
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
