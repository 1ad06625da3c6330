use serde::{Deserialize, Serialize};

/// Per-unit failure collected during a recalculation batch. Non-fatal: the
/// batch continues with the remaining units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecalcError {
    pub unit_id: String,
    pub identifier: String,
    pub message: String,
}

/// Outcome of a recalculation batch. `failed > 0` is surfaced to the operator
/// as a warning alongside the success count, never as a hard error.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecalcResult {
    pub parameter_set_id: String,
    pub updated: usize,
    pub failed: usize,
    pub errors: Vec<RecalcError>,
}
