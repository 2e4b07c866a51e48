use serde::Serialize;

use crate::models::qr_code::QrRecord;
use crate::models::qr_params::QrParameters;

/// Lifecycle of a single generation request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationState {
    #[default]
    Idle,
    Generating { parameters: QrParameters },
    Ready { record: QrRecord },
    Failed { reason: String },
}

impl GenerationState {
    pub fn is_generating(&self) -> bool {
        matches!(self, GenerationState::Generating { .. })
    }

    pub fn record(&self) -> Option<&QrRecord> {
        match self {
            GenerationState::Ready { record } => Some(record),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GenerationState::Idle => "idle",
            GenerationState::Generating { .. } => "generating",
            GenerationState::Ready { .. } => "ready",
            GenerationState::Failed { .. } => "failed",
        }
    }
}
