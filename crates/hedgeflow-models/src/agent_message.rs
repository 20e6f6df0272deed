use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;
use crate::signal::{SignalDirection, SignalReading};

/// Request sent to a signal generator (serialized as JSON to the Claude CLI).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalRequest {
    pub request_id: Uuid,
    pub symbol: String,
    /// Analysts to consult. None = all of them.
    pub analysts: Option<Vec<String>>,
    /// Research gathered before the signal was requested.
    pub research_context: Option<String>,
}

/// A signal generator's decision for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalOutput {
    pub direction: SignalDirection,
    /// 0 to 100.
    pub confidence: f64,
    pub reasoning: String,
}

impl SignalOutput {
    pub fn new(direction: SignalDirection, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            direction,
            confidence,
            reasoning: reasoning.into(),
        }
    }

    /// The validated direction/confidence pair.
    pub fn reading(&self) -> Result<SignalReading, ModelError> {
        SignalReading::new(self.direction, self.confidence)
    }
}

/// Text answer from the research service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchAnswer {
    pub answer: String,
}

impl ResearchAnswer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}
