use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown workflow mode: {0} (expected signal, research, pre-research, post-research or full)")]
    UnknownMode(String),

    #[error("Unknown research depth: {0} (expected quick, standard or deep)")]
    UnknownDepth(String),

    #[error("Unknown signal direction: {0} (expected BULLISH, BEARISH or NEUTRAL)")]
    UnknownDirection(String),

    #[error("Confidence {0} is outside 0-100")]
    ConfidenceOutOfRange(f64),

    #[error("Signal and confidence must be set together (signal: {signal}, confidence: {confidence})")]
    PartialSignal { signal: bool, confidence: bool },
}
