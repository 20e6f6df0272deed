use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Upper bound of the confidence scale shared by every signal.
pub const MAX_CONFIDENCE: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Bullish => "BULLISH",
            SignalDirection::Bearish => "BEARISH",
            SignalDirection::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BULLISH" => Ok(SignalDirection::Bullish),
            "BEARISH" => Ok(SignalDirection::Bearish),
            "NEUTRAL" => Ok(SignalDirection::Neutral),
            _ => Err(ModelError::UnknownDirection(s.to_string())),
        }
    }
}

/// Reject confidences that are non-finite or outside `0..=100`.
pub fn check_confidence(confidence: f64) -> Result<f64, ModelError> {
    if confidence.is_finite() && (0.0..=MAX_CONFIDENCE).contains(&confidence) {
        Ok(confidence)
    } else {
        Err(ModelError::ConfidenceOutOfRange(confidence))
    }
}

/// A direction together with its confidence. Results hold this as one
/// optional value so the two are never set independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalReading {
    pub direction: SignalDirection,
    pub confidence: f64,
}

impl SignalReading {
    pub fn new(direction: SignalDirection, confidence: f64) -> Result<Self, ModelError> {
        Ok(Self {
            direction,
            confidence: check_confidence(confidence)?,
        })
    }
}

/// One rationale emitted by a contributing agent or flow step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "AgentSignalRecord")]
pub struct AgentSignal {
    pub agent_name: String,
    pub signal: SignalDirection,
    /// 0 to 100.
    pub confidence: f64,
    pub reasoning: String,
}

impl AgentSignal {
    pub fn new(
        agent_name: impl Into<String>,
        reading: SignalReading,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            signal: reading.direction,
            confidence: reading.confidence,
            reasoning: reasoning.into(),
        }
    }

    pub fn reading(&self) -> SignalReading {
        SignalReading {
            direction: self.signal,
            confidence: self.confidence,
        }
    }
}

/// Unchecked wire shape; decoding goes through `check_confidence`.
#[derive(Deserialize)]
struct AgentSignalRecord {
    agent_name: String,
    signal: SignalDirection,
    confidence: f64,
    reasoning: String,
}

impl TryFrom<AgentSignalRecord> for AgentSignal {
    type Error = ModelError;

    fn try_from(record: AgentSignalRecord) -> Result<Self, Self::Error> {
        let reading = SignalReading::new(record.signal, record.confidence)?;
        Ok(Self::new(record.agent_name, reading, record.reasoning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&SignalDirection::Bullish).unwrap(),
            "\"BULLISH\""
        );
        assert_eq!(
            serde_json::to_string(&SignalDirection::Neutral).unwrap(),
            "\"NEUTRAL\""
        );
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!(
            "bearish".parse::<SignalDirection>().unwrap(),
            SignalDirection::Bearish
        );
        assert_eq!(
            " Neutral ".parse::<SignalDirection>().unwrap(),
            SignalDirection::Neutral
        );
        assert!(matches!(
            "sideways".parse::<SignalDirection>(),
            Err(ModelError::UnknownDirection(_))
        ));
    }

    #[test]
    fn confidence_bounds() {
        assert!(check_confidence(0.0).is_ok());
        assert!(check_confidence(100.0).is_ok());
        assert!(check_confidence(72.5).is_ok());
        assert_eq!(
            check_confidence(100.5),
            Err(ModelError::ConfidenceOutOfRange(100.5))
        );
        assert!(check_confidence(-1.0).is_err());
        assert!(check_confidence(f64::NAN).is_err());
    }

    #[test]
    fn agent_signal_carries_reading() {
        let reading = SignalReading::new(SignalDirection::Bearish, 72.0).unwrap();
        let agent = AgentSignal::new("valuation", reading, "Trading above intrinsic value");
        assert_eq!(agent.signal, SignalDirection::Bearish);
        assert_eq!(agent.confidence, 72.0);
        assert_eq!(agent.reading(), reading);
    }

    #[test]
    fn decode_rejects_out_of_range_agent_confidence() {
        let json = |confidence: f64| {
            serde_json::json!({
                "agent_name": "valuation",
                "signal": "BULLISH",
                "confidence": confidence,
                "reasoning": "Cheap on earnings",
            })
        };

        let agent: AgentSignal = serde_json::from_value(json(64.0)).unwrap();
        assert_eq!(agent.confidence, 64.0);

        let err = serde_json::from_value::<AgentSignal>(json(-7.0)).unwrap_err();
        assert!(err.to_string().contains("Confidence"), "{err}");
        assert!(serde_json::from_value::<AgentSignal>(json(500.0)).is_err());
    }
}
