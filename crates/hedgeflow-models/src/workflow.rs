use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Selects which flow the orchestrator runs for each symbol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowMode {
    /// Signal generator only.
    #[serde(rename = "signal")]
    SignalOnly,
    /// Research service only.
    #[serde(rename = "research")]
    ResearchOnly,
    /// Research first, then a signal informed by it.
    PreResearch,
    /// Signal first, then research explains it.
    PostResearch,
    /// Company research, informed signal, then an explanation.
    Full,
}

impl WorkflowMode {
    pub const ALL: [WorkflowMode; 5] = [
        WorkflowMode::SignalOnly,
        WorkflowMode::ResearchOnly,
        WorkflowMode::PreResearch,
        WorkflowMode::PostResearch,
        WorkflowMode::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowMode::SignalOnly => "signal",
            WorkflowMode::ResearchOnly => "research",
            WorkflowMode::PreResearch => "pre-research",
            WorkflowMode::PostResearch => "post-research",
            WorkflowMode::Full => "full",
        }
    }

    pub fn uses_signal(&self) -> bool {
        !matches!(self, WorkflowMode::ResearchOnly)
    }

    pub fn uses_research(&self) -> bool {
        !matches!(self, WorkflowMode::SignalOnly)
    }
}

impl fmt::Display for WorkflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ModelError::UnknownMode(s.to_string()))
    }
}

/// Controls only the wording of the research query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResearchDepth {
    Quick,
    Standard,
    Deep,
}

impl ResearchDepth {
    pub const ALL: [ResearchDepth; 3] = [
        ResearchDepth::Quick,
        ResearchDepth::Standard,
        ResearchDepth::Deep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchDepth::Quick => "quick",
            ResearchDepth::Standard => "standard",
            ResearchDepth::Deep => "deep",
        }
    }
}

impl fmt::Display for ResearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResearchDepth {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResearchDepth::ALL
            .into_iter()
            .find(|depth| depth.as_str() == s)
            .ok_or_else(|| ModelError::UnknownDepth(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_tags_roundtrip_through_from_str() {
        for mode in WorkflowMode::ALL {
            assert_eq!(mode.as_str().parse::<WorkflowMode>().unwrap(), mode);
        }
    }

    #[test]
    fn mode_serde_matches_tags() {
        for mode in WorkflowMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
            let parsed: WorkflowMode = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert_eq!(
            "hybrid".parse::<WorkflowMode>(),
            Err(ModelError::UnknownMode("hybrid".to_string()))
        );
        assert!("FULL".parse::<WorkflowMode>().is_err());
    }

    #[test]
    fn depth_tags() {
        for depth in ResearchDepth::ALL {
            assert_eq!(depth.as_str().parse::<ResearchDepth>().unwrap(), depth);
        }
        assert_eq!(
            serde_json::to_string(&ResearchDepth::Deep).unwrap(),
            "\"deep\""
        );
        assert!(matches!(
            "exhaustive".parse::<ResearchDepth>(),
            Err(ModelError::UnknownDepth(_))
        ));
    }

    #[test]
    fn collaborator_usage_by_mode() {
        assert!(!WorkflowMode::SignalOnly.uses_research());
        assert!(!WorkflowMode::ResearchOnly.uses_signal());
        assert!(WorkflowMode::Full.uses_signal() && WorkflowMode::Full.uses_research());
    }
}
