use serde::{Deserialize, Serialize};

use crate::workflow::{ResearchDepth, WorkflowMode};

/// Top-level configuration for hedgeflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HedgeflowConfig {
    pub workflow: WorkflowConfig,
    pub signal: SignalClientConfig,
    pub research: ResearchClientConfig,
}

/// Defaults handed to the orchestrator at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Mode used when the caller does not choose one.
    pub default_mode: WorkflowMode,
    /// Depth used when the caller does not choose one.
    pub default_depth: ResearchDepth,
    /// Model for collaborators that do not set their own.
    pub default_model: String,
    /// Upper bound on a single collaborator call, in seconds.
    pub collaborator_timeout_seconds: u64,
    /// Symbols processed at once. 1 keeps the batch strictly sequential.
    pub max_concurrent_symbols: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            default_mode: WorkflowMode::Full,
            default_depth: ResearchDepth::Standard,
            default_model: "claude-sonnet-4-5-20250929".to_string(),
            collaborator_timeout_seconds: 120,
            max_concurrent_symbols: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SignalBackend {
    /// Ask the `claude` CLI for a signal.
    #[default]
    Claude,
    /// Fixed NEUTRAL stand-in, for wiring checks without a signal service.
    Placeholder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignalClientConfig {
    pub backend: SignalBackend,
    pub name: String,
    /// Override model. Falls back to `WorkflowConfig::default_model`.
    pub model: Option<String>,
}

impl Default for SignalClientConfig {
    fn default() -> Self {
        Self {
            backend: SignalBackend::Claude,
            name: "signal_generator".to_string(),
            model: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResearchClientConfig {
    pub name: String,
    /// Override model. Falls back to `WorkflowConfig::default_model`.
    pub model: Option<String>,
}

impl Default for ResearchClientConfig {
    fn default() -> Self {
        Self {
            name: "research_analyst".to_string(),
            model: None,
        }
    }
}

impl HedgeflowConfig {
    pub fn signal_model(&self) -> &str {
        self.signal
            .model
            .as_deref()
            .unwrap_or(&self.workflow.default_model)
    }

    pub fn research_model(&self) -> &str {
        self.research
            .model
            .as_deref()
            .unwrap_or(&self.workflow.default_model)
    }

    /// Apply command-line overrides. A model override replaces the default
    /// and clears per-client models so both collaborators use it.
    pub fn apply_overrides(&mut self, model: Option<&str>, concurrency: Option<usize>) {
        if let Some(model) = model {
            self.workflow.default_model = model.to_string();
            self.signal.model = None;
            self.research.model = None;
        }
        if let Some(concurrency) = concurrency {
            self.workflow.max_concurrent_symbols = concurrency;
        }
    }
}
