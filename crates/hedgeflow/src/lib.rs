//! hedgeflow - unified signal and research workflow
//!
//! Sequences a trading-signal generator and a research service per workflow
//! mode and merges their outputs into one `UnifiedResult` per symbol.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use hedgeflow::models::{HedgeflowConfig, WorkflowMode, ResearchDepth, UnifiedResult};
//! use hedgeflow::agents::{Orchestrator, SignalClient, ResearchClient};
//! use hedgeflow::render::{render, OutputFormat};
//! ```

pub use hedgeflow_agents as agents;
pub use hedgeflow_models as models;

pub mod render;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use hedgeflow_agents::claude_cli::ClaudeCli;
use hedgeflow_agents::{
    AgentError, ClaudeResearchClient, ClaudeSignalClient, Orchestrator, PlaceholderSignalClient,
    ResearchClient, SignalClient,
};
use hedgeflow_models::config::{HedgeflowConfig, SignalBackend};
use hedgeflow_models::{ResearchDepth, UnifiedResult, WorkflowMode};

/// Read a TOML config file. Missing sections fall back to defaults.
pub fn load_config(path: &Path) -> Result<HedgeflowConfig, anyhow::Error> {
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Build an Orchestrator from configuration. Collaborator calls are bounded
/// by `workflow.collaborator_timeout_seconds` inside the orchestrator.
pub fn build_orchestrator(config: &HedgeflowConfig) -> Orchestrator {
    let signals: Arc<dyn SignalClient> = match config.signal.backend {
        SignalBackend::Claude => Arc::new(ClaudeSignalClient::new(
            config.signal.name.as_str(),
            ClaudeCli::new(config.signal_model()),
        )),
        SignalBackend::Placeholder => {
            Arc::new(PlaceholderSignalClient::new(config.signal.name.as_str()))
        }
    };

    let research: Arc<dyn ResearchClient> = Arc::new(ClaudeResearchClient::new(
        config.research.name.as_str(),
        ClaudeCli::new(config.research_model()),
    ));

    Orchestrator::new(signals, research, config.workflow.clone())
}

/// Run one batch of symbols through the given orchestrator.
pub async fn run(
    orchestrator: &Orchestrator,
    symbols: &[String],
    mode: Option<WorkflowMode>,
    analysts: Option<&[String]>,
    depth: Option<ResearchDepth>,
) -> Result<Vec<UnifiedResult>, AgentError> {
    orchestrator.run(symbols, mode, analysts, depth).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn placeholder_backend_only_needs_cli_for_research() {
        let mut config = HedgeflowConfig::default();
        config.signal.backend = SignalBackend::Placeholder;
        let orchestrator = build_orchestrator(&config);

        assert!(!orchestrator.requires_claude_cli(WorkflowMode::SignalOnly));
        assert!(orchestrator.requires_claude_cli(WorkflowMode::ResearchOnly));
        assert!(orchestrator.requires_claude_cli(WorkflowMode::Full));
    }

    #[test]
    fn orchestrator_keeps_workflow_defaults() {
        let mut config = HedgeflowConfig::default();
        config.workflow.default_mode = WorkflowMode::PreResearch;
        config.workflow.max_concurrent_symbols = 3;
        let orchestrator = build_orchestrator(&config);

        assert_eq!(orchestrator.config().default_mode, WorkflowMode::PreResearch);
        assert_eq!(orchestrator.config().max_concurrent_symbols, 3);
    }

    #[tokio::test]
    async fn placeholder_signal_runs_without_cli() {
        let mut config = HedgeflowConfig::default();
        config.signal.backend = SignalBackend::Placeholder;
        let orchestrator = build_orchestrator(&config);

        let symbols = vec!["AAPL".to_string()];
        let results = run(&orchestrator, &symbols, Some(WorkflowMode::SignalOnly), None, None)
            .await
            .unwrap();
        assert_eq!(results[0].confidence(), Some(50.0));
        assert_eq!(
            results[0].agent_signals[0].reasoning,
            PlaceholderSignalClient::REASONING
        );
    }

    #[test]
    fn load_config_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[workflow]\ndefault_depth = \"quick\"\n\n[signal]\nbackend = \"placeholder\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.workflow.default_depth, ResearchDepth::Quick);
        assert_eq!(config.signal.backend, SignalBackend::Placeholder);
        assert_eq!(config.workflow.default_mode, WorkflowMode::Full);
    }

    #[test]
    fn load_config_reports_bad_mode() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[workflow]\ndefault_mode = \"sideways\"").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/hedgeflow.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
