use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use hedgeflow_models::config::WorkflowConfig;
use hedgeflow_models::{AgentSignal, ResearchDepth, UnifiedResult, WorkflowMode};
use tracing::{error, info, warn};

use crate::error::AgentError;
use crate::query::build_research_query;
use crate::research::ResearchClient;
use crate::signal::SignalClient;

pub const INITIAL_RESEARCH_HEADING: &str = "## Initial Research";
pub const SIGNAL_EXPLANATION_HEADING: &str = "## Signal Explanation";

pub const PRE_RESEARCH_AGENT: &str = "Pre-Research Flow";
pub const POST_RESEARCH_AGENT: &str = "Post-Research Flow";
pub const FULL_WORKFLOW_AGENT: &str = "Full Workflow";

/// The orchestrator sequences signal and research calls per workflow mode
/// and produces one UnifiedResult per symbol.
#[derive(Clone)]
pub struct Orchestrator {
    signals: Arc<dyn SignalClient>,
    research: Arc<dyn ResearchClient>,
    config: WorkflowConfig,
}

impl Orchestrator {
    pub fn new(
        signals: Arc<dyn SignalClient>,
        research: Arc<dyn ResearchClient>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            signals,
            research,
            config,
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Whether running `mode` would shell out to the `claude` CLI.
    pub fn requires_claude_cli(&self, mode: WorkflowMode) -> bool {
        (mode.uses_signal() && self.signals.uses_claude_cli())
            || (mode.uses_research() && self.research.uses_claude_cli())
    }

    /// Run the workflow for every symbol, returning results in input order.
    ///
    /// `mode` and `depth` fall back to the configured defaults. A collaborator
    /// failure for one symbol yields a degraded result for that symbol and
    /// never stops the batch; only invalid input is returned as an error.
    pub async fn run(
        &self,
        symbols: &[String],
        mode: Option<WorkflowMode>,
        analysts: Option<&[String]>,
        depth: Option<ResearchDepth>,
    ) -> Result<Vec<UnifiedResult>, AgentError> {
        if let Some(pos) = symbols.iter().position(|s| s.trim().is_empty()) {
            return Err(AgentError::InvalidInput(format!(
                "empty symbol at position {pos}"
            )));
        }

        let mode = mode.unwrap_or(self.config.default_mode);
        let depth = depth.unwrap_or(self.config.default_depth);
        let start = Instant::now();
        info!(
            mode = %mode,
            depth = %depth,
            symbols = %symbols.join(", "),
            "Starting unified workflow"
        );

        let analysts: Option<Arc<[String]>> = analysts.map(Arc::from);
        let pending: Vec<_> = symbols
            .iter()
            .map(|symbol| self.spawn_symbol(symbol.clone(), mode, analysts.clone(), depth))
            .collect();

        let results: Vec<UnifiedResult> = stream::iter(pending)
            .buffered(self.config.max_concurrent_symbols.max(1))
            .collect()
            .await;

        info!(
            count = results.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "All analyses completed"
        );

        Ok(results)
    }

    /// One symbol on its own task. The task starts when the returned future
    /// is first polled; a panic inside it becomes a degraded result.
    fn spawn_symbol(
        &self,
        symbol: String,
        mode: WorkflowMode,
        analysts: Option<Arc<[String]>>,
        depth: ResearchDepth,
    ) -> impl Future<Output = UnifiedResult> + Send + 'static {
        let orchestrator = self.clone();
        async move {
            let start = Instant::now();
            let task_symbol = symbol.clone();
            let handle = tokio::spawn(async move {
                orchestrator
                    .run_symbol(&task_symbol, mode, analysts.as_deref(), depth)
                    .await
            });

            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    error!(symbol = %symbol, mode = %mode, error = %e, "Symbol task panicked");
                    let mut result = UnifiedResult::new(symbol.as_str(), mode);
                    result
                        .recommendations
                        .push(format!("{mode} workflow failed for {symbol}: {e}"));
                    result.finish(start.elapsed());
                    result
                }
            }
        }
    }

    async fn run_symbol(
        &self,
        symbol: &str,
        mode: WorkflowMode,
        analysts: Option<&[String]>,
        depth: ResearchDepth,
    ) -> UnifiedResult {
        let start = Instant::now();
        info!(symbol, mode = %mode, "Starting analysis");

        let mut result = UnifiedResult::new(symbol, mode);
        let outcome = match mode {
            WorkflowMode::SignalOnly => self.signal_only(&mut result, analysts).await,
            WorkflowMode::ResearchOnly => self.research_only(&mut result, depth).await,
            WorkflowMode::PreResearch => self.pre_research(&mut result, analysts, depth).await,
            WorkflowMode::PostResearch => self.post_research(&mut result, analysts).await,
            WorkflowMode::Full => self.full(&mut result, analysts).await,
        };

        if let Err(e) = &outcome {
            warn!(symbol, mode = %mode, error = %e, "Workflow failed, returning degraded result");
            result
                .recommendations
                .push(format!("{mode} workflow failed for {symbol}: {e}"));
        }

        result.finish(start.elapsed());
        info!(
            symbol,
            elapsed_ms = start.elapsed().as_millis(),
            degraded = outcome.is_err(),
            "Analysis complete"
        );
        result
    }

    async fn signal_only(
        &self,
        result: &mut UnifiedResult,
        analysts: Option<&[String]>,
    ) -> Result<(), AgentError> {
        info!(symbol = %result.symbol, client = self.signals.name(), "Generating signal");
        let output = self
            .call(self.signals.generate(&result.symbol, analysts, None))
            .await?;
        let reading = output.reading()?;

        result.signal = Some(reading);
        result
            .agent_signals
            .push(AgentSignal::new(self.signals.name(), reading, output.reasoning));
        result.recommendations = vec![
            "Signal generated without research context".to_string(),
            "Run pre-research or full mode for a research-backed signal".to_string(),
        ];
        Ok(())
    }

    async fn research_only(
        &self,
        result: &mut UnifiedResult,
        depth: ResearchDepth,
    ) -> Result<(), AgentError> {
        info!(
            symbol = %result.symbol,
            client = self.research.name(),
            depth = %depth,
            "Researching"
        );
        let query = build_research_query(&result.symbol, depth);
        let research = self.call(self.research.research(&query)).await?;

        result.research_report = Some(research.answer);
        result.recommendations = vec![
            "Review the research report for detailed analysis".to_string(),
            "Consider the key risks and opportunities identified".to_string(),
        ];
        Ok(())
    }

    async fn pre_research(
        &self,
        result: &mut UnifiedResult,
        analysts: Option<&[String]>,
        depth: ResearchDepth,
    ) -> Result<(), AgentError> {
        info!(
            symbol = %result.symbol,
            client = self.research.name(),
            depth = %depth,
            "Pre-signal research"
        );
        let query = build_research_query(&result.symbol, depth);
        let research = self.call(self.research.research(&query)).await?;
        result.research_report = Some(research.answer.clone());

        info!(symbol = %result.symbol, "Generating signal with research context");
        let output = self
            .call(
                self.signals
                    .generate(&result.symbol, analysts, Some(&research.answer)),
            )
            .await?;
        let reading = output.reading()?;

        result.signal = Some(reading);
        result
            .agent_signals
            .push(AgentSignal::new(PRE_RESEARCH_AGENT, reading, output.reasoning));
        result.recommendations = vec![
            "Pre-research complete".to_string(),
            "Research context was passed to the signal generator".to_string(),
        ];
        Ok(())
    }

    async fn post_research(
        &self,
        result: &mut UnifiedResult,
        analysts: Option<&[String]>,
    ) -> Result<(), AgentError> {
        info!(symbol = %result.symbol, "Generating signal");
        let output = self
            .call(self.signals.generate(&result.symbol, analysts, None))
            .await?;
        let reading = output.reading()?;
        result.signal = Some(reading);
        result.agent_signals.push(AgentSignal::new(
            POST_RESEARCH_AGENT,
            reading,
            output.reasoning.clone(),
        ));

        info!(
            symbol = %result.symbol,
            client = self.research.name(),
            signal = %reading.direction,
            "Explaining signal"
        );
        let explanation = self
            .call(self.research.explain(
                &result.symbol,
                reading.direction,
                reading.confidence,
                &output.reasoning,
            ))
            .await?;

        result.research_report = Some(explanation.answer);
        result.recommendations = vec![
            format!(
                "Signal: {} with {:.0}% confidence",
                reading.direction, reading.confidence
            ),
            "See research report for detailed explanation".to_string(),
        ];
        Ok(())
    }

    async fn full(
        &self,
        result: &mut UnifiedResult,
        analysts: Option<&[String]>,
    ) -> Result<(), AgentError> {
        info!(symbol = %result.symbol, client = self.research.name(), "Initial research");
        let initial = self
            .call(self.research.analyze_company(&result.symbol))
            .await?;
        result.research_report = Some(initial_research_section(&initial.answer));

        info!(symbol = %result.symbol, "Generating signal with research context");
        let output = self
            .call(
                self.signals
                    .generate(&result.symbol, analysts, Some(&initial.answer)),
            )
            .await?;
        let reading = output.reading()?;
        result.signal = Some(reading);
        result.agent_signals.push(AgentSignal::new(
            FULL_WORKFLOW_AGENT,
            reading,
            output.reasoning.clone(),
        ));

        info!(
            symbol = %result.symbol,
            client = self.research.name(),
            signal = %reading.direction,
            "Explaining signal"
        );
        let explanation = self
            .call(self.research.explain(
                &result.symbol,
                reading.direction,
                reading.confidence,
                &output.reasoning,
            ))
            .await?;

        result.research_report = Some(compose_full_report(&initial.answer, &explanation.answer));
        result.recommendations = vec![
            "Full workflow completed".to_string(),
            "Pre-research informed the signal".to_string(),
            "Post-research explained the decision".to_string(),
        ];
        Ok(())
    }

    /// Bound one collaborator call by the configured timeout.
    async fn call<T, F>(&self, fut: F) -> Result<T, AgentError>
    where
        F: Future<Output = Result<T, AgentError>>,
    {
        let secs = self.config.collaborator_timeout_seconds;
        tokio::time::timeout(Duration::from_secs(secs), fut)
            .await
            .map_err(|_| AgentError::Timeout(secs))?
    }
}

fn initial_research_section(initial: &str) -> String {
    format!("{INITIAL_RESEARCH_HEADING}\n\n{initial}\n")
}

/// Join the opening research and the signal explanation into one report.
pub fn compose_full_report(initial: &str, explanation: &str) -> String {
    format!(
        "{INITIAL_RESEARCH_HEADING}\n\n{initial}\n\n---\n\n{SIGNAL_EXPLANATION_HEADING}\n\n{explanation}\n"
    )
}
