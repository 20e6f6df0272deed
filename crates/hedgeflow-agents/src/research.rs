use async_trait::async_trait;
use hedgeflow_models::{ResearchAnswer, SignalDirection};

use crate::claude_cli::ClaudeCli;
use crate::error::AgentError;
use crate::prompts::{company_analysis_prompt, explain_signal_prompt, research_system_prompt};

/// The research/explanation service. Mockable for testing.
#[async_trait]
pub trait ResearchClient: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this client shells out to the `claude` CLI.
    fn uses_claude_cli(&self) -> bool {
        false
    }

    /// Answer a free-text research query.
    async fn research(&self, query: &str) -> Result<ResearchAnswer, AgentError>;

    /// Broad analysis of one company.
    async fn analyze_company(&self, symbol: &str) -> Result<ResearchAnswer, AgentError>;

    /// Explain a signal decision that was already made.
    async fn explain(
        &self,
        symbol: &str,
        direction: SignalDirection,
        confidence: f64,
        reasoning: &str,
    ) -> Result<ResearchAnswer, AgentError>;
}

/// A research analyst backed by the Claude CLI.
pub struct ClaudeResearchClient {
    pub name: String,
    pub cli: ClaudeCli,
}

impl ClaudeResearchClient {
    pub fn new(name: impl Into<String>, cli: ClaudeCli) -> Self {
        Self {
            name: name.into(),
            cli,
        }
    }

    async fn ask(&self, prompt: &str) -> Result<ResearchAnswer, AgentError> {
        let answer = self.cli.complete(&research_system_prompt(), prompt).await?;
        Ok(ResearchAnswer::new(answer))
    }
}

#[async_trait]
impl ResearchClient for ClaudeResearchClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn uses_claude_cli(&self) -> bool {
        true
    }

    async fn research(&self, query: &str) -> Result<ResearchAnswer, AgentError> {
        self.ask(query).await
    }

    async fn analyze_company(&self, symbol: &str) -> Result<ResearchAnswer, AgentError> {
        self.ask(&company_analysis_prompt(symbol)).await
    }

    async fn explain(
        &self,
        symbol: &str,
        direction: SignalDirection,
        confidence: f64,
        reasoning: &str,
    ) -> Result<ResearchAnswer, AgentError> {
        self.ask(&explain_signal_prompt(symbol, direction, confidence, reasoning))
            .await
    }
}
