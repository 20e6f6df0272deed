use async_trait::async_trait;
use hedgeflow_models::{SignalDirection, SignalOutput, SignalRequest};
use uuid::Uuid;

use crate::claude_cli::ClaudeCli;
use crate::error::AgentError;
use crate::parser::parse_signal_output;
use crate::prompts::signal_system_prompt;

/// Produces a trading signal for a symbol. Mockable for testing.
#[async_trait]
pub trait SignalClient: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this client shells out to the `claude` CLI.
    fn uses_claude_cli(&self) -> bool {
        false
    }

    async fn generate(
        &self,
        symbol: &str,
        analysts: Option<&[String]>,
        context: Option<&str>,
    ) -> Result<SignalOutput, AgentError>;
}

/// A signal generator backed by the Claude CLI.
pub struct ClaudeSignalClient {
    pub name: String,
    pub cli: ClaudeCli,
}

impl ClaudeSignalClient {
    pub fn new(name: impl Into<String>, cli: ClaudeCli) -> Self {
        Self {
            name: name.into(),
            cli,
        }
    }
}

#[async_trait]
impl SignalClient for ClaudeSignalClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn uses_claude_cli(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        symbol: &str,
        analysts: Option<&[String]>,
        context: Option<&str>,
    ) -> Result<SignalOutput, AgentError> {
        let request = SignalRequest {
            request_id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            analysts: analysts.map(<[String]>::to_vec),
            research_context: context.map(str::to_string),
        };

        let user_prompt = serde_json::to_string(&request)?;
        let raw_output = self.cli.complete(&signal_system_prompt(), &user_prompt).await?;
        parse_signal_output(&raw_output)
    }
}

/// Stand-in generator that always answers NEUTRAL at 50% confidence.
/// Lets the workflow run end to end before a real generator is wired in.
pub struct PlaceholderSignalClient {
    pub name: String,
}

impl PlaceholderSignalClient {
    pub const REASONING: &'static str = "Connect a signal generator for real signals";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl SignalClient for PlaceholderSignalClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        _symbol: &str,
        _analysts: Option<&[String]>,
        _context: Option<&str>,
    ) -> Result<SignalOutput, AgentError> {
        Ok(SignalOutput::new(
            SignalDirection::Neutral,
            50.0,
            Self::REASONING,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn placeholder_is_neutral() {
        let client = PlaceholderSignalClient::new("placeholder");
        let output = client
            .generate("AAPL", None, Some("context is ignored"))
            .await
            .unwrap();
        assert_eq!(output.direction, SignalDirection::Neutral);
        assert_eq!(output.confidence, 50.0);
        assert_eq!(output.reasoning, PlaceholderSignalClient::REASONING);
        assert!(!client.uses_claude_cli());
    }

    #[test]
    fn claude_client_reports_cli_use() {
        let client = ClaudeSignalClient::new(
            "signal_generator",
            ClaudeCli::new("claude-3-5-haiku-latest"),
        );
        assert!(client.uses_claude_cli());
        assert_eq!(client.name(), "signal_generator");
        assert_eq!(client.cli.model(), "claude-3-5-haiku-latest");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unparseable_reply_is_a_parse_error() {
        // `echo` replies with its arguments, which carry no signal object.
        let cli = ClaudeCli::new("m").with_program("echo");
        let client = ClaudeSignalClient::new("signal_generator", cli);
        let err = client.generate("AAPL", None, None).await.unwrap_err();
        assert!(matches!(err, AgentError::Parse(_)), "{err}");
    }
}
