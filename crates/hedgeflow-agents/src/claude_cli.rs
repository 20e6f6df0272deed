use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::AgentError;

pub const CLAUDE_PROGRAM: &str = "claude";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// One-shot, plain-text completions through the `claude` executable.
///
/// Calls are not time-bounded here. The orchestrator bounds each collaborator
/// call, and dropping an in-flight completion kills the child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaudeCli {
    program: String,
    model: String,
}

impl Default for ClaudeCli {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl ClaudeCli {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            program: CLAUDE_PROGRAM.to_string(),
            model: model.into(),
        }
    }

    /// Run a different executable with the same arguments.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one system + user prompt pair and return the trimmed reply.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AgentError> {
        debug!(
            program = %self.program,
            model = %self.model,
            prompt_len = user_prompt.len(),
            "Requesting completion"
        );

        let output = Command::new(&self.program)
            .args(self.args(system_prompt, user_prompt))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AgentError::Cli(format!("Failed to spawn {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(program = %self.program, status = %output.status, stderr = %stderr, "Completion failed");
            return Err(AgentError::Cli(format!(
                "{} exited {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let reply = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if reply.is_empty() {
            return Err(AgentError::Cli(format!("{} returned no output", self.program)));
        }
        Ok(reply)
    }

    fn args<'a>(&'a self, system_prompt: &'a str, user_prompt: &'a str) -> [&'a str; 8] {
        [
            "-p",
            user_prompt,
            "--system-prompt",
            system_prompt,
            "--model",
            self.model.as_str(),
            "--output-format",
            "text",
        ]
    }
}

/// Check if the `claude` CLI is available on the system.
pub async fn check_cli_available() -> bool {
    Command::new(CLAUDE_PROGRAM)
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}
