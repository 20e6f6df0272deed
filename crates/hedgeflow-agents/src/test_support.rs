//! Test support module providing scripted collaborators.
//!
//! `ScriptedSignalClient` and `ScriptedResearchClient` return canned answers,
//! can fail on a chosen call or symbol, and record every call into a shared
//! `CallLog` so tests can assert the order collaborators were reached in.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hedgeflow_models::{ResearchAnswer, SignalDirection, SignalOutput};
use tokio::sync::Mutex;

use crate::error::AgentError;
use crate::research::ResearchClient;
use crate::signal::SignalClient;

/// Ordered record of collaborator calls, shareable between clients.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, entry: impl Into<String>) {
        self.0.lock().await.push(entry.into());
    }

    pub async fn calls(&self) -> Vec<String> {
        self.0.lock().await.clone()
    }
}

/// Arguments of one `SignalClient::generate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateCall {
    pub symbol: String,
    pub analysts: Option<Vec<String>>,
    pub context: Option<String>,
}

/// Shared failure script: fail on the n-th call (1-based) or for a symbol.
#[derive(Debug, Default)]
struct FailureScript {
    calls: AtomicUsize,
    on_call: Option<usize>,
    for_symbol: Option<String>,
}

impl FailureScript {
    fn check(&self, client: &str, symbol: Option<&str>) -> Result<(), AgentError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.on_call == Some(n) {
            return Err(AgentError::Cli(format!("{client} scripted failure on call {n}")));
        }
        if let (Some(target), Some(symbol)) = (&self.for_symbol, symbol) {
            if target == symbol {
                return Err(AgentError::Cli(format!("{client} unavailable for {symbol}")));
            }
        }
        Ok(())
    }
}

pub struct ScriptedSignalClient {
    name: String,
    output: SignalOutput,
    log: CallLog,
    generate_calls: Arc<Mutex<Vec<GenerateCall>>>,
    failures: FailureScript,
    delay: Option<Duration>,
    panic_for: Option<String>,
}

impl ScriptedSignalClient {
    pub fn returning(output: SignalOutput) -> Self {
        Self {
            name: "scripted_signal".to_string(),
            output,
            log: CallLog::new(),
            generate_calls: Arc::new(Mutex::new(Vec::new())),
            failures: FailureScript::default(),
            delay: None,
            panic_for: None,
        }
    }

    pub fn neutral() -> Self {
        Self::returning(SignalOutput::new(
            SignalDirection::Neutral,
            50.0,
            "reasoning X",
        ))
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing_on_call(mut self, n: usize) -> Self {
        self.failures.on_call = Some(n);
        self
    }

    pub fn failing_for(mut self, symbol: &str) -> Self {
        self.failures.for_symbol = Some(symbol.to_string());
        self
    }

    /// Panic instead of answering for `symbol`.
    pub fn panicking_for(mut self, symbol: &str) -> Self {
        self.panic_for = Some(symbol.to_string());
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Handle on the recorded `generate` arguments.
    pub fn generate_calls(&self) -> Arc<Mutex<Vec<GenerateCall>>> {
        Arc::clone(&self.generate_calls)
    }
}

#[async_trait]
impl SignalClient for ScriptedSignalClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        symbol: &str,
        analysts: Option<&[String]>,
        context: Option<&str>,
    ) -> Result<SignalOutput, AgentError> {
        self.log.record(format!("signal.generate {symbol}")).await;
        self.generate_calls.lock().await.push(GenerateCall {
            symbol: symbol.to_string(),
            analysts: analysts.map(<[String]>::to_vec),
            context: context.map(str::to_string),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panic_for.as_deref() == Some(symbol) {
            panic!("{} scripted panic for {symbol}", self.name);
        }
        self.failures.check(&self.name, Some(symbol))?;
        Ok(self.output.clone())
    }
}

pub struct ScriptedResearchClient {
    name: String,
    answer: String,
    explanation: Option<String>,
    log: CallLog,
    failures: FailureScript,
}

impl ScriptedResearchClient {
    /// Every research method answers with `answer`.
    pub fn answering(answer: &str) -> Self {
        Self {
            name: "scripted_research".to_string(),
            answer: answer.to_string(),
            explanation: None,
            log: CallLog::new(),
            failures: FailureScript::default(),
        }
    }

    /// Use a different answer for `explain`.
    pub fn with_explanation(mut self, explanation: &str) -> Self {
        self.explanation = Some(explanation.to_string());
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn failing_on_call(mut self, n: usize) -> Self {
        self.failures.on_call = Some(n);
        self
    }

    pub fn failing_for(mut self, symbol: &str) -> Self {
        self.failures.for_symbol = Some(symbol.to_string());
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait]
impl ResearchClient for ScriptedResearchClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn research(&self, query: &str) -> Result<ResearchAnswer, AgentError> {
        let first_line = query.lines().next().unwrap_or_default();
        self.log.record(format!("research.research {first_line}")).await;
        let symbol = self
            .failures
            .for_symbol
            .as_deref()
            .filter(|s| query.contains(*s));
        self.failures.check(&self.name, symbol)?;
        Ok(ResearchAnswer::new(self.answer.clone()))
    }

    async fn analyze_company(&self, symbol: &str) -> Result<ResearchAnswer, AgentError> {
        self.log
            .record(format!("research.analyze_company {symbol}"))
            .await;
        self.failures.check(&self.name, Some(symbol))?;
        Ok(ResearchAnswer::new(self.answer.clone()))
    }

    async fn explain(
        &self,
        symbol: &str,
        direction: SignalDirection,
        confidence: f64,
        reasoning: &str,
    ) -> Result<ResearchAnswer, AgentError> {
        self.log
            .record(format!(
                "research.explain {symbol} {direction} {confidence:.0} {reasoning}"
            ))
            .await;
        self.failures.check(&self.name, Some(symbol))?;
        let answer = self.explanation.as_ref().unwrap_or(&self.answer).clone();
        Ok(ResearchAnswer::new(answer))
    }
}
