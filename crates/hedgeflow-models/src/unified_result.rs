use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::signal::{AgentSignal, SignalDirection, SignalReading};
use crate::workflow::WorkflowMode;

/// Reasoning longer than this is shortened in the markdown agent table.
pub const REASONING_PREVIEW_CHARS: usize = 50;

/// Separator placed between per-symbol markdown documents.
pub const MARKDOWN_DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// The per-symbol outcome of one orchestration run.
///
/// Serializes through a flat record (`signal` and `confidence` as separate
/// keys); decoding rejects a record carrying only one of the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ResultRecord", try_from = "ResultRecord")]
pub struct UnifiedResult {
    pub symbol: String,
    pub signal: Option<SignalReading>,
    /// Insertion order is call order.
    pub agent_signals: Vec<AgentSignal>,
    pub research_report: Option<String>,
    pub recommendations: Vec<String>,
    pub workflow_mode: WorkflowMode,
    /// Wall-clock seconds spent on this symbol.
    pub execution_time: f64,
    timestamp: DateTime<Utc>,
}

impl UnifiedResult {
    pub fn new(symbol: impl Into<String>, workflow_mode: WorkflowMode) -> Self {
        Self {
            symbol: symbol.into(),
            signal: None,
            agent_signals: Vec::new(),
            research_report: None,
            recommendations: Vec::new(),
            workflow_mode,
            execution_time: 0.0,
            timestamp: Utc::now(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn direction(&self) -> Option<SignalDirection> {
        self.signal.map(|s| s.direction)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.signal.map(|s| s.confidence)
    }

    /// Record the elapsed time for this symbol once its flow has returned.
    pub fn finish(&mut self, elapsed: Duration) {
        self.execution_time = elapsed.as_secs_f64();
    }

    /// Key-value projection mirroring every field.
    pub fn to_structured(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(ResultRecord::from(self.clone()))
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let signal = self
            .direction()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let confidence = self
            .confidence()
            .map(|c| format!("{c:.0}%"))
            .unwrap_or_else(|| "N/A".to_string());

        let _ = write!(
            md,
            "\n# Unified Analysis Report: {symbol}\n\n\
             **Generated:** {timestamp}\n\
             **Workflow:** {mode}\n\
             **Execution Time:** {elapsed:.2}s\n\n\
             ---\n\n\
             ## Trading Signal\n\n\
             | Metric | Value |\n\
             |--------|-------|\n\
             | **Signal** | {signal} |\n\
             | **Confidence** | {confidence} |\n\n",
            symbol = self.symbol,
            timestamp = self.timestamp.to_rfc3339(),
            mode = self.workflow_mode,
            elapsed = self.execution_time,
        );

        if !self.agent_signals.is_empty() {
            md.push_str(
                "\n## Agent Analysis\n\n\
                 | Agent | Signal | Confidence | Reasoning |\n\
                 |-------|--------|------------|-----------|\n",
            );
            for agent in &self.agent_signals {
                let _ = writeln!(
                    md,
                    "| {} | {} | {:.0}% | {} |",
                    table_cell(&agent.agent_name),
                    agent.signal,
                    agent.confidence,
                    table_cell(&preview_reasoning(&agent.reasoning)),
                );
            }
        }

        if let Some(report) = &self.research_report {
            let _ = write!(md, "\n---\n\n## Research Report\n\n{report}\n");
        }

        if !self.recommendations.is_empty() {
            md.push_str("\n---\n\n## Recommendations\n\n");
            for rec in &self.recommendations {
                let _ = writeln!(md, "- {rec}");
            }
        }

        md
    }
}

/// Render several results as one markdown document.
pub fn batch_markdown(results: &[UnifiedResult]) -> String {
    results
        .iter()
        .map(UnifiedResult::to_markdown)
        .collect::<Vec<_>>()
        .join(MARKDOWN_DOCUMENT_SEPARATOR)
}

/// Shorten reasoning for table display: the first 50 characters plus `...`
/// when the text is longer than 50 characters.
pub fn preview_reasoning(reasoning: &str) -> String {
    if reasoning.chars().count() > REASONING_PREVIEW_CHARS {
        let head: String = reasoning.chars().take(REASONING_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        reasoning.to_string()
    }
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Flat wire shape of a `UnifiedResult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultRecord {
    symbol: String,
    signal: Option<SignalDirection>,
    confidence: Option<f64>,
    agent_signals: Vec<AgentSignal>,
    research_report: Option<String>,
    recommendations: Vec<String>,
    workflow_mode: WorkflowMode,
    execution_time: f64,
    timestamp: DateTime<Utc>,
}

impl From<UnifiedResult> for ResultRecord {
    fn from(result: UnifiedResult) -> Self {
        Self {
            symbol: result.symbol,
            signal: result.signal.map(|s| s.direction),
            confidence: result.signal.map(|s| s.confidence),
            agent_signals: result.agent_signals,
            research_report: result.research_report,
            recommendations: result.recommendations,
            workflow_mode: result.workflow_mode,
            execution_time: result.execution_time,
            timestamp: result.timestamp,
        }
    }
}

impl TryFrom<ResultRecord> for UnifiedResult {
    type Error = ModelError;

    fn try_from(record: ResultRecord) -> Result<Self, Self::Error> {
        let signal = match (record.signal, record.confidence) {
            (Some(direction), Some(confidence)) => Some(SignalReading::new(direction, confidence)?),
            (None, None) => None,
            (signal, confidence) => {
                return Err(ModelError::PartialSignal {
                    signal: signal.is_some(),
                    confidence: confidence.is_some(),
                })
            }
        };

        Ok(Self {
            symbol: record.symbol,
            signal,
            agent_signals: record.agent_signals,
            research_report: record.research_report,
            recommendations: record.recommendations,
            workflow_mode: record.workflow_mode,
            execution_time: record.execution_time,
            timestamp: record.timestamp,
        })
    }
}
