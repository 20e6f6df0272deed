use std::path::Path;

use anyhow::Context;
use hedgeflow_models::{batch_markdown, UnifiedResult};

/// Console output keeps only this many characters of a research report.
pub const CONSOLE_REPORT_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "... [truncated]";

const BANNER_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

/// Render a batch of results in the requested format.
pub fn render(results: &[UnifiedResult], format: OutputFormat) -> Result<String, anyhow::Error> {
    match format {
        OutputFormat::Console => Ok(results.iter().map(console_report).collect()),
        OutputFormat::Json => {
            let records = results
                .iter()
                .map(UnifiedResult::to_structured)
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to serialize results")?;
            serde_json::to_string_pretty(&records).context("Failed to serialize results")
        }
        OutputFormat::Markdown => Ok(batch_markdown(results)),
    }
}

/// Human-readable summary for a single result.
pub fn console_report(result: &UnifiedResult) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let mut out = format!("\n{rule}\nUNIFIED ANALYSIS: {}\n{rule}\n", result.symbol);

    if let Some(reading) = &result.signal {
        out.push_str(&format!(
            "\nSIGNAL: {} ({:.0}% confidence)\n",
            reading.direction, reading.confidence
        ));
    }

    if !result.agent_signals.is_empty() {
        out.push_str("\nAGENT SIGNALS:\n");
        for agent in &result.agent_signals {
            out.push_str(&format!(
                "  - {}: {} ({:.0}%)\n",
                agent.agent_name, agent.signal, agent.confidence
            ));
        }
    }

    if let Some(report) = &result.research_report {
        out.push_str(&format!("\nRESEARCH REPORT:\n{}\n", "-".repeat(40)));
        out.push_str(&truncate_report(report));
        out.push('\n');
    }

    if !result.recommendations.is_empty() {
        out.push_str("\nRECOMMENDATIONS:\n");
        for rec in &result.recommendations {
            out.push_str(&format!("  - {rec}\n"));
        }
    }

    out
}

fn truncate_report(report: &str) -> String {
    match report.char_indices().nth(CONSOLE_REPORT_CHARS) {
        Some((cut, _)) => format!("{}\n{TRUNCATION_MARKER}", &report[..cut]),
        None => report.to_string(),
    }
}

/// Write rendered output to a file, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &str) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write output: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedgeflow_models::{AgentSignal, SignalDirection, SignalReading, WorkflowMode};

    fn signal_result(symbol: &str) -> UnifiedResult {
        let reading = SignalReading::new(SignalDirection::Bullish, 72.0).unwrap();
        let mut result = UnifiedResult::new(symbol, WorkflowMode::SignalOnly);
        result.signal = Some(reading);
        result
            .agent_signals
            .push(AgentSignal::new("signal_generator", reading, "Momentum is strong"));
        result.recommendations.push("Watch earnings".to_string());
        result
    }

    #[test]
    fn console_shows_signal_and_agents() {
        let out = console_report(&signal_result("AAPL"));

        assert!(out.contains("UNIFIED ANALYSIS: AAPL"));
        assert!(out.contains("SIGNAL: BULLISH (72% confidence)"));
        assert!(out.contains("  - signal_generator: BULLISH (72%)"));
        assert!(out.contains("  - Watch earnings"));
        assert!(!out.contains("RESEARCH REPORT"));
    }

    #[test]
    fn console_omits_missing_signal() {
        let mut result = UnifiedResult::new("MSFT", WorkflowMode::ResearchOnly);
        result.research_report = Some("Short report".to_string());

        let out = console_report(&result);
        assert!(!out.contains("SIGNAL:"));
        assert!(!out.contains("AGENT SIGNALS"));
        assert!(out.contains("Short report"));
        assert!(!out.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn console_truncates_long_reports() {
        let mut result = UnifiedResult::new("MSFT", WorkflowMode::ResearchOnly);
        result.research_report = Some("x".repeat(CONSOLE_REPORT_CHARS + 25));

        let out = console_report(&result);
        assert!(out.contains(&"x".repeat(CONSOLE_REPORT_CHARS)));
        assert!(!out.contains(&"x".repeat(CONSOLE_REPORT_CHARS + 1)));
        assert!(out.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn report_at_limit_is_not_truncated() {
        let report = "é".repeat(CONSOLE_REPORT_CHARS);
        assert_eq!(truncate_report(&report), report);
    }

    #[test]
    fn json_is_an_array_in_input_order() {
        let results = vec![signal_result("AAPL"), signal_result("NVDA")];
        let json = render(&results, OutputFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["symbol"], "AAPL");
        assert_eq!(items[1]["symbol"], "NVDA");
    }

    #[test]
    fn empty_batch_renders_empty_json_array() {
        let json = render(&[], OutputFormat::Json).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn markdown_uses_batch_document() {
        let results = vec![signal_result("AAPL")];
        let md = render(&results, OutputFormat::Markdown).unwrap();
        assert_eq!(md, batch_markdown(&results));
    }

    #[test]
    fn write_output_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("batch.md");

        write_output(&path, "# Report").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report");
    }
}
