use hedgeflow_models::{SignalDirection, SignalOutput};
use serde::Deserialize;

use crate::error::AgentError;

/// Extract the first JSON object from a string that may contain surrounding text.
///
/// Handles common Claude response formats:
/// - Clean JSON: `{"key": "value"}`
/// - Markdown-wrapped: ```json\n{"key": "value"}\n```
/// - Prefix text: `Here is the signal:\n{"key": "value"}`
pub fn extract_json(text: &str) -> Result<serde_json::Value, AgentError> {
    for (start, _) in text.match_indices('{') {
        let mut stream =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<serde_json::Value>();
        if let Some(Ok(value)) = stream.next() {
            if value.is_object() {
                return Ok(value);
            }
        }
    }

    Err(AgentError::Parse(format!(
        "No valid JSON object found in response (length={})",
        text.len()
    )))
}

/// Shape the signal generator is asked to reply with. Direction is kept as
/// text so casing differences do not fail the whole reply.
#[derive(Debug, Deserialize)]
struct RawSignal {
    #[serde(alias = "signal")]
    direction: String,
    confidence: f64,
    reasoning: String,
}

/// Parse and validate a signal decision from raw Claude CLI output.
pub fn parse_signal_output(raw: &str) -> Result<SignalOutput, AgentError> {
    let value = extract_json(raw)?;
    let parsed: RawSignal = serde_json::from_value(value)
        .map_err(|e| AgentError::Parse(format!("Failed to parse signal: {e}")))?;

    let direction: SignalDirection = parsed.direction.parse()?;
    let output = SignalOutput::new(direction, parsed.confidence, parsed.reasoning);
    output.reading()?;
    Ok(output)
}
