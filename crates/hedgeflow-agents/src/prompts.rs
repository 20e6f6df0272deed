use hedgeflow_models::SignalDirection;

/// Schema the signal generator must reply with.
fn signal_schema() -> String {
    let example = serde_json::json!({
        "direction": "BULLISH | BEARISH | NEUTRAL",
        "confidence": 65.0,
        "reasoning": "<concise rationale naming the decisive factors>"
    });
    serde_json::to_string_pretty(&example).unwrap_or_default()
}

pub fn signal_system_prompt() -> String {
    format!(
        "You are the signal generator of a hedge fund research desk. You receive a JSON \
         request with a stock `symbol`, an optional list of `analysts` whose perspectives \
         you should weigh (null = use every perspective: valuation, fundamentals, \
         technicals, sentiment, risk), and optional `research_context` produced by a \
         research analyst before you were asked.\n\n\
         ## TASK\n\n\
         Decide a trading signal for the symbol.\n\
         - BULLISH: expected to outperform over the next quarter\n\
         - BEARISH: expected to underperform over the next quarter\n\
         - NEUTRAL: no edge, or evidence is balanced\n\n\
         Confidence is a number from 0 to 100. Use 50 when evidence is evenly split. \
         Never exceed 90 without multiple independent confirming factors.\n\n\
         When `research_context` is present, ground your reasoning in it and say which \
         findings moved your decision.\n\n\
         ## OUTPUT\n\n\
         Respond ONLY with a JSON object, no other text:\n{}",
        signal_schema()
    )
}

pub fn research_system_prompt() -> String {
    "You are a financial research analyst. Answer with a well-structured markdown report. \
     Use headings for each area you cover, cite figures with their period (e.g. FY2024, \
     Q3 2025), and state clearly when information may be out of date. Finish with a short \
     section titled \"Key Takeaways\"."
        .to_string()
}

/// Prompt for the broad company analysis that opens the full workflow.
pub fn company_analysis_prompt(symbol: &str) -> String {
    format!(
        "Provide a comprehensive analysis of {symbol} covering its business model, recent \
         financial results, competitive position, growth drivers, key risks, and current \
         valuation."
    )
}

/// Prompt asking the research service to explain a signal that was already decided.
pub fn explain_signal_prompt(
    symbol: &str,
    direction: SignalDirection,
    confidence: f64,
    reasoning: &str,
) -> String {
    format!(
        "Our signal generator issued a {direction} signal on {symbol} with {confidence:.0}% \
         confidence.\n\
         Its reasoning: \"{reasoning}\"\n\n\
         Explain this decision:\n\
         1. What evidence supports the {direction} view?\n\
         2. What evidence contradicts it?\n\
         3. Which upcoming events could change the signal?\n\
         4. Is the stated confidence reasonable given the evidence?"
    )
}
