use hedgeflow_models::ResearchDepth;

/// Build the research request text for a symbol at the given depth.
pub fn build_research_query(symbol: &str, depth: ResearchDepth) -> String {
    match depth {
        ResearchDepth::Quick => {
            format!("Give me a quick overview of {symbol}'s recent performance and outlook.")
        }
        ResearchDepth::Standard => format!(
            "Analyze {symbol} covering:\n\
             1. Recent financial performance\n\
             2. Competitive position\n\
             3. Key risks and opportunities\n\
             4. Valuation assessment\n\
             5. Investment recommendation\n"
        ),
        ResearchDepth::Deep => format!(
            "Provide an exhaustive analysis of {symbol} covering:\n\
             1. Financial performance (3-year trends)\n\
             2. Competitive landscape and market position\n\
             3. Management quality and capital allocation\n\
             4. Growth drivers and headwinds\n\
             5. Valuation analysis vs peers and history\n\
             6. Risk factors (macro, micro, regulatory)\n\
             7. Bull and bear case scenarios\n\
             8. Key metrics to monitor\n"
        ),
    }
}
