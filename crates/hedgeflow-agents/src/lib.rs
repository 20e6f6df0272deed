pub mod claude_cli;
pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod query;
pub mod research;
pub mod signal;

pub mod test_support;

pub use error::AgentError;
pub use orchestrator::{compose_full_report, Orchestrator};
pub use query::build_research_query;
pub use research::{ClaudeResearchClient, ResearchClient};
pub use signal::{ClaudeSignalClient, PlaceholderSignalClient, SignalClient};
