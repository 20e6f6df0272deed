pub mod agent_message;
pub mod config;
pub mod error;
pub mod signal;
pub mod unified_result;
pub mod workflow;

pub use agent_message::{ResearchAnswer, SignalOutput, SignalRequest};
pub use config::{
    HedgeflowConfig, ResearchClientConfig, SignalBackend, SignalClientConfig, WorkflowConfig,
};
pub use error::ModelError;
pub use signal::{check_confidence, AgentSignal, SignalDirection, SignalReading, MAX_CONFIDENCE};
pub use unified_result::{batch_markdown, preview_reasoning, UnifiedResult};
pub use workflow::{ResearchDepth, WorkflowMode};
