use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Claude CLI error: {0}")]
    Cli(String),

    #[error("Collaborator response parse error: {0}")]
    Parse(String),

    #[error("Collaborator timed out after {0} seconds")]
    Timeout(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid collaborator data: {0}")]
    Model(#[from] hedgeflow_models::ModelError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
