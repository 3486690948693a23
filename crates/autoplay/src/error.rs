use rusequence_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("player {0} is not automated")]
    NotAutomated(usize),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
