use thiserror::Error;

#[derive(Debug, Error)]
pub enum NcError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = NcError> = std::result::Result<T, E>;
