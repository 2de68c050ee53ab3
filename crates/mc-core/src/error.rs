use thiserror::Error;

#[derive(Debug, Error)]
pub enum McError {
    #[error("not initialized: run 'mc init'")]
    NotInitialized,

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("computation failed: {0}")]
    ComputeFailed(String),

    #[error("no live data and no usable cache at {0}")]
    CacheUnavailable(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl McError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, McError>;
