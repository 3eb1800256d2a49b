use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvgenError {
    #[error("not initialized: run 'provgen init'")]
    NotInitialized,

    #[error("no schema for resource type: {0}")]
    SchemaNotFound(String),

    #[error("collection aborted for '{param}': {reason}")]
    CollectionAborted { param: String, reason: String },

    #[error("missing parameter '{param}' for {context}")]
    MissingParameter { context: String, param: String },

    #[error("invalid branch name '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidBranch(String),

    #[error("artifact target path '{0}' must be relative and stay inside the repository")]
    InvalidTargetPath(String),

    #[error("artifact {0} is empty: nothing to publish")]
    EmptyArtifact(&'static str),

    #[error("schema service error: {0}")]
    SchemaService(String),

    #[error("'{0}' not found on PATH")]
    MissingBinary(String),

    #[error("{program} failed: {detail}")]
    CommandFailed { program: String, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ProvgenError>;
