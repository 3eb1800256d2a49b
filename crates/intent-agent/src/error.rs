use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntentAgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse intent payload: {source}\n  payload: {payload}")]
    Parse {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response contained no message content")]
    MissingContent,
}
