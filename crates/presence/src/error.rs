use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("invalid presence endpoint `{0}`")]
    InvalidEndpoint(String),
    #[error("presence connection failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed presence event: {0}")]
    Decode(#[from] serde_json::Error),
}
