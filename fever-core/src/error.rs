use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server rejected the api key")]
    Auth,
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("feed {0} does not exist on the server")]
    FeedNotFound(i64),
}
