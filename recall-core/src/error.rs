use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecallError {
    #[error("Graph store error: {0}")]
    Store(#[from] neo4rs::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid input: {0}")]
    Precondition(String),

    #[error("Malformed store record: {0}")]
    MalformedRecord(String),

    #[error("Exploration from seed {seed_id} failed: {source}")]
    Exploration {
        seed_id: String,
        #[source]
        source: Box<RecallError>,
    },

    #[error("Exploration cancelled")]
    Cancelled,
}

impl RecallError {
    /// Whether the retry loop should try again. Store-level failures
    /// (connection drops, timeouts) are transient; anything the connector
    /// already classified as malformed, and every local error, is not.
    pub fn is_transient(&self) -> bool {
        matches!(self, RecallError::Store(_))
    }
}
