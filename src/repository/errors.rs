use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to decode car document: {0}")]
    Decode(#[from] serde_json::Error),
}
