use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("State database lock poisoned")]
    LockPoisoned,
}
