use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn storage(error: impl Display) -> Self {
        Self::Storage(error.to_string())
    }
}
