use stt_domain::{DomainError, JobId};
use thiserror::Error;

use crate::command::{codes, CommandError};

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("job {0} not found")]
    JobNotFound(JobId),
}

impl From<ApplicationError> for CommandError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::JobNotFound(_) => {
                CommandError::business(codes::NOT_FOUND, "job not found")
            }
            ApplicationError::Domain(err) => {
                CommandError::infrastructure(codes::INTERNAL_ERROR, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn missing_job_maps_to_not_found_without_leaking_the_id() {
        let id = Uuid::now_v7();
        let error = CommandError::from(ApplicationError::JobNotFound(id));
        assert_eq!(error.code(), codes::NOT_FOUND);
        assert!(!error.message().contains(&id.to_string()));
    }

    #[test]
    fn storage_failures_map_to_infrastructure() {
        let error = CommandError::from(ApplicationError::Domain(DomainError::storage("db down")));
        assert!(matches!(error, CommandError::Infrastructure { .. }));
        assert_eq!(error.code(), codes::INTERNAL_ERROR);
    }
}
