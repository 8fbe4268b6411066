use async_trait::async_trait;

use crate::{
    DomainError, Job, JobId, JobPage, JobPatch, NewJob, NewSegment, PageRequest, Segment, UserId,
};

/// Relational access to jobs and their segments.
///
/// Every job lookup is filtered by owner; a job owned by someone else is
/// reported exactly like a job that does not exist.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create_job(&self, job: NewJob) -> Result<Job, DomainError>;

    async fn find_owned_job(&self, id: JobId, owner: &UserId)
        -> Result<Option<Job>, DomainError>;

    /// Applies only the fields present in `patch`. Returns `false` when no
    /// job matched the (id, owner) filter.
    async fn update_owned_job(
        &self,
        id: JobId,
        owner: &UserId,
        patch: JobPatch,
    ) -> Result<bool, DomainError>;

    async fn insert_segments(
        &self,
        job_id: JobId,
        segments: Vec<NewSegment>,
    ) -> Result<u64, DomainError>;

    /// Segments of a job, ascending by order index.
    async fn list_segments(&self, job_id: JobId) -> Result<Vec<Segment>, DomainError>;

    /// Newest-first page of the owner's jobs.
    async fn list_owned_jobs(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<JobPage, DomainError>;
}
