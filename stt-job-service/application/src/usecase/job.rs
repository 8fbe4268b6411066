use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use stt_domain::{Job, JobId, JobPatch, JobRepository, NewJob, NewSegment, PageRequest, UserId};

use crate::{
    AppendSegmentsRequest, AppendSegmentsResponse, ApplicationError, CreateJobRequest,
    JobIdResponse, JobWithSegmentsResponse, ListJobsQuery, ListJobsResponse, UpdateJobRequest,
};

/// Job operations on behalf of an already authenticated owner.
#[async_trait]
pub trait JobUseCase: Send + Sync {
    async fn create_job(
        &self,
        owner: &UserId,
        request: CreateJobRequest,
    ) -> Result<JobIdResponse, ApplicationError>;

    async fn update_job(
        &self,
        owner: &UserId,
        job_id: JobId,
        request: UpdateJobRequest,
    ) -> Result<JobIdResponse, ApplicationError>;

    async fn append_segments(
        &self,
        owner: &UserId,
        job_id: JobId,
        request: AppendSegmentsRequest,
    ) -> Result<AppendSegmentsResponse, ApplicationError>;

    async fn get_job(
        &self,
        owner: &UserId,
        job_id: JobId,
    ) -> Result<JobWithSegmentsResponse, ApplicationError>;

    async fn list_jobs(
        &self,
        owner: &UserId,
        query: ListJobsQuery,
    ) -> Result<ListJobsResponse, ApplicationError>;
}

pub struct JobUseCaseImpl {
    repository: Arc<dyn JobRepository>,
}

impl JobUseCaseImpl {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    async fn owned_job(&self, owner: &UserId, job_id: JobId) -> Result<Job, ApplicationError> {
        self.repository
            .find_owned_job(job_id, owner)
            .await?
            .ok_or(ApplicationError::JobNotFound(job_id))
    }
}

#[async_trait]
impl JobUseCase for JobUseCaseImpl {
    async fn create_job(
        &self,
        owner: &UserId,
        request: CreateJobRequest,
    ) -> Result<JobIdResponse, ApplicationError> {
        let CreateJobRequest {
            input_audio_url,
            audio_format,
            language,
            model,
        } = request;
        let id = Uuid::now_v7();
        tracing::debug!(
            job_id = %id,
            user_id = %owner,
            input_audio_url = %input_audio_url,
            language = language.as_deref().unwrap_or("unspecified"),
            "creating stt job"
        );

        let job = self
            .repository
            .create_job(NewJob {
                id,
                user_id: owner.clone(),
                input_audio_url,
                audio_format,
                language,
                model,
            })
            .await?;

        tracing::info!(job_id = %job.id, user_id = %owner, "stt job queued");
        Ok(JobIdResponse { id: job.id })
    }

    async fn update_job(
        &self,
        owner: &UserId,
        job_id: JobId,
        request: UpdateJobRequest,
    ) -> Result<JobIdResponse, ApplicationError> {
        let patch = JobPatch {
            status: request.status,
            transcript_text: request.transcript_text,
            error_message: request.error_message,
            duration_seconds: request.duration_seconds,
            word_count: request.word_count,
            completed_at: request.completed_at,
        };
        tracing::debug!(
            job_id = %job_id,
            status = patch.status.map(|status| status.as_str()).unwrap_or("unchanged"),
            "updating stt job"
        );

        if !self
            .repository
            .update_owned_job(job_id, owner, patch)
            .await?
        {
            return Err(ApplicationError::JobNotFound(job_id));
        }

        Ok(JobIdResponse { id: job_id })
    }

    async fn append_segments(
        &self,
        owner: &UserId,
        job_id: JobId,
        request: AppendSegmentsRequest,
    ) -> Result<AppendSegmentsResponse, ApplicationError> {
        self.owned_job(owner, job_id).await?;

        let segments = request
            .segments
            .into_iter()
            .map(|segment| NewSegment {
                id: Uuid::now_v7(),
                order_index: segment.order_index,
                text: segment.text,
                start_time: segment.start_time,
                end_time: segment.end_time,
                speaker: segment.speaker,
                confidence: segment.confidence,
            })
            .collect::<Vec<_>>();
        let submitted = segments.len();

        let count = self.repository.insert_segments(job_id, segments).await?;

        tracing::debug!(job_id = %job_id, submitted, inserted = count, "segments appended");
        Ok(AppendSegmentsResponse { count })
    }

    async fn get_job(
        &self,
        owner: &UserId,
        job_id: JobId,
    ) -> Result<JobWithSegmentsResponse, ApplicationError> {
        let job = self.owned_job(owner, job_id).await?;
        let segments = self.repository.list_segments(job.id).await?;
        Ok(JobWithSegmentsResponse { job, segments })
    }

    async fn list_jobs(
        &self,
        owner: &UserId,
        query: ListJobsQuery,
    ) -> Result<ListJobsResponse, ApplicationError> {
        let page = PageRequest::new(query.page, query.page_size);
        let result = self.repository.list_owned_jobs(owner, page).await?;

        tracing::debug!(
            user_id = %owner,
            page = page.page,
            page_size = page.page_size,
            returned = result.items.len(),
            total = result.total,
            "listed stt jobs"
        );

        Ok(ListJobsResponse {
            count: result.items.len(),
            items: result.items,
            total: result.total,
            page: page.page,
            page_size: page.page_size,
        })
    }
}
