use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use stt_domain::{
    DomainError, Job, JobId, JobPage, JobPatch, JobRepository, NewJob, NewSegment, PageRequest,
    Segment, UserId,
};

use crate::entity::{
    job::{self, DbJobStatus},
    segment,
};

#[derive(Clone)]
pub struct SeaOrmJobRepository {
    db: DatabaseConnection,
}

impl SeaOrmJobRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn owned(id: JobId, owner: &UserId) -> Select<job::Entity> {
        job::Entity::find_by_id(id).filter(job::Column::UserId.eq(owner.as_str()))
    }
}

#[async_trait]
impl JobRepository for SeaOrmJobRepository {
    async fn create_job(&self, job: NewJob) -> Result<Job, DomainError> {
        let model = job::ActiveModel {
            id: Set(job.id),
            user_id: Set(job.user_id.as_str().to_owned()),
            input_audio_url: Set(job.input_audio_url),
            audio_format: Set(job.audio_format),
            language: Set(job.language),
            model_name: Set(job.model),
            transcript_text: Set(None),
            duration_seconds: Set(None),
            word_count: Set(None),
            completed_at: Set(None),
            status: Set(Some(DbJobStatus::Queued)),
            error_message: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(DomainError::storage)?;

        Ok(model.into_domain())
    }

    async fn find_owned_job(
        &self,
        id: JobId,
        owner: &UserId,
    ) -> Result<Option<Job>, DomainError> {
        let model = Self::owned(id, owner)
            .one(&self.db)
            .await
            .map_err(DomainError::storage)?;
        Ok(model.map(job::Model::into_domain))
    }

    async fn update_owned_job(
        &self,
        id: JobId,
        owner: &UserId,
        patch: JobPatch,
    ) -> Result<bool, DomainError> {
        if patch.is_empty() {
            return Ok(self.find_owned_job(id, owner).await?.is_some());
        }

        // One conditional UPDATE: only supplied columns are written, so
        // concurrent updates of other fields are never clobbered.
        let mut update = job::Entity::update_many()
            .filter(job::Column::Id.eq(id))
            .filter(job::Column::UserId.eq(owner.as_str()));
        if let Some(status) = patch.status {
            update = update.col_expr(
                job::Column::Status,
                Expr::value(DbJobStatus::from(status).to_value()),
            );
        }
        if let Some(text) = patch.transcript_text {
            update = update.col_expr(job::Column::TranscriptText, Expr::value(text));
        }
        if let Some(message) = patch.error_message {
            update = update.col_expr(job::Column::ErrorMessage, Expr::value(message));
        }
        if let Some(duration) = patch.duration_seconds {
            update = update.col_expr(job::Column::DurationSeconds, Expr::value(duration));
        }
        if let Some(count) = patch.word_count {
            update = update.col_expr(job::Column::WordCount, Expr::value(count));
        }
        if let Some(completed_at) = patch.completed_at {
            update = update.col_expr(job::Column::CompletedAt, Expr::value(completed_at));
        }

        let result = update.exec(&self.db).await.map_err(DomainError::storage)?;
        tracing::debug!(job_id = %id, rows = result.rows_affected, "job update applied");
        Ok(result.rows_affected > 0)
    }

    async fn insert_segments(
        &self,
        job_id: JobId,
        segments: Vec<NewSegment>,
    ) -> Result<u64, DomainError> {
        if segments.is_empty() {
            return Ok(0);
        }

        let created_at = Utc::now();
        let models = segments.into_iter().map(|segment| segment::ActiveModel {
            id: Set(segment.id),
            job_id: Set(job_id),
            order_index: Set(segment.order_index),
            text: Set(segment.text),
            start_time: Set(segment.start_time),
            end_time: Set(segment.end_time),
            speaker: Set(segment.speaker),
            confidence: Set(segment.confidence),
            created_at: Set(created_at),
        });

        segment::Entity::insert_many(models)
            .exec_without_returning(&self.db)
            .await
            .map_err(DomainError::storage)
    }

    async fn list_segments(&self, job_id: JobId) -> Result<Vec<Segment>, DomainError> {
        let models = segment::Entity::find()
            .filter(segment::Column::JobId.eq(job_id))
            .order_by_asc(segment::Column::OrderIndex)
            .order_by_asc(segment::Column::Id)
            .all(&self.db)
            .await
            .map_err(DomainError::storage)?;
        Ok(models.into_iter().map(segment::Model::into_domain).collect())
    }

    async fn list_owned_jobs(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<JobPage, DomainError> {
        let owned = job::Entity::find().filter(job::Column::UserId.eq(owner.as_str()));

        let total = owned
            .clone()
            .count(&self.db)
            .await
            .map_err(DomainError::storage)?;
        // Ids are v7 uuids, so they break created_at ties in creation order.
        let items = owned
            .order_by_desc(job::Column::CreatedAt)
            .order_by_desc(job::Column::Id)
            .offset(page.offset())
            .limit(page.page_size)
            .all(&self.db)
            .await
            .map_err(DomainError::storage)?;

        Ok(JobPage {
            items: items.into_iter().map(job::Model::into_domain).collect(),
            total,
        })
    }
}
