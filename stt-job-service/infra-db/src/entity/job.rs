//! `stt_jobs` table: one row per transcription request.

use sea_orm::entity::prelude::*;
use stt_domain::{Job, JobStatus, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DbJobStatus {
    #[sea_orm(string_value = "queued")]
    Queued,
    #[sea_orm(string_value = "processing")]
    Processing,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl From<JobStatus> for DbJobStatus {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Queued => DbJobStatus::Queued,
            JobStatus::Processing => DbJobStatus::Processing,
            JobStatus::Completed => DbJobStatus::Completed,
            JobStatus::Failed => DbJobStatus::Failed,
        }
    }
}

impl From<DbJobStatus> for JobStatus {
    fn from(status: DbJobStatus) -> Self {
        match status {
            DbJobStatus::Queued => JobStatus::Queued,
            DbJobStatus::Processing => JobStatus::Processing,
            DbJobStatus::Completed => JobStatus::Completed,
            DbJobStatus::Failed => JobStatus::Failed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stt_jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owner; every lookup filters on it.
    #[sea_orm(indexed)]
    pub user_id: String,
    #[sea_orm(column_type = "Text")]
    pub input_audio_url: String,
    pub audio_format: Option<String>,
    pub language: Option<String>,
    #[sea_orm(column_name = "model")]
    pub model_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub transcript_text: Option<String>,
    pub duration_seconds: Option<f64>,
    pub word_count: Option<i64>,
    pub completed_at: Option<DateTimeUtc>,
    pub status: Option<DbJobStatus>,
    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::segment::Entity")]
    Segments,
}

impl Related<super::segment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Segments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> Job {
        Job {
            id: self.id,
            user_id: UserId::new(self.user_id),
            input_audio_url: self.input_audio_url,
            audio_format: self.audio_format,
            language: self.language,
            model: self.model_name,
            transcript_text: self.transcript_text,
            duration_seconds: self.duration_seconds,
            word_count: self.word_count,
            completed_at: self.completed_at,
            status: self.status.map(JobStatus::from),
            error_message: self.error_message,
            created_at: self.created_at,
        }
    }
}
