//! `stt_segments` table: immutable transcript fragments of a job.

use sea_orm::entity::prelude::*;
use stt_domain::Segment;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stt_segments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub job_id: Uuid,
    pub order_index: i32,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    /// Seconds from the start of the audio.
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub speaker: Option<String>,
    /// 0.0 - 1.0
    pub confidence: Option<f64>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Job,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> Segment {
        Segment {
            id: self.id,
            job_id: self.job_id,
            order_index: self.order_index,
            text: self.text,
            start_time: self.start_time,
            end_time: self.end_time,
            speaker: self.speaker,
            confidence: self.confidence,
            created_at: self.created_at,
        }
    }
}
