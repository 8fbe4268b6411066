use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type JobId = Uuid;
pub type SegmentId = Uuid;

/// Verified identity of the caller, as handed over by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub user_id: UserId,
    pub input_audio_url: String,
    pub audio_format: Option<String>,
    pub language: Option<String>,
    pub model: Option<String>,
    pub transcript_text: Option<String>,
    pub duration_seconds: Option<f64>,
    pub word_count: Option<i64>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: Option<JobStatus>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,
    pub job_id: JobId,
    pub order_index: i32,
    pub text: String,
    /// Seconds from the start of the audio.
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub speaker: Option<String>,
    pub confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a job. Status is always `queued` on creation.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub id: JobId,
    pub user_id: UserId,
    pub input_audio_url: String,
    pub audio_format: Option<String>,
    pub language: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSegment {
    pub id: SegmentId,
    pub order_index: i32,
    pub text: String,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub speaker: Option<String>,
    pub confidence: Option<f64>,
}

/// Partial job update. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPatch {
    pub status: Option<JobStatus>,
    pub transcript_text: Option<String>,
    pub error_message: Option<String>,
    pub duration_seconds: Option<f64>,
    pub word_count: Option<i64>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self == &JobPatch::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Row offset of the first item, capped at what SQL backends accept.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }
}

#[derive(Debug, Clone)]
pub struct JobPage {
    pub items: Vec<Job>,
    /// All jobs of the owner, across every page.
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let raw = serde_json::to_string(&JobStatus::Processing).unwrap();
        assert_eq!(raw, "\"processing\"");
        assert_eq!(JobStatus::Failed.to_string(), "failed");
        assert!(serde_json::from_str::<JobStatus>("\"cancelled\"").is_err());
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(JobPatch::default().is_empty());
        assert!(!JobPatch {
            word_count: Some(0),
            ..JobPatch::default()
        }
        .is_empty());
    }

    #[test]
    fn page_offset_starts_at_zero() {
        assert_eq!(PageRequest::new(1, 20).offset(), 0);
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
        assert_eq!(PageRequest::new(0, 0), PageRequest::new(1, 1));
    }

    #[test]
    fn page_offset_never_exceeds_a_signed_row_offset() {
        assert_eq!(PageRequest::new(u64::MAX, 100).offset(), i64::MAX as u64);
        assert_eq!(
            PageRequest::new(i64::MAX as u64, 100).offset(),
            i64::MAX as u64
        );
    }
}
