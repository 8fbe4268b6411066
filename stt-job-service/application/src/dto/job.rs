use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use stt_domain::{Job, JobId, JobStatus, Segment};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
pub const MAX_PAGE: u64 = 10_000_000;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(url)]
    pub input_audio_url: String,
    pub audio_format: Option<String>,
    pub language: Option<String>,
    pub model: Option<String>,
}

/// Fields a worker reports back. Absent (or null) fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub status: Option<JobStatus>,
    pub transcript_text: Option<String>,
    pub error_message: Option<String>,
    #[validate(range(min = 0.0))]
    pub duration_seconds: Option<f64>,
    #[validate(range(min = 0))]
    pub word_count: Option<i64>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SegmentInput {
    #[validate(range(min = 1))]
    pub order_index: i32,
    #[validate(length(min = 1))]
    pub text: String,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub speaker: Option<String>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppendSegmentsRequest {
    #[validate(length(min = 1), nested)]
    pub segments: Vec<SegmentInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = 10_000_000))]
    pub page: u64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u64,
}

impl Default for ListJobsQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobIdResponse {
    pub id: JobId,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppendSegmentsResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobWithSegmentsResponse {
    pub job: Job,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsResponse {
    pub items: Vec<Job>,
    /// Number of items in this page.
    pub count: usize,
    /// Number of jobs owned by the caller across all pages.
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn segment(order_index: i32, text: &str, confidence: Option<f64>) -> SegmentInput {
        SegmentInput {
            order_index,
            text: text.to_string(),
            start_time: None,
            end_time: None,
            speaker: None,
            confidence,
        }
    }

    #[test]
    fn create_request_requires_a_url() {
        let valid: CreateJobRequest =
            serde_json::from_value(json!({ "inputAudioUrl": "https://x/a.mp3" })).unwrap();
        assert!(valid.validate().is_ok());

        let invalid: CreateJobRequest =
            serde_json::from_value(json!({ "inputAudioUrl": "not a url" })).unwrap();
        assert!(invalid.validate().is_err());

        assert!(serde_json::from_value::<CreateJobRequest>(json!({ "language": "en" })).is_err());
    }

    #[test]
    fn update_request_rejects_unknown_status() {
        let parsed = serde_json::from_value::<UpdateJobRequest>(json!({ "status": "archived" }));
        assert!(parsed.is_err());

        let parsed: UpdateJobRequest =
            serde_json::from_value(json!({ "status": "completed" })).unwrap();
        assert_eq!(parsed.status, Some(JobStatus::Completed));
    }

    #[test]
    fn update_request_rejects_negative_measurements() {
        let negative_duration = UpdateJobRequest {
            duration_seconds: Some(-0.5),
            ..UpdateJobRequest::default()
        };
        assert!(negative_duration.validate().is_err());

        let negative_words = UpdateJobRequest {
            word_count: Some(-1),
            ..UpdateJobRequest::default()
        };
        assert!(negative_words.validate().is_err());

        let zeroes = UpdateJobRequest {
            duration_seconds: Some(0.0),
            word_count: Some(0),
            ..UpdateJobRequest::default()
        };
        assert!(zeroes.validate().is_ok());
    }

    #[test]
    fn append_request_validates_each_segment() {
        let empty = AppendSegmentsRequest { segments: vec![] };
        assert!(empty.validate().is_err());

        let ok = AppendSegmentsRequest {
            segments: vec![segment(2, "world", Some(1.0)), segment(1, "hello", Some(0.0))],
        };
        assert!(ok.validate().is_ok());

        for bad in [
            segment(0, "zero index", None),
            segment(-3, "negative index", None),
            segment(1, "", None),
            segment(1, "too confident", Some(1.01)),
            segment(1, "negative confidence", Some(-0.1)),
        ] {
            let request = AppendSegmentsRequest {
                segments: vec![segment(1, "fine", None), bad],
            };
            assert!(request.validate().is_err());
        }
    }

    #[test]
    fn list_query_defaults_and_bounds() {
        let query: ListJobsQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
        assert!(query.validate().is_ok());

        let too_large = ListJobsQuery {
            page: 1,
            page_size: MAX_PAGE_SIZE + 1,
        };
        assert!(too_large.validate().is_err());

        let zero_page = ListJobsQuery {
            page: 0,
            page_size: 10,
        };
        assert!(zero_page.validate().is_err());

        let last_page = ListJobsQuery {
            page: MAX_PAGE,
            page_size: MAX_PAGE_SIZE,
        };
        assert!(last_page.validate().is_ok());

        let huge_page: ListJobsQuery =
            serde_json::from_value(json!({ "page": u64::MAX, "pageSize": 100 })).unwrap();
        assert!(huge_page.validate().is_err());
    }

    #[test]
    fn segment_input_serializes_camel_case() {
        let raw = serde_json::to_value(segment(1, "hi", Some(0.5))).unwrap();
        assert_eq!(raw["orderIndex"], 1);
        assert_eq!(raw["confidence"], 0.5);
    }
}
