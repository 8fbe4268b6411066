mod health;
mod jobs;

pub use health::health_check;
pub use jobs::{append_segments, create_job, get_job, list_jobs, update_job};
