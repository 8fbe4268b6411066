mod job;

pub use job::{JobUseCase, JobUseCaseImpl};
