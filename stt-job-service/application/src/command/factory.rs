use std::sync::Arc;

use crate::{
    AppendSegmentsCommand, AppendSegmentsCommandHandler, CommandRegistry, CommandRegistryBuilder,
    CreateJobCommand, CreateJobCommandHandler, GetJobCommand, GetJobCommandHandler, JobUseCase,
    ListJobsCommand, ListJobsCommandHandler, UpdateJobCommand, UpdateJobCommandHandler,
};

pub struct JobCommandRegistryFactory;

impl JobCommandRegistryFactory {
    pub fn create_registry(usecase: Arc<dyn JobUseCase>) -> CommandRegistry {
        CommandRegistryBuilder::new()
            .register::<CreateJobCommand, _>(
                "create_job".to_string(),
                Arc::new(CreateJobCommandHandler::new(usecase.clone())),
            )
            .register::<UpdateJobCommand, _>(
                "update_job".to_string(),
                Arc::new(UpdateJobCommandHandler::new(usecase.clone())),
            )
            .register::<AppendSegmentsCommand, _>(
                "append_segments".to_string(),
                Arc::new(AppendSegmentsCommandHandler::new(usecase.clone())),
            )
            .register::<GetJobCommand, _>(
                "get_job".to_string(),
                Arc::new(GetJobCommandHandler::new(usecase.clone())),
            )
            .register::<ListJobsCommand, _>(
                "list_jobs".to_string(),
                Arc::new(ListJobsCommandHandler::new(usecase)),
            )
            .build()
    }
}
