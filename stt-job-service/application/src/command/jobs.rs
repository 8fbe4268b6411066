use std::sync::Arc;

use async_trait::async_trait;
use stt_domain::JobId;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppendSegmentsRequest, AppendSegmentsResponse, Command, CommandContext, CommandError,
    CommandHandler, CreateJobRequest, JobIdResponse, JobUseCase, JobWithSegmentsResponse,
    ListJobsQuery, ListJobsResponse, UpdateJobRequest,
};

#[derive(Debug, Clone)]
pub struct CreateJobCommand {
    id: Uuid,
    pub request: CreateJobRequest,
}

impl CreateJobCommand {
    pub fn new(request: CreateJobRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
        }
    }
}

impl Command for CreateJobCommand {
    type Result = JobIdResponse;

    fn command_type(&self) -> &'static str {
        "create_job"
    }

    fn command_id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CommandError> {
        self.request.validate().map_err(CommandError::from)
    }
}

pub struct CreateJobCommandHandler {
    usecase: Arc<dyn JobUseCase>,
}

impl CreateJobCommandHandler {
    pub fn new(usecase: Arc<dyn JobUseCase>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl CommandHandler<CreateJobCommand> for CreateJobCommandHandler {
    async fn handle(
        &self,
        command: CreateJobCommand,
        context: &CommandContext,
    ) -> Result<JobIdResponse, CommandError> {
        let owner = context.require_user()?;
        self.usecase
            .create_job(owner, command.request)
            .await
            .map_err(CommandError::from)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateJobCommand {
    id: Uuid,
    pub job_id: JobId,
    pub request: UpdateJobRequest,
}

impl UpdateJobCommand {
    pub fn new(job_id: JobId, request: UpdateJobRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            request,
        }
    }
}

impl Command for UpdateJobCommand {
    type Result = JobIdResponse;

    fn command_type(&self) -> &'static str {
        "update_job"
    }

    fn command_id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CommandError> {
        self.request.validate().map_err(CommandError::from)
    }
}

pub struct UpdateJobCommandHandler {
    usecase: Arc<dyn JobUseCase>,
}

impl UpdateJobCommandHandler {
    pub fn new(usecase: Arc<dyn JobUseCase>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl CommandHandler<UpdateJobCommand> for UpdateJobCommandHandler {
    async fn handle(
        &self,
        command: UpdateJobCommand,
        context: &CommandContext,
    ) -> Result<JobIdResponse, CommandError> {
        let owner = context.require_user()?;
        self.usecase
            .update_job(owner, command.job_id, command.request)
            .await
            .map_err(CommandError::from)
    }
}

#[derive(Debug, Clone)]
pub struct AppendSegmentsCommand {
    id: Uuid,
    pub job_id: JobId,
    pub request: AppendSegmentsRequest,
}

impl AppendSegmentsCommand {
    pub fn new(job_id: JobId, request: AppendSegmentsRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            request,
        }
    }
}

impl Command for AppendSegmentsCommand {
    type Result = AppendSegmentsResponse;

    fn command_type(&self) -> &'static str {
        "append_segments"
    }

    fn command_id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CommandError> {
        self.request.validate().map_err(CommandError::from)
    }
}

pub struct AppendSegmentsCommandHandler {
    usecase: Arc<dyn JobUseCase>,
}

impl AppendSegmentsCommandHandler {
    pub fn new(usecase: Arc<dyn JobUseCase>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl CommandHandler<AppendSegmentsCommand> for AppendSegmentsCommandHandler {
    async fn handle(
        &self,
        command: AppendSegmentsCommand,
        context: &CommandContext,
    ) -> Result<AppendSegmentsResponse, CommandError> {
        let owner = context.require_user()?;
        self.usecase
            .append_segments(owner, command.job_id, command.request)
            .await
            .map_err(CommandError::from)
    }
}

#[derive(Debug, Clone)]
pub struct GetJobCommand {
    id: Uuid,
    pub job_id: JobId,
}

impl GetJobCommand {
    pub fn new(job_id: JobId) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
        }
    }
}

impl Command for GetJobCommand {
    type Result = JobWithSegmentsResponse;

    fn command_type(&self) -> &'static str {
        "get_job"
    }

    fn command_id(&self) -> Uuid {
        self.id
    }
}

pub struct GetJobCommandHandler {
    usecase: Arc<dyn JobUseCase>,
}

impl GetJobCommandHandler {
    pub fn new(usecase: Arc<dyn JobUseCase>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl CommandHandler<GetJobCommand> for GetJobCommandHandler {
    async fn handle(
        &self,
        command: GetJobCommand,
        context: &CommandContext,
    ) -> Result<JobWithSegmentsResponse, CommandError> {
        let owner = context.require_user()?;
        self.usecase
            .get_job(owner, command.job_id)
            .await
            .map_err(CommandError::from)
    }
}

#[derive(Debug, Clone)]
pub struct ListJobsCommand {
    id: Uuid,
    pub query: ListJobsQuery,
}

impl ListJobsCommand {
    pub fn new(query: ListJobsQuery) -> Self {
        Self {
            id: Uuid::new_v4(),
            query,
        }
    }
}

impl Command for ListJobsCommand {
    type Result = ListJobsResponse;

    fn command_type(&self) -> &'static str {
        "list_jobs"
    }

    fn command_id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CommandError> {
        self.query.validate().map_err(CommandError::from)
    }
}

pub struct ListJobsCommandHandler {
    usecase: Arc<dyn JobUseCase>,
}

impl ListJobsCommandHandler {
    pub fn new(usecase: Arc<dyn JobUseCase>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl CommandHandler<ListJobsCommand> for ListJobsCommandHandler {
    async fn handle(
        &self,
        command: ListJobsCommand,
        context: &CommandContext,
    ) -> Result<ListJobsResponse, CommandError> {
        let owner = context.require_user()?;
        self.usecase
            .list_jobs(owner, command.query)
            .await
            .map_err(CommandError::from)
    }
}
