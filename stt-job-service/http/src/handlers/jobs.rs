use axum::{extract::State, http::StatusCode, response::Json};
use stt_application::{
    AppendSegmentsCommand, AppendSegmentsRequest, AppendSegmentsResponse, Command,
    CommandContext, CreateJobCommand, CreateJobRequest, GetJobCommand, JobIdResponse,
    JobWithSegmentsResponse, ListJobsCommand, ListJobsQuery, ListJobsResponse, UpdateJobCommand,
    UpdateJobRequest,
};
use stt_domain::UserId;

use crate::{
    error::{error_mapper, HttpError},
    AppState, ApiResponse, AuthenticatedUser, JobIdPath, ValidatedJson, ValidatedQuery,
};

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), HttpError>;

pub async fn create_job(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateJobRequest>,
) -> ApiResult<JobIdResponse> {
    tracing::info!(
        user_id = %user,
        input_audio_url = %request.input_audio_url,
        "received create job request"
    );

    let result = execute(&state, user, CreateJobCommand::new(request)).await?;
    tracing::info!(job_id = %result.id, "create job request completed");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(result))))
}

pub async fn update_job(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    JobIdPath(job_id): JobIdPath,
    ValidatedJson(request): ValidatedJson<UpdateJobRequest>,
) -> ApiResult<JobIdResponse> {
    tracing::info!(
        user_id = %user,
        job_id = %job_id,
        status = ?request.status,
        "received update job request"
    );

    let result = execute(&state, user, UpdateJobCommand::new(job_id, request)).await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(result))))
}

pub async fn append_segments(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    JobIdPath(job_id): JobIdPath,
    ValidatedJson(request): ValidatedJson<AppendSegmentsRequest>,
) -> ApiResult<AppendSegmentsResponse> {
    tracing::info!(
        user_id = %user,
        job_id = %job_id,
        segment_count = request.segments.len(),
        "received append segments request"
    );

    let result = execute(&state, user, AppendSegmentsCommand::new(job_id, request)).await?;
    tracing::info!(job_id = %job_id, inserted = result.count, "append segments request completed");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(result))))
}

pub async fn get_job(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    JobIdPath(job_id): JobIdPath,
) -> ApiResult<JobWithSegmentsResponse> {
    let result = execute(&state, user, GetJobCommand::new(job_id)).await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(result))))
}

pub async fn list_jobs(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ValidatedQuery(query): ValidatedQuery<ListJobsQuery>,
) -> ApiResult<ListJobsResponse> {
    let result = execute(&state, user, ListJobsCommand::new(query)).await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(result))))
}

async fn execute<C: Command>(
    state: &AppState,
    user: UserId,
    command: C,
) -> Result<C::Result, HttpError> {
    let command_type = command.command_type();
    let context = CommandContext::new().with_user_id(user);

    match state.command_service.execute(command, context).await {
        Ok(result) => Ok(result),
        Err(error) => {
            tracing::warn!(command_type, error = %error, "job request failed");
            Err(error_mapper(error))
        }
    }
}
