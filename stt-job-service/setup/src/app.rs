use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Error};
use stt_application::{GenericCommandService, JobCommandRegistryFactory, JobUseCase, JobUseCaseImpl};
use stt_configuration::{AppConfig, DatabaseConfig, ServerConfig};
use stt_domain::JobRepository;
use stt_http_server::{create_router, serve, AppState};
use stt_infra_db::{connect, create_schema, DatabaseSettings, SeaOrmJobRepository};
use tokio::net::TcpListener;

pub async fn build_and_run(config: AppConfig, server_config: ServerConfig) -> Result<(), Error> {
    let app = Application::new(config).await?;
    app.run(server_config).await
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

impl Application {
    pub async fn new(config: AppConfig) -> Result<Self, Error> {
        tracing::info!(
            max_connections = config.database.max_connections,
            run_migrations = config.database.run_migrations,
            user_header = %config.service.auth.user_header,
            "initializing stt job application"
        );

        let db = connect(&database_settings(&config.database))
            .await
            .context("database connection failed")?;
        if config.database.run_migrations {
            create_schema(&db)
                .await
                .context("schema creation failed")?;
        }

        let repository: Arc<dyn JobRepository> = Arc::new(SeaOrmJobRepository::new(db));
        let usecase: Arc<dyn JobUseCase> = Arc::new(JobUseCaseImpl::new(repository));
        let registry = JobCommandRegistryFactory::create_registry(usecase);
        let command_service = Arc::new(GenericCommandService::new(Arc::new(registry)));
        let state = AppState::new(command_service, &config.service.auth.user_header)
            .map_err(|err| {
                anyhow!(
                    "invalid user header `{}`: {err}",
                    config.service.auth.user_header
                )
            })?;

        Ok(Self { config, state })
    }

    pub async fn run(self, server_config: ServerConfig) -> Result<(), Error> {
        let bind = format!("{}:{}", server_config.host, server_config.port);
        let listener = TcpListener::bind(&bind)
            .await
            .with_context(|| format!("failed to bind `{bind}`"))?;
        self.serve(listener).await
    }

    pub async fn serve(self, listener: TcpListener) -> Result<(), Error> {
        serve(listener, create_router(self.state))
            .await
            .map_err(|err| anyhow!("stt job http server failed: {err}"))
    }
}

fn database_settings(config: &DatabaseConfig) -> DatabaseSettings {
    DatabaseSettings {
        url: config.url.clone(),
        max_connections: config.max_connections,
        min_connections: config.min_connections,
        connect_timeout: Duration::from_secs(config.connect_timeout_secs.max(1)),
        sqlx_logging: config.sqlx_logging,
    }
}

#[cfg(test)]
mod tests {
    use stt_application::{
        codes, CommandContext, CreateJobCommand, CreateJobRequest, GetJobCommand,
    };
    use stt_domain::{JobStatus, UserId};

    use super::*;

    fn in_memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".to_string();
        config
    }

    #[test]
    fn connect_timeout_is_never_zero() {
        let mut config = DatabaseConfig::default();
        config.connect_timeout_secs = 0;
        assert_eq!(
            database_settings(&config).connect_timeout,
            Duration::from_secs(1)
        );
    }

    #[tokio::test]
    async fn application_wires_commands_to_storage() {
        let app = Application::new(in_memory_config())
            .await
            .expect("app should initialize");
        let alice = CommandContext::new().with_user_id(UserId::new("alice"));

        let created = app
            .state
            .command_service
            .execute(
                CreateJobCommand::new(CreateJobRequest {
                    input_audio_url: "https://x/a.mp3".to_string(),
                    audio_format: None,
                    language: None,
                    model: None,
                }),
                alice.clone(),
            )
            .await
            .expect("create succeeds");
        let fetched = app
            .state
            .command_service
            .execute(GetJobCommand::new(created.id), alice)
            .await
            .expect("get succeeds");

        assert_eq!(fetched.job.status, Some(JobStatus::Queued));

        let error = app
            .state
            .command_service
            .execute(
                GetJobCommand::new(created.id),
                CommandContext::new().with_user_id(UserId::new("bob")),
            )
            .await
            .unwrap_err();
        assert_eq!(error.code(), codes::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_user_header_is_rejected() {
        let mut config = in_memory_config();
        config.service.auth.user_header = "not a header".to_string();

        assert!(Application::new(config).await.is_err());
    }
}
