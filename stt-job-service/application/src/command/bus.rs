use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

use async_trait::async_trait;
use stt_domain::UserId;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// Machine-readable error codes surfaced to callers.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[derive(Debug, Clone, Error)]
pub enum CommandError {
    #[error("validation failed: {message}")]
    Validation { code: String, message: String },

    #[error("authentication required: {message}")]
    Authentication { code: String, message: String },

    #[error("{message}")]
    Business { code: String, message: String },

    #[error("infrastructure error: {message}")]
    Infrastructure { code: String, message: String },
}

impl CommandError {
    pub fn validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn authentication(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Authentication {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn business(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Business {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Infrastructure {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Validation { code, .. }
            | Self::Authentication { code, .. }
            | Self::Business { code, .. }
            | Self::Infrastructure { code, .. } => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Authentication { message, .. }
            | Self::Business { message, .. }
            | Self::Infrastructure { message, .. } => message,
        }
    }
}

impl From<ValidationErrors> for CommandError {
    fn from(errors: ValidationErrors) -> Self {
        CommandError::validation(codes::VALIDATION_ERROR, errors.to_string())
    }
}

/// Per-request data handed to the command service by the transport.
#[derive(Debug, Clone)]
pub struct CommandContext {
    request_id: Uuid,
    user_id: Option<UserId>,
}

impl CommandContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn require_user(&self) -> Result<&UserId, CommandError> {
        self.user_id
            .as_ref()
            .ok_or_else(|| CommandError::authentication(codes::UNAUTHORIZED, "Unauthorized"))
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Command: Send + Sync + 'static {
    type Result: Send + 'static;

    fn command_type(&self) -> &'static str;

    fn command_id(&self) -> Uuid;

    fn validate(&self) -> Result<(), CommandError> {
        Ok(())
    }

    fn requires_authentication(&self) -> bool {
        true
    }
}

#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C, context: &CommandContext)
        -> Result<C::Result, CommandError>;
}

struct RegisteredHandler {
    name: String,
    handler: Arc<dyn Any + Send + Sync>,
}

/// Handlers keyed by the concrete command type they accept.
pub struct CommandRegistry {
    handlers: HashMap<TypeId, RegisteredHandler>,
}

impl CommandRegistry {
    pub fn handler<C: Command>(&self) -> Option<(&str, Arc<dyn CommandHandler<C>>)> {
        let entry = self.handlers.get(&TypeId::of::<C>())?;
        entry
            .handler
            .downcast_ref::<Arc<dyn CommandHandler<C>>>()
            .map(|handler| (entry.name.as_str(), handler.clone()))
    }
}

#[derive(Default)]
pub struct CommandRegistryBuilder {
    handlers: HashMap<TypeId, RegisteredHandler>,
}

impl CommandRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C, H>(mut self, name: String, handler: Arc<H>) -> Self
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let handler: Arc<dyn CommandHandler<C>> = handler;
        self.handlers.insert(
            TypeId::of::<C>(),
            RegisteredHandler {
                name,
                handler: Arc::new(handler),
            },
        );
        self
    }

    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            handlers: self.handlers,
        }
    }
}

/// Single entry point for every operation: authentication guard, input
/// validation, then dispatch to the registered handler.
pub struct GenericCommandService {
    registry: Arc<CommandRegistry>,
}

impl GenericCommandService {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute<C: Command>(
        &self,
        command: C,
        context: CommandContext,
    ) -> Result<C::Result, CommandError> {
        let command_type = command.command_type();
        let command_id = command.command_id();

        if command.requires_authentication() {
            if let Err(error) = context.require_user() {
                tracing::warn!(
                    command_type,
                    %command_id,
                    request_id = %context.request_id(),
                    "rejecting unauthenticated command"
                );
                return Err(error);
            }
        }

        command.validate()?;

        let (name, handler) = self.registry.handler::<C>().ok_or_else(|| {
            CommandError::infrastructure(
                codes::INTERNAL_ERROR,
                format!("no handler registered for `{command_type}`"),
            )
        })?;

        tracing::debug!(
            command = name,
            %command_id,
            request_id = %context.request_id(),
            "dispatching command"
        );

        let result = handler.handle(command, &context).await;
        if let Err(error) = &result {
            match error {
                CommandError::Infrastructure { .. } => {
                    tracing::error!(command = name, %command_id, error = %error, "command failed")
                }
                _ => tracing::debug!(command = name, %command_id, error = %error, "command rejected"),
            }
        }
        result
    }
}
