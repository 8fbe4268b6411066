use std::sync::Arc;

use axum::http::{header::InvalidHeaderName, HeaderName};
use stt_application::GenericCommandService;

#[derive(Clone)]
pub struct AppState {
    pub command_service: Arc<GenericCommandService>,
    /// Header the upstream gateway fills with the verified user id.
    pub user_header: HeaderName,
}

impl AppState {
    pub fn new(
        command_service: Arc<GenericCommandService>,
        user_header: &str,
    ) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            command_service,
            user_header: HeaderName::from_bytes(user_header.as_bytes())?,
        })
    }
}
