use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stt_application::{codes, CommandError};

#[derive(Debug)]
pub enum HttpError {
    Validation { message: String },
    Unauthorized,
    NotFound { message: String },
    Internal { message: String },
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            HttpError::Unauthorized => StatusCode::UNAUTHORIZED,
            HttpError::NotFound { .. } => StatusCode::NOT_FOUND,
            HttpError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HttpError::Validation { .. } => codes::VALIDATION_ERROR,
            HttpError::Unauthorized => codes::UNAUTHORIZED,
            HttpError::NotFound { .. } => codes::NOT_FOUND,
            HttpError::Internal { .. } => codes::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            HttpError::Validation { message } | HttpError::NotFound { message } => message,
            HttpError::Unauthorized => "Unauthorized".to_string(),
            // Storage details stay in the logs.
            HttpError::Internal { .. } => "Internal server error".to_string(),
        };

        (
            status,
            Json(json!({
                "success": false,
                "error": {
                    "code": code,
                    "message": message,
                },
            })),
        )
            .into_response()
    }
}

pub fn error_mapper(error: CommandError) -> HttpError {
    match error {
        CommandError::Validation { message, .. } => HttpError::Validation { message },
        CommandError::Authentication { .. } => HttpError::Unauthorized,
        CommandError::Business { code, message } if code == codes::NOT_FOUND => {
            HttpError::NotFound { message }
        }
        CommandError::Business { message, .. } => HttpError::Validation { message },
        CommandError::Infrastructure { message, .. } => HttpError::Internal { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_errors_map_to_http_statuses() {
        let cases = [
            (
                CommandError::validation(codes::VALIDATION_ERROR, "bad"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CommandError::authentication(codes::UNAUTHORIZED, "who"),
                StatusCode::UNAUTHORIZED,
            ),
            (
                CommandError::business(codes::NOT_FOUND, "job not found"),
                StatusCode::NOT_FOUND,
            ),
            (
                CommandError::infrastructure(codes::INTERNAL_ERROR, "db"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error_mapper(error).status(), status);
        }
    }

    #[test]
    fn error_body_carries_machine_readable_code() {
        let response = HttpError::NotFound {
            message: "job not found".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
