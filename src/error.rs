use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use crate::services::litesizer::ExtractError;

#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    Internal(String),
    FileProcessingError(String),
    Extraction(ExtractError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::FileProcessingError(msg) => write!(f, "File processing error: {}", msg),
            AppError::Extraction(err) => write!(f, "Extraction error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extraction(err)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("extraction task failed: {}", err))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::FileProcessingError(_) => StatusCode::BAD_GATEWAY,
            AppError::Extraction(ExtractError::UnreadableInput(_)) => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Extraction(err) => err.to_string(),
            AppError::InvalidInput(msg)
            | AppError::Internal(msg)
            | AppError::FileProcessingError(msg) => msg,
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::litesizer::{InputFault, SheetFault};

    #[test]
    fn extraction_errors_map_to_client_statuses() {
        let unreadable: AppError = ExtractError::from(InputFault::NoWorksheet).into();
        assert_eq!(unreadable.status(), StatusCode::BAD_REQUEST);

        let malformed: AppError = ExtractError::from(SheetFault::MissingAnchor).into();
        assert_eq!(malformed.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            malformed.to_string(),
            "Extraction error: malformed sheet: no \"Particle diameter\" marker in sheet"
        );
    }

    #[test]
    fn response_carries_status() {
        let response = AppError::InvalidInput("no directory".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
