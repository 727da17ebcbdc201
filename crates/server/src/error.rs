use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::{
    claude_api::FailureKind, code_validator::ValidationResult,
    generation_progress::ProgressError, projects::ProjectServiceError,
    website_generator::GenerationError,
};
use thiserror::Error;
use tracing::error;
use utils::response::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Claude API key not configured")]
    ClaudeNotConfigured,
    #[error("Project store not configured")]
    StoreNotConfigured,
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Generated code validation failed")]
    ValidationFailed(ValidationResult),
    #[error(transparent)]
    Project(#[from] ProjectServiceError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, ErrorBody::new(message)),
            ApiError::ClaudeNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Claude API key not configured"),
            ),
            ApiError::StoreNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Project store not configured"),
            ),
            ApiError::Generation(e) => {
                error!(error = %e, "Website generation failed");
                match e.failure_kind() {
                    FailureKind::RateLimited => (
                        StatusCode::TOO_MANY_REQUESTS,
                        ErrorBody::new("Rate limit exceeded. Please try again later."),
                    ),
                    FailureKind::Authentication => (
                        StatusCode::UNAUTHORIZED,
                        ErrorBody::new("Invalid API key configuration"),
                    ),
                    FailureKind::Other => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::new("Code generation failed. Please try again."),
                    ),
                }
            }
            ApiError::ValidationFailed(validation) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody::new("Generated code validation failed")
                    .with_details(validation.errors)
                    .with_warnings(validation.warnings),
            ),
            ApiError::Project(ProjectServiceError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new(format!("Project {id} not found")),
            ),
            ApiError::Project(ProjectServiceError::Database(e)) => {
                error!(error = %e, "Project store query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Project store error"),
                )
            }
            ApiError::Progress(e) => {
                error!(error = %e, "Generation progress out of order");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Code generation failed. Please try again."),
                )
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody::new("Method not allowed"),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use services::services::claude_api::ClaudeApiError;

    use super::*;

    fn status_of(error: ApiError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn generation_failures_map_by_kind() {
        let rate = ApiError::Generation(GenerationError::Claude(ClaudeApiError::RateLimited));
        let auth = ApiError::Generation(GenerationError::Claude(ClaudeApiError::InvalidApiKey));
        let other = ApiError::Generation(GenerationError::Claude(ClaudeApiError::Timeout));
        assert_eq!(status_of(rate), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_of(auth), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(other), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn configuration_and_lookup_errors() {
        assert_eq!(status_of(ApiError::ClaudeNotConfigured), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of(ApiError::StoreNotConfigured), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status_of(ApiError::Project(ProjectServiceError::NotFound(uuid::Uuid::nil()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(ApiError::MethodNotAllowed), StatusCode::METHOD_NOT_ALLOWED);
    }
}
