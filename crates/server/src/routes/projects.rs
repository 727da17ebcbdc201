use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::{
    generated_code::GeneratedCode,
    project::{CreateProject, Project, UpdateProject, VersionType},
};
use serde::Deserialize;
use services::services::projects::ProjectService;
use ts_rs::TS;
use uuid::Uuid;
use utils::response::ApiResponse;

use crate::{DeploymentImpl, error::ApiError};

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct RecordVersion {
    pub generated_code: GeneratedCode,
    #[serde(rename = "type", default)]
    pub version_type: VersionType,
}

fn project_service(deployment: &DeploymentImpl) -> Result<&ProjectService, ApiError> {
    deployment.projects().ok_or(ApiError::StoreNotConfigured)
}

/// GET /api/projects
pub async fn list_projects(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = project_service(&deployment)?.list().await?;
    Ok(ResponseJson(ApiResponse::success(projects)))
}

/// POST /api/projects
pub async fn create_project(
    State(deployment): State<DeploymentImpl>,
    payload: Result<axum::Json<CreateProject>, JsonRejection>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<Project>>), ApiError> {
    let axum::Json(payload) = payload?;
    let project = project_service(&deployment)?.create(&payload).await?;
    Ok((StatusCode::CREATED, ResponseJson(ApiResponse::success(project))))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(deployment): State<DeploymentImpl>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let project = project_service(&deployment)?.get(id).await?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    State(deployment): State<DeploymentImpl>,
    Path(id): Path<Uuid>,
    payload: Result<axum::Json<UpdateProject>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let axum::Json(payload) = payload?;
    let project = project_service(&deployment)?.update(id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(deployment): State<DeploymentImpl>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    project_service(&deployment)?.delete(id).await?;
    Ok(ResponseJson(ApiResponse::success_with_message((), "Project deleted")))
}

/// POST /api/projects/{id}/versions
/// Append generated code to the history and make it current
pub async fn record_version(
    State(deployment): State<DeploymentImpl>,
    Path(id): Path<Uuid>,
    payload: Result<axum::Json<RecordVersion>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let axum::Json(payload) = payload?;
    let project = project_service(&deployment)?
        .record_version(id, payload.generated_code, payload.version_type)
        .await?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/projects/{id}/versions", post(record_version))
}
