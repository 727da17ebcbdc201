//! Project store operations used by the HTTP layer.

use db::{
    DBService,
    models::{
        generated_code::GeneratedCode,
        project::{CreateProject, Project, UpdateProject, VersionType},
    },
};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProjectServiceError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("project {0} not found")]
    NotFound(Uuid),
}

#[derive(Clone)]
pub struct ProjectService {
    db: DBService,
}

impl ProjectService {
    pub fn new(db: DBService) -> Self {
        Self { db }
    }

    /// All projects, newest first
    pub async fn list(&self) -> Result<Vec<Project>, ProjectServiceError> {
        Ok(Project::find_all(&self.db.pool).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Project, ProjectServiceError> {
        Project::find_by_id(&self.db.pool, id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }

    /// New project named after the business, with no code and no history.
    pub async fn create(&self, data: &CreateProject) -> Result<Project, ProjectServiceError> {
        let project = Project::create(&self.db.pool, Uuid::new_v4(), data).await?;
        info!(
            project_id = %project.id,
            category = %project.business_category,
            "Created project"
        );
        Ok(project)
    }

    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateProject,
    ) -> Result<Project, ProjectServiceError> {
        Project::update(&self.db.pool, id, data)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }

    /// Append `code` to the history and make it the project's current code.
    pub async fn record_version(
        &self,
        id: Uuid,
        code: GeneratedCode,
        version_type: VersionType,
    ) -> Result<Project, ProjectServiceError> {
        let project = Project::append_version(&self.db.pool, id, code, version_type)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))?;
        info!(
            project_id = %id,
            version_type = %version_type,
            versions = project.version_history.len(),
            "Recorded project version"
        );
        Ok(project)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ProjectServiceError> {
        if Project::delete(&self.db.pool, id).await? == 0 {
            return Err(ProjectServiceError::NotFound(id));
        }
        info!(project_id = %id, "Deleted project");
        Ok(())
    }
}
