use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, types::Json};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::{business::BusinessData, generated_code::GeneratedCode};

/// How a version came to exist
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VersionType {
    #[default]
    FullRegeneration,
    SectionRegeneration,
    ManualEdit,
}

/// State of the last hosting deployment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeploymentStatus {
    #[default]
    Pending,
    Deployed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub netlify_url: String,
    pub netlify_id: String,
    pub deployed_at: DateTime<Utc>,
    pub status: DeploymentStatus,
}

/// A snapshot in a project's append-only history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub id: Uuid,
    pub generated_code: GeneratedCode,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub version_type: VersionType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub business_category: String,
    pub business_data: BusinessData,
    pub generated_code: Option<GeneratedCode>,
    pub deployment_info: Option<DeploymentInfo>,
    pub version_history: Vec<VersionEntry>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a project
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub business_data: BusinessData,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update; absent fields keep their stored value.
///
/// Generated code is deliberately not part of this: it only changes through
/// [`Project::append_version`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub business_data: Option<BusinessData>,
    pub deployment_info: Option<DeploymentInfo>,
}

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    business_category: String,
    business_data: Json<BusinessData>,
    generated_code: Option<Json<GeneratedCode>>,
    deployment_info: Option<Json<DeploymentInfo>>,
    version_history: Json<Vec<VersionEntry>>,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            business_category: row.business_category,
            business_data: row.business_data.0,
            generated_code: row.generated_code.map(|c| c.0),
            deployment_info: row.deployment_info.map(|d| d.0),
            version_history: row.version_history.0,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl Project {
    /// Append `code` to the history and make it the current code.
    pub fn push_version(
        &mut self,
        code: GeneratedCode,
        version_type: VersionType,
        timestamp: DateTime<Utc>,
    ) -> &VersionEntry {
        self.version_history.push(VersionEntry {
            id: Uuid::new_v4(),
            generated_code: code.clone(),
            timestamp,
            version_type,
        });
        self.generated_code = Some(code);
        self.updated_at = timestamp;
        // just pushed, so the history is non-empty
        &self.version_history[self.version_history.len() - 1]
    }

    /// The latest entry in the version history, if any.
    pub fn latest_version(&self) -> Option<&VersionEntry> {
        self.version_history.last()
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"SELECT id, name, business_category, business_data, generated_code,
                      deployment_info, version_history, notes, created_at, updated_at
               FROM projects
               ORDER BY created_at DESC, rowid DESC"#,
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"SELECT id, name, business_category, business_data, generated_code,
                      deployment_info, version_history, notes, created_at, updated_at
               FROM projects
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(Into::into))
    }

    pub async fn create(pool: &SqlitePool, id: Uuid, data: &CreateProject) -> Result<Self, sqlx::Error> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"INSERT INTO projects
                   (id, name, business_category, business_data, version_history, notes, created_at, updated_at)
               VALUES ($1, $2, $3, $4, '[]', $5, $6, $6)
               RETURNING id, name, business_category, business_data, generated_code,
                         deployment_info, version_history, notes, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.business_data.name)
        .bind(&data.business_data.category)
        .bind(Json(&data.business_data))
        .bind(data.notes.as_deref().unwrap_or_default())
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(row.into())
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let category = data.business_data.as_ref().map(|b| b.category.as_str());
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"UPDATE projects
               SET name = COALESCE($2, name),
                   notes = COALESCE($3, notes),
                   business_data = COALESCE($4, business_data),
                   business_category = COALESCE($5, business_category),
                   deployment_info = COALESCE($6, deployment_info),
                   updated_at = $7
               WHERE id = $1
               RETURNING id, name, business_category, business_data, generated_code,
                         deployment_info, version_history, notes, created_at, updated_at"#,
        )
        .bind(id)
        .bind(data.name.as_deref())
        .bind(data.notes.as_deref())
        .bind(data.business_data.as_ref().map(Json))
        .bind(category)
        .bind(data.deployment_info.as_ref().map(Json))
        .bind(Utc::now())
        .fetch_optional(pool)
        .await?;
        Ok(row.map(Into::into))
    }

    /// Append a version and install it as the current code in one transaction.
    pub async fn append_version(
        pool: &SqlitePool,
        id: Uuid,
        code: GeneratedCode,
        version_type: VersionType,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let row = sqlx::query_as::<_, ProjectRow>(
            r#"SELECT id, name, business_category, business_data, generated_code,
                      deployment_info, version_history, notes, created_at, updated_at
               FROM projects
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut project = Project::from(row);
        project.push_version(code, version_type, Utc::now());

        sqlx::query(
            r#"UPDATE projects
               SET generated_code = $2,
                   version_history = $3,
                   updated_at = $4
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(project.generated_code.as_ref().map(Json))
        .bind(Json(&project.version_history))
        .bind(project.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
