use db::DBService;
use services::services::{
    claude_api::ClaudeApiClient,
    projects::ProjectService,
    website_generator::WebsiteGenerator,
};
use tracing::{info, warn};

use crate::config::Config;

/// Collaborators shared by every handler. Each one is optional so the
/// server still starts, and reports a configuration error per request,
/// when a key or database is missing.
#[derive(Clone, Default)]
pub struct LocalDeployment {
    generator: Option<WebsiteGenerator>,
    projects: Option<ProjectService>,
}

impl LocalDeployment {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let generator = match config.anthropic_api_key {
            Some(key) => {
                let client = ClaudeApiClient::new(key, config.claude_model)?
                    .with_base_url(&config.anthropic_base_url);
                info!(model = %client.model(), "Claude client configured");
                Some(WebsiteGenerator::new(client))
            }
            None => {
                warn!("ANTHROPIC_API_KEY is not set; generation requests will fail");
                None
            }
        };

        let projects = match config.database_url.as_deref() {
            Some(url) => Some(ProjectService::new(DBService::connect(url).await?)),
            None => {
                warn!("DATABASE_URL is not set; project routes are disabled");
                None
            }
        };

        Ok(Self {
            generator,
            projects,
        })
    }

    pub fn with_claude(mut self, client: ClaudeApiClient) -> Self {
        self.generator = Some(WebsiteGenerator::new(client));
        self
    }

    pub fn with_db(mut self, db: DBService) -> Self {
        self.projects = Some(ProjectService::new(db));
        self
    }

    pub fn generator(&self) -> Option<&WebsiteGenerator> {
        self.generator.as_ref()
    }

    pub fn projects(&self) -> Option<&ProjectService> {
        self.projects.as_ref()
    }
}
