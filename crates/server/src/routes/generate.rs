use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    response::Json as ResponseJson,
    routing::post,
};
use db::models::{
    business::{BusinessData, null_as_default},
    generated_code::GeneratedCode,
};
use serde::{Deserialize, Serialize};
use services::services::{
    generation_progress::{GenerationProgress, ProgressSnapshot},
    prompt_builder::GenerationOptions,
    website_generator::prepare_for_delivery,
};
use tracing::{info, warn};
use ts_rs::TS;
use utils::text::is_blank;

use crate::{DeploymentImpl, error::ApiError};

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub business_data: Option<BusinessData>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: GenerationOptions,
}

#[derive(Debug, Serialize, TS)]
pub struct DeliveredValidation {
    pub valid: bool,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    pub generation_time: u64,
    pub tokens_used: u32,
    pub category: String,
    pub sections: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
pub struct GenerateResponse {
    pub success: bool,
    pub code: GeneratedCode,
    pub validation: DeliveredValidation,
    pub metadata: GenerationSummary,
    pub progress: ProgressSnapshot,
}

/// POST /api/claude/generate
/// Generate, validate, sanitize and minify a website for one business
pub async fn generate_website(
    State(deployment): State<DeploymentImpl>,
    payload: Result<axum::Json<GenerateRequest>, JsonRejection>,
) -> Result<ResponseJson<GenerateResponse>, ApiError> {
    let mut progress = GenerationProgress::new();
    progress.advance()?;
    log_phase(&progress);

    let axum::Json(request) = payload?;
    let business = request
        .business_data
        .filter(|b| !is_blank(&b.name) && !is_blank(&b.category))
        .ok_or_else(|| ApiError::BadRequest("Missing required business data".to_string()))?;

    let generator = deployment.generator().ok_or(ApiError::ClaudeNotConfigured)?;

    progress.advance()?;
    log_phase(&progress);
    let generated = match generator.generate(&business, &request.options).await {
        Ok(code) => code,
        Err(e) => {
            progress.fail(e.to_string())?;
            log_phase(&progress);
            return Err(e.into());
        }
    };

    progress.advance()?;
    log_phase(&progress);
    let (code, validation) = match prepare_for_delivery(generated) {
        Ok(delivered) => delivered,
        Err(validation) => {
            progress.fail("Generated code validation failed")?;
            log_phase(&progress);
            return Err(ApiError::ValidationFailed(validation));
        }
    };

    progress.succeed()?;
    log_phase(&progress);

    let metadata = GenerationSummary {
        generation_time: code.metadata.generation_time,
        tokens_used: code.metadata.tokens_used,
        category: code.metadata.category.clone(),
        sections: code.metadata.sections.clone(),
    };

    Ok(ResponseJson(GenerateResponse {
        success: true,
        code,
        validation: DeliveredValidation {
            valid: true,
            warnings: validation.warnings,
        },
        metadata,
        progress: progress.snapshot(),
    }))
}

/// GET /api/claude/generate
pub async fn generate_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn log_phase(progress: &GenerationProgress) {
    let snapshot = progress.snapshot();
    let phase = snapshot.phase;
    match snapshot.error {
        Some(error) => warn!(%phase, progress = snapshot.progress, %error, "Generation failed"),
        None => info!(
            %phase,
            progress = snapshot.progress,
            step = %snapshot.current_step,
            attempts = snapshot.attempts,
            "Generation progress"
        ),
    }
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route(
        "/claude/generate",
        post(generate_website).get(generate_method_not_allowed),
    )
}
