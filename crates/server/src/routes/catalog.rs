use axum::{Router, response::Json as ResponseJson, routing::get};
use services::services::catalog::{
    BUSINESS_CATEGORIES, BusinessCategory, WEBSITE_SECTIONS, WebsiteSection,
};
use utils::response::ApiResponse;

use crate::DeploymentImpl;

/// GET /api/catalog/categories
pub async fn list_categories() -> ResponseJson<ApiResponse<&'static [BusinessCategory]>> {
    ResponseJson(ApiResponse::success(BUSINESS_CATEGORIES))
}

/// GET /api/catalog/sections
pub async fn list_sections() -> ResponseJson<ApiResponse<&'static [WebsiteSection]>> {
    ResponseJson(ApiResponse::success(WEBSITE_SECTIONS))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().nest(
        "/catalog",
        Router::new()
            .route("/categories", get(list_categories))
            .route("/sections", get(list_sections)),
    )
}
