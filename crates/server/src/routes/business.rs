use axum::{Router, extract::rejection::JsonRejection, response::Json as ResponseJson, routing::post};
use db::models::business::BusinessData;
use serde::Serialize;
use services::services::business_validation::{FieldError, validate_business_data};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{DeploymentImpl, error::ApiError};

#[derive(Debug, Serialize, TS)]
pub struct BusinessDataCheck {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// POST /api/business-data/validate
/// Field-level checks on a business profile; problems are reported, not rejected
pub async fn validate_business(
    payload: Result<axum::Json<BusinessData>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<BusinessDataCheck>>, ApiError> {
    let axum::Json(business) = payload?;
    let errors = validate_business_data(&business);
    Ok(ResponseJson(ApiResponse::success(BusinessDataCheck {
        valid: errors.is_empty(),
        errors,
    })))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/business-data/validate", post(validate_business))
}
