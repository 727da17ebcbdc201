use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::DeploymentImpl;

pub mod business;
pub mod catalog;
pub mod generate;
pub mod health;
pub mod projects;

pub fn router(deployment: DeploymentImpl) -> Router {
    let api_routes = Router::new()
        .merge(generate::router(&deployment))
        .merge(catalog::router(&deployment))
        .merge(business::router(&deployment))
        .merge(projects::router(&deployment))
        .merge(health::router(&deployment));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(deployment)
}
