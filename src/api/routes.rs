use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::*;
use super::models::{DDS_TOKEN_PATH, DOMAIN_AUTH_ROUTE, LOGIN_PATH, RESTRICT_PATH};
use super::MockState;

pub fn create_router(state: MockState) -> Router {
    Router::new()
        .route(RESTRICT_PATH, post(restrict_to_navmesh))
        .route(LOGIN_PATH, post(login))
        .route(DDS_TOKEN_PATH, post(domains_access_token))
        .route(DOMAIN_AUTH_ROUTE, post(domain_auth))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
        )
        .with_state(state)
}
