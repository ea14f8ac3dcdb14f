// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod requests;
pub mod response;

use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::repositories::TeamRepository;
use crate::services::TeamService;
use handlers::{docs, health, teams};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub teams: TeamService,
}

impl AppState {
    pub fn new(team_repo: Arc<dyn TeamRepository>) -> Self {
        Self {
            teams: TeamService::new(team_repo),
        }
    }
}

/// Builds the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // API docs
        .route("/api-docs", get(docs::swagger_ui))
        .route("/api-docs.json", get(docs::openapi_json))
        // Team routes
        .route("/api/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/api/teams/:id",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route("/api/teams/:id/manager-approve", patch(teams::manager_approve))
        .route("/api/teams/:id/director-approve", patch(teams::director_approve))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
