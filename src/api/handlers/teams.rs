use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;
use utoipa::IntoParams;

use crate::api::errors::ApiError;
use crate::api::requests::{ApproveRequest, CreateTeamRequest, UpdateTeamRequest};
use crate::api::response::{
    ApiResponse, DeletedTeam, DeletedTeamEnvelope, ErrorBody, TeamEnvelope, TeamListResponse,
    TeamResponse,
};
use crate::api::AppState;
use crate::domain::team::ApprovalTrack;

/// Query string for listings
///
/// Values stay raw so bad input falls back to defaults instead of rejecting
/// the request.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTeamsQuery {
    /// Page number, starting at 1
    #[param(value_type = Option<i64>, minimum = 1)]
    pub page: Option<String>,
    /// Page size, 1 to 100 (default 10)
    #[param(value_type = Option<i64>, minimum = 1, maximum = 100)]
    pub limit: Option<String>,
}

impl ListTeamsQuery {
    /// Picks `page` and `limit` out of decoded pairs; the first occurrence wins
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" if query.page.is_none() => query.page = Some(value),
                "limit" if query.limit.is_none() => query.limit = Some(value),
                _ => {}
            }
        }
        query
    }
}

type TeamJson = Json<ApiResponse<TeamResponse>>;

/// List teams, newest first
///
/// GET /api/teams?page&limit
#[utoipa::path(
    get,
    path = "/api/teams",
    params(ListTeamsQuery),
    responses(
        (status = 200, description = "One page of teams", body = TeamListResponse),
        (status = 500, description = "Server error", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tag = "Teams"
)]
pub async fn list_teams(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<TeamListResponse>, ApiError> {
    let query = query
        .map(|Query(pairs)| ListTeamsQuery::from_pairs(pairs))
        .unwrap_or_default();

    let page = state
        .teams
        .list_teams(query.page.as_deref(), query.limit.as_deref())
        .await
        .map_err(|e| ApiError::from_team_error(e, "Failed to fetch teams"))?;

    Ok(Json(TeamListResponse::from(&page)))
}

/// Create a new team
///
/// POST /api/teams
#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamEnvelope),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    ),
    tag = "Teams"
)]
pub async fn create_team(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, TeamJson), ApiError> {
    let Json(payload) = body?;
    let team = state
        .teams
        .create_team(&payload)
        .await
        .map_err(|e| ApiError::from_team_error(e, "Failed to create team"))?;

    Ok((StatusCode::CREATED, ApiResponse::ok(TeamResponse::from(&team))))
}

/// Get a team by ID
///
/// GET /api/teams/:id
#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(("id" = String, Path, description = "Team id (UUID)")),
    responses(
        (status = 200, description = "The team", body = TeamEnvelope),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    tag = "Teams"
)]
pub async fn get_team(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<TeamJson, ApiError> {
    let Path(id) = id?;
    let team = state
        .teams
        .get_team(&id)
        .await
        .map_err(|e| ApiError::from_team_error(e, "Failed to fetch team"))?;

    Ok(ApiResponse::ok(TeamResponse::from(&team)))
}

/// Replace a team's name, description or members
///
/// PUT /api/teams/:id
#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(("id" = String, Path, description = "Team id (UUID)")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "The updated team", body = TeamEnvelope),
        (status = 400, description = "Invalid id or validation error", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    tag = "Teams"
)]
pub async fn update_team(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<TeamJson, ApiError> {
    let Path(id) = id?;
    let Json(payload) = body?;
    let team = state
        .teams
        .update_team(&id, &payload)
        .await
        .map_err(|e| ApiError::from_team_error(e, "Failed to update team"))?;

    Ok(ApiResponse::ok(TeamResponse::from(&team)))
}

/// Delete a team
///
/// DELETE /api/teams/:id
#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(("id" = String, Path, description = "Team id (UUID)")),
    responses(
        (status = 200, description = "Team deleted", body = DeletedTeamEnvelope),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    tag = "Teams"
)]
pub async fn delete_team(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<DeletedTeam>>, ApiError> {
    let Path(id) = id?;
    let id = state
        .teams
        .delete_team(&id)
        .await
        .map_err(|e| ApiError::from_team_error(e, "Failed to delete team"))?;

    Ok(ApiResponse::ok(DeletedTeam { id }))
}

/// Set the manager approval
///
/// PATCH /api/teams/:id/manager-approve
#[utoipa::path(
    patch,
    path = "/api/teams/{id}/manager-approve",
    params(("id" = String, Path, description = "Team id (UUID)")),
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "The updated team", body = TeamEnvelope),
        (status = 400, description = "Invalid id or status", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    tag = "Teams"
)]
pub async fn manager_approve(
    state: State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<TeamJson, ApiError> {
    set_approval(state, id, body, ApprovalTrack::Manager).await
}

/// Set the director approval
///
/// PATCH /api/teams/:id/director-approve
#[utoipa::path(
    patch,
    path = "/api/teams/{id}/director-approve",
    params(("id" = String, Path, description = "Team id (UUID)")),
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "The updated team", body = TeamEnvelope),
        (status = 400, description = "Invalid id or status", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    tag = "Teams"
)]
pub async fn director_approve(
    state: State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<TeamJson, ApiError> {
    set_approval(state, id, body, ApprovalTrack::Director).await
}

async fn set_approval(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
    track: ApprovalTrack,
) -> Result<TeamJson, ApiError> {
    let Path(id) = id?;
    let Json(payload) = body?;
    let failure = match track {
        ApprovalTrack::Manager => "Failed to update manager approval",
        ApprovalTrack::Director => "Failed to update director approval",
    };

    let team = state
        .teams
        .set_approval(&id, track, &payload)
        .await
        .map_err(|e| ApiError::from_team_error(e, failure))?;

    Ok(ApiResponse::ok(TeamResponse::from(&team)))
}
