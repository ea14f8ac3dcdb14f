use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::repositories::TeamPage;
use crate::domain::team::value_objects::iso_millis;
use crate::domain::team::{ApprovalState, Member, Team, TeamId};

/// Success envelope: `{"success": true, "data": ...}`
#[derive(Debug, Serialize, ToSchema)]
#[aliases(TeamEnvelope = ApiResponse<TeamResponse>, DeletedTeamEnvelope = ApiResponse<DeletedTeam>)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Externally visible shape of a team
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: TeamId,
    pub name: String,
    pub description: String,
    pub members: Vec<Member>,
    pub manager_approval: ApprovalState,
    pub director_approval: ApprovalState,
    #[serde(serialize_with = "iso_millis::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "iso_millis::serialize")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_string(),
            description: team.description().to_string(),
            members: team.members().to_vec(),
            manager_approval: team.manager_approval(),
            director_approval: team.director_approval(),
            created_at: team.created_at(),
            updated_at: team.updated_at(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// Listing envelope: `{"success": true, "data": [...], "pagination": {...}}`
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamListResponse {
    pub success: bool,
    pub data: Vec<TeamResponse>,
    pub pagination: Pagination,
}

impl From<&TeamPage> for TeamListResponse {
    fn from(page: &TeamPage) -> Self {
        Self {
            success: true,
            data: page.items.iter().map(TeamResponse::from).collect(),
            pagination: Pagination {
                page: page.page,
                limit: page.limit,
                total: page.total,
                pages: page.pages(),
            },
        }
    }
}

/// Payload returned by a successful delete
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedTeam {
    #[schema(value_type = String, format = Uuid)]
    pub id: TeamId,
}

/// Failure envelope: `{"success": false, "message": ..., "details": ...}`
///
/// `details` maps field paths such as `members.0.contact` to messages.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}
