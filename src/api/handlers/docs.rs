use axum::{response::Html, Json};
use utoipa::OpenApi;

use super::{health, teams};
use crate::api::requests::{ApproveRequest, CreateTeamRequest, UpdateTeamRequest};
use crate::api::response::{
    DeletedTeam, DeletedTeamEnvelope, ErrorBody, Pagination, TeamEnvelope, TeamListResponse,
    TeamResponse,
};
use crate::domain::team::{ApprovalState, Member};

const SWAGGER_UI_VERSION: &str = "5.17.14";

/// OpenAPI description of every route, generated from the handlers
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Team Approvals API",
        description = "CRUD and manager/director approvals for teams"
    ),
    paths(
        health::health_check,
        teams::list_teams,
        teams::create_team,
        teams::get_team,
        teams::update_team,
        teams::delete_team,
        teams::manager_approve,
        teams::director_approve
    ),
    components(schemas(
        ApprovalState,
        Member,
        TeamResponse,
        Pagination,
        TeamListResponse,
        DeletedTeam,
        TeamEnvelope,
        DeletedTeamEnvelope,
        ErrorBody,
        CreateTeamRequest,
        UpdateTeamRequest,
        ApproveRequest
    )),
    tags(
        (name = "Teams", description = "Team records and their approvals"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// OpenAPI document
///
/// GET /api-docs.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Swagger UI page rendering the OpenAPI document
///
/// GET /api-docs
pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1"/>
    <title>Team Approvals API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui.css" />
    <style>body {{ margin: 0; }} #swagger-ui {{ min-height: 100vh; }}</style>
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui-bundle.js"></script>
    <script>
      window.onload = () => {{
        window.ui = SwaggerUIBundle({{
          url: '/api-docs.json',
          dom_id: '#swagger-ui',
          presets: [SwaggerUIBundle.presets.apis],
          layout: 'BaseLayout',
          deepLinking: true
        }});
      }};
    </script>
  </body>
</html>"#,
        v = SWAGGER_UI_VERSION
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn document() -> Value {
        serde_json::to_value(ApiDoc::openapi()).unwrap()
    }

    #[test]
    fn document_lists_every_team_route() {
        let doc = document();
        let paths = doc["paths"].as_object().unwrap();

        assert!(paths["/api/teams"].get("get").is_some());
        assert!(paths["/api/teams"].get("post").is_some());
        for method in ["get", "put", "delete"] {
            assert!(paths["/api/teams/{id}"].get(method).is_some());
        }
        assert!(paths["/api/teams/{id}/manager-approve"].get("patch").is_some());
        assert!(paths["/api/teams/{id}/director-approve"].get("patch").is_some());
        assert!(paths["/health"].get("get").is_some());
    }

    #[test]
    fn approval_enum_uses_wire_literals() {
        let doc = document();
        assert_eq!(
            doc["components"]["schemas"]["ApprovalState"]["enum"],
            json!(["Pending", "Approved", "Not Approved"])
        );
    }

    #[test]
    fn team_schema_follows_response_fields() {
        let doc = document();
        let properties = doc["components"]["schemas"]["TeamResponse"]["properties"]
            .as_object()
            .unwrap();

        for field in [
            "id",
            "name",
            "description",
            "members",
            "managerApproval",
            "directorApproval",
            "createdAt",
            "updatedAt",
        ] {
            assert!(properties.contains_key(field), "missing {}", field);
        }
        assert!(doc["components"]["schemas"].get("TeamEnvelope").is_some());
        assert!(doc["components"]["schemas"].get("ErrorBody").is_some());
    }
}
