use serde_json::Value;
use std::sync::Arc;

use crate::domain::repositories::{PageRequest, TeamPage, TeamRepository, DEFAULT_LIMIT};
use crate::domain::team::validation::{
    validate_approval_request, validate_create, validate_update,
};
use crate::domain::team::{ApprovalTrack, Team, TeamError, TeamId};

/// Orchestrates team operations
///
/// Every mutation runs the validation gate first, so a rejected payload never
/// reaches the repository.
#[derive(Clone)]
pub struct TeamService {
    team_repo: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(team_repo: Arc<dyn TeamRepository>) -> Self {
        Self { team_repo }
    }

    /// Lists one page of teams, newest first
    ///
    /// Raw query values are lenient: missing or unparsable input falls back
    /// to page 1 and a limit of 10, then clamping applies.
    pub async fn list_teams(
        &self,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<TeamPage, TeamError> {
        let request = PageRequest::new(
            parse_number(page).unwrap_or(1),
            parse_number(limit).unwrap_or(DEFAULT_LIMIT),
        );
        tracing::debug!(page = request.page(), limit = request.limit(), "Listing teams");

        Ok(self.team_repo.list(request).await?)
    }

    pub async fn create_team(&self, payload: &Value) -> Result<Team, TeamError> {
        let draft = validate_create(payload)?;
        let team = self.team_repo.create(draft).await?;

        tracing::info!(team_id = %team.id(), members = team.members().len(), "Team created");
        Ok(team)
    }

    pub async fn get_team(&self, raw_id: &str) -> Result<Team, TeamError> {
        let id = parse_id(raw_id)?;
        self.team_repo
            .find_by_id(id)
            .await?
            .ok_or(TeamError::NotFound(id))
    }

    pub async fn update_team(&self, raw_id: &str, payload: &Value) -> Result<Team, TeamError> {
        let id = parse_id(raw_id)?;
        let changes = validate_update(payload)?;
        let team = self.team_repo.replace(id, changes).await?;

        tracing::info!(team_id = %id, "Team updated");
        Ok(team)
    }

    /// Sets one approval track to the requested state
    ///
    /// The target is taken as given; the rotation order is not enforced here.
    pub async fn set_approval(
        &self,
        raw_id: &str,
        track: ApprovalTrack,
        payload: &Value,
    ) -> Result<Team, TeamError> {
        let id = parse_id(raw_id)?;
        let state = validate_approval_request(payload)?;
        let team = self.team_repo.set_approval(id, track, state).await?;

        tracing::info!(
            team_id = %id,
            %track,
            %state,
            fully_approved = team.is_fully_approved(),
            "Approval updated"
        );
        Ok(team)
    }

    pub async fn delete_team(&self, raw_id: &str) -> Result<TeamId, TeamError> {
        let id = parse_id(raw_id)?;
        self.team_repo.delete(id).await?;

        tracing::info!(team_id = %id, "Team deleted");
        Ok(id)
    }
}

fn parse_id(raw: &str) -> Result<TeamId, TeamError> {
    TeamId::parse(raw).map_err(TeamError::InvalidIdentity)
}

/// Integer query values; fractional input is floored
fn parse_number(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.floor() as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::ApprovalState;
    use crate::infrastructure::repositories::InMemoryTeamRepository;
    use serde_json::json;

    fn service() -> TeamService {
        TeamService::new(Arc::new(InMemoryTeamRepository::new()))
    }

    fn payload() -> Value {
        json!({
            "name": "A",
            "description": "B",
            "members": [{
                "name": "M",
                "gender": "F",
                "dateOfBirth": "1990-01-01T00:00:00Z",
                "contact": "12345"
            }]
        })
    }

    #[test]
    fn numbers_parse_leniently() {
        assert_eq!(parse_number(Some("3")), Some(3));
        assert_eq!(parse_number(Some(" 7 ")), Some(7));
        assert_eq!(parse_number(Some("2.9")), Some(2));
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(None), None);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = service();
        let created = service.create_team(&payload()).await.unwrap();

        let fetched = service.get_team(&created.id().to_string()).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.manager_approval(), ApprovalState::Pending);
        assert_eq!(fetched.director_approval(), ApprovalState::Pending);
        assert_eq!(fetched.members()[0].contact, "12345");
    }

    #[tokio::test]
    async fn create_ignores_requested_approvals() {
        let service = service();
        let mut body = payload();
        body["managerApproval"] = json!("Approved");
        body["directorApproval"] = json!("Not Approved");

        let team = service.create_team(&body).await.unwrap();
        assert_eq!(team.manager_approval(), ApprovalState::Pending);
        assert_eq!(team.director_approval(), ApprovalState::Pending);
    }

    #[tokio::test]
    async fn malformed_id_is_distinct_from_missing_team() {
        let service = service();

        assert!(matches!(
            service.get_team("not-an-id").await,
            Err(TeamError::InvalidIdentity(_))
        ));
        assert!(matches!(
            service.get_team(&TeamId::new().to_string()).await,
            Err(TeamError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn invalid_status_leaves_team_unchanged() {
        let service = service();
        let team = service.create_team(&payload()).await.unwrap();
        let id = team.id().to_string();

        let result = service
            .set_approval(&id, ApprovalTrack::Manager, &json!({"status": "approved"}))
            .await;
        assert!(matches!(result, Err(TeamError::Validation(_))));

        let stored = service.get_team(&id).await.unwrap();
        assert_eq!(stored, team);
    }

    #[tokio::test]
    async fn invalid_update_is_not_applied() {
        let service = service();
        let team = service.create_team(&payload()).await.unwrap();
        let id = team.id().to_string();

        let result = service
            .update_team(&id, &json!({"name": "Renamed", "description": ""}))
            .await;
        assert!(matches!(result, Err(TeamError::Validation(_))));
        assert_eq!(service.get_team(&id).await.unwrap().name(), "A");
    }

    #[tokio::test]
    async fn listing_clamps_raw_input() {
        let service = service();
        for _ in 0..3 {
            service.create_team(&payload()).await.unwrap();
        }

        let page = service.list_teams(Some("-4"), Some("1000")).await.unwrap();
        assert_eq!((page.page, page.limit, page.total), (1, 100, 3));

        let page = service.list_teams(Some("x"), Some("0")).await.unwrap();
        assert_eq!((page.page, page.limit), (1, 1));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pages(), 3);

        let page = service.list_teams(None, None).await.unwrap();
        assert_eq!((page.page, page.limit), (1, 10));
    }
}
