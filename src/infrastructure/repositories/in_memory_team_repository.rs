use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::{PageRequest, RepositoryError, TeamPage, TeamRepository};
use crate::domain::team::{ApprovalState, ApprovalTrack, Team, TeamChanges, TeamDraft, TeamId};

/// Process-local implementation of TeamRepository
///
/// Keeps teams in insertion order behind a single lock. Used by the test
/// suites and by `TEAM_STORE=memory` for running without PostgreSQL; nothing
/// survives a restart.
#[derive(Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<Vec<Team>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `update` on the stored team under the write lock
    async fn modify<F>(&self, id: TeamId, update: F) -> Result<Team, RepositoryError>
    where
        F: FnOnce(&mut Team),
    {
        let mut teams = self.teams.write().await;
        let team = teams
            .iter_mut()
            .find(|team| team.id() == id)
            .ok_or(RepositoryError::NotFound(id))?;
        update(team);
        Ok(team.clone())
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn create(&self, draft: TeamDraft) -> Result<Team, RepositoryError> {
        let team = Team::new(draft);
        self.teams.write().await.push(team.clone());
        Ok(team)
    }

    async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, RepositoryError> {
        let teams = self.teams.read().await;
        Ok(teams.iter().find(|team| team.id() == id).cloned())
    }

    async fn list(&self, request: PageRequest) -> Result<TeamPage, RepositoryError> {
        let teams = self.teams.read().await;

        // Newest insertion first, then a stable sort so equal timestamps keep
        // that order.
        let mut ordered: Vec<&Team> = teams.iter().rev().collect();
        ordered.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = ordered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(TeamPage {
            items,
            page: request.page(),
            limit: request.limit(),
            total: teams.len() as i64,
        })
    }

    async fn replace(&self, id: TeamId, changes: TeamChanges) -> Result<Team, RepositoryError> {
        self.modify(id, |team| team.apply_changes(changes)).await
    }

    async fn set_approval(
        &self,
        id: TeamId,
        track: ApprovalTrack,
        state: ApprovalState,
    ) -> Result<Team, RepositoryError> {
        self.modify(id, |team| team.set_approval(track, state)).await
    }

    async fn delete(&self, id: TeamId) -> Result<(), RepositoryError> {
        let mut teams = self.teams.write().await;
        let index = teams
            .iter()
            .position(|team| team.id() == id)
            .ok_or(RepositoryError::NotFound(id))?;
        teams.remove(index);
        Ok(())
    }
}
