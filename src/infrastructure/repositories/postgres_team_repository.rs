use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::{PageRequest, RepositoryError, TeamPage, TeamRepository};
use crate::domain::team::{
    ApprovalState, ApprovalTrack, Member, Team, TeamChanges, TeamDraft, TeamId,
};

const TEAM_COLUMNS: &str = r#"
    id, name, description, members,
    manager_approval, director_approval,
    created_at, updated_at
"#;

/// Row shape of the `teams` table
#[derive(Debug, sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
    description: String,
    members: Json<Vec<Member>>,
    manager_approval: ApprovalState,
    director_approval: ApprovalState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        Team::from_persistence(
            TeamId::from(r.id),
            r.name,
            r.description,
            r.members.0,
            r.manager_approval,
            r.director_approval,
            r.created_at,
            r.updated_at,
        )
    }
}

/// Translates driver errors into the repository taxonomy
///
/// Connection-level failures (pool timeout, I/O, TLS, closed pool) mean the
/// store is unreachable; everything else is unexpected.
fn map_sqlx_error(context: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => {
            RepositoryError::StoreUnavailable(format!("{}: {}", context, err))
        }
        other => RepositoryError::Unknown(format!("{}: {}", context, other)),
    }
}

/// PostgreSQL implementation of TeamRepository
///
/// Members live in a `JSONB` column so a team stays a single row; every
/// operation is one statement, which gives per-record atomicity. Approval
/// updates touch a single column, so concurrent manager and director writes
/// never clobber each other.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn create(&self, draft: TeamDraft) -> Result<Team, RepositoryError> {
        let team = Team::new(draft);
        let sql = format!(
            r#"
            INSERT INTO teams (
                id, name, description, members,
                manager_approval, director_approval, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TEAM_COLUMNS
        );

        let row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(team.id().as_uuid())
            .bind(team.name())
            .bind(team.description())
            .bind(Json(team.members()))
            .bind(team.manager_approval())
            .bind(team.director_approval())
            .bind(team.created_at())
            .bind(team.updated_at())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create team", e))?;

        tracing::debug!(team_id = %row.id, "Inserted team row");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, RepositoryError> {
        let sql = format!("SELECT {} FROM teams WHERE id = $1", TEAM_COLUMNS);

        let row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find team by id", e))?;

        Ok(row.map(Team::from))
    }

    async fn list(&self, request: PageRequest) -> Result<TeamPage, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM teams
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
            TEAM_COLUMNS
        );

        let items = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&self.pool);
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams").fetch_one(&self.pool);

        let (rows, total) = tokio::try_join!(items, total)
            .map_err(|e| map_sqlx_error("Failed to list teams", e))?;

        Ok(TeamPage {
            items: rows.into_iter().map(Team::from).collect(),
            page: request.page(),
            limit: request.limit(),
            total,
        })
    }

    async fn replace(&self, id: TeamId, changes: TeamChanges) -> Result<Team, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE teams
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                members = COALESCE($4, members),
                updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING {}
            "#,
            TEAM_COLUMNS
        );

        let row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(id.as_uuid())
            .bind(changes.name)
            .bind(changes.description)
            .bind(changes.members.map(Json))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update team", e))?;

        row.map(Team::from).ok_or(RepositoryError::NotFound(id))
    }

    async fn set_approval(
        &self,
        id: TeamId,
        track: ApprovalTrack,
        state: ApprovalState,
    ) -> Result<Team, RepositoryError> {
        let column = match track {
            ApprovalTrack::Manager => "manager_approval",
            ApprovalTrack::Director => "director_approval",
        };
        let sql = format!(
            r#"
            UPDATE teams
            SET {} = $2, updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING {}
            "#,
            column, TEAM_COLUMNS
        );

        let row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(id.as_uuid())
            .bind(state)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update approval", e))?;

        row.map(Team::from).ok_or(RepositoryError::NotFound(id))
    }

    async fn delete(&self, id: TeamId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete team", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }
}
