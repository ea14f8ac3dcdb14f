use async_trait::async_trait;
use thiserror::Error;

use crate::domain::team::{ApprovalState, ApprovalTrack, Team, TeamChanges, TeamDraft, TeamId};

/// Default page size for listings
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest page size a listing will return
pub const MAX_LIMIT: i64 = 100;

/// Failures reported by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("team not found: {0}")]
    NotFound(TeamId),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("store failure: {0}")]
    Unknown(String),
}

/// A normalized page request
///
/// `page` is at least 1 and `limit` lies in `[1, MAX_LIMIT]`, whatever the
/// caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Clamps raw paging input
    ///
    /// # Example
    /// ```
    /// use team_approvals_api::domain::repositories::PageRequest;
    ///
    /// let request = PageRequest::new(0, 500);
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.limit(), 100);
    /// ```
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of records to skip
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_LIMIT)
    }
}

/// One page of teams, newest first
#[derive(Debug, Clone)]
pub struct TeamPage {
    pub items: Vec<Team>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl TeamPage {
    /// `ceil(total / limit)`; zero for an empty store
    pub fn pages(&self) -> i64 {
        if self.total <= 0 {
            0
        } else {
            (self.total + self.limit - 1) / self.limit
        }
    }
}

/// Repository trait for Team aggregate
///
/// Every operation is atomic for the single record it addresses. Writes to
/// different approval tracks of one team never overwrite each other; writes to
/// the same track are last-write-wins.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Persist a new team with a fresh id and both approvals Pending
    async fn create(&self, draft: TeamDraft) -> Result<Team, RepositoryError>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, RepositoryError>;

    /// List teams ordered by creation time, newest first
    async fn list(&self, request: PageRequest) -> Result<TeamPage, RepositoryError>;

    /// Replace the provided top-level fields of a team
    async fn replace(&self, id: TeamId, changes: TeamChanges) -> Result<Team, RepositoryError>;

    /// Set a single approval track
    async fn set_approval(
        &self,
        id: TeamId,
        track: ApprovalTrack,
        state: ApprovalState,
    ) -> Result<Team, RepositoryError>;

    /// Delete a team by ID
    async fn delete(&self, id: TeamId) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_below_one_is_treated_as_first_page() {
        assert_eq!(PageRequest::new(0, 10).page(), 1);
        assert_eq!(PageRequest::new(-7, 10).page(), 1);
        assert_eq!(PageRequest::new(3, 10).page(), 3);
    }

    #[test]
    fn limit_is_clamped_to_range() {
        assert_eq!(PageRequest::new(1, 0).limit(), 1);
        assert_eq!(PageRequest::new(1, -5).limit(), 1);
        assert_eq!(PageRequest::new(1, 101).limit(), 100);
        assert_eq!(PageRequest::new(1, 100).limit(), 100);
        assert_eq!(PageRequest::new(1, 25).limit(), 25);
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
        assert_eq!(PageRequest::new(i64::MAX, 100).offset(), i64::MAX);
    }

    #[test]
    fn default_request_is_first_page_of_ten() {
        let request = PageRequest::default();
        assert_eq!((request.page(), request.limit()), (1, 10));
    }

    #[test]
    fn page_count_rounds_up() {
        let page = |total, limit| TeamPage {
            items: Vec::new(),
            page: 1,
            limit,
            total,
        };

        assert_eq!(page(0, 10).pages(), 0);
        assert_eq!(page(1, 10).pages(), 1);
        assert_eq!(page(10, 10).pages(), 1);
        assert_eq!(page(11, 10).pages(), 2);
        assert_eq!(page(250, 100).pages(), 3);
    }
}
