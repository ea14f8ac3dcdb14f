use super::validation::{TeamChanges, TeamDraft};
use super::value_objects::{ApprovalState, ApprovalTrack, Member, TeamId};
use chrono::{DateTime, Utc};

/// Team aggregate root
///
/// A named group of members awaiting two independent sign-offs, one from a
/// manager and one from a director.
///
/// # Invariants
/// - Both approvals always hold a valid state; a new team starts Pending on both
/// - `id` and `created_at` never change after creation
/// - Approvals change only through `set_approval`, one track at a time
///
/// # Example
/// ```
/// use team_approvals_api::domain::team::{ApprovalState, Team, TeamDraft};
///
/// let team = Team::new(TeamDraft {
///     name: "Platform".to_string(),
///     description: "Core services".to_string(),
///     members: vec![],
/// });
///
/// assert_eq!(team.name(), "Platform");
/// assert_eq!(team.manager_approval(), ApprovalState::Pending);
/// assert_eq!(team.director_approval(), ApprovalState::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: TeamId,
    name: String,
    description: String,
    members: Vec<Member>,
    manager_approval: ApprovalState,
    director_approval: ApprovalState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new Team from validated input
    ///
    /// Assigns a fresh identity and creation time. Approvals are always
    /// Pending, whatever the caller asked for.
    pub fn new(draft: TeamDraft) -> Self {
        let now = Utc::now();
        Self {
            id: TeamId::new(),
            name: draft.name,
            description: draft.description,
            members: draft.members,
            manager_approval: ApprovalState::Pending,
            director_approval: ApprovalState::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the provided top-level fields
    ///
    /// Members are replaced as a whole sequence. Approvals are untouched.
    pub fn apply_changes(&mut self, changes: TeamChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(members) = changes.members {
            self.members = members;
        }
        self.touch();
    }

    /// Sets exactly one approval track
    ///
    /// Any target state is accepted; skipping ahead in the rotation is allowed.
    pub fn set_approval(&mut self, track: ApprovalTrack, state: ApprovalState) {
        match track {
            ApprovalTrack::Manager => self.manager_approval = state,
            ApprovalTrack::Director => self.director_approval = state,
        }
        self.touch();
    }

    fn touch(&mut self) {
        // Clock skew must not move updated_at before created_at.
        self.updated_at = Utc::now().max(self.created_at);
    }

    // ===== Getters =====

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn manager_approval(&self) -> ApprovalState {
        self.manager_approval
    }

    pub fn director_approval(&self) -> ApprovalState {
        self.director_approval
    }

    /// Returns the state of the given track
    pub fn approval(&self, track: ApprovalTrack) -> ApprovalState {
        match track {
            ApprovalTrack::Manager => self.manager_approval,
            ApprovalTrack::Director => self.director_approval,
        }
    }

    /// True once both manager and director have approved
    pub fn is_fully_approved(&self) -> bool {
        self.manager_approval == ApprovalState::Approved
            && self.director_approval == ApprovalState::Approved
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Bypasses creation rules since the data was already validated when it
    /// was stored. Only repository implementations should call this.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: TeamId,
        name: String,
        description: String,
        members: Vec<Member>,
        manager_approval: ApprovalState,
        director_approval: ApprovalState,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            members,
            manager_approval,
            director_approval,
            created_at,
            updated_at,
        }
    }
}
