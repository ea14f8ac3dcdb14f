//! Request body shapes
//!
//! Handlers read bodies as raw JSON so the validation gate can report every
//! field at once; these types describe what that gate accepts.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::team::{ApprovalState, Member};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: String,
    /// Defaults to no members
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Fields that are absent keep their stored value; `members` replaces the
/// whole list
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub members: Option<Vec<Member>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveRequest {
    pub status: ApprovalState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn approve_request_reads_wire_literal() {
        let request: ApproveRequest =
            serde_json::from_value(json!({"status": "Not Approved"})).unwrap();
        assert_eq!(request.status, ApprovalState::NotApproved);
    }

    #[test]
    fn create_request_defaults_members() {
        let request: CreateTeamRequest =
            serde_json::from_value(json!({"name": "A", "description": "B"})).unwrap();
        assert!(request.members.is_empty());
    }
}
