use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Decision recorded on one approval track of a team
///
/// # Approval Cycle
/// ```text
/// Pending -> Approved -> Not Approved -> Pending -> ...
/// ```
///
/// The cycle has no terminal state. `next` is the rotation an approver's toggle
/// uses; storage accepts any state directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "approval_state")]
pub enum ApprovalState {
    /// No decision yet
    Pending,
    /// Signed off
    Approved,
    /// Explicitly rejected
    #[serde(rename = "Not Approved")]
    #[sqlx(rename = "Not Approved")]
    NotApproved,
}

impl ApprovalState {
    /// Every state, in rotation order
    pub const ALL: [ApprovalState; 3] = [
        ApprovalState::Pending,
        ApprovalState::Approved,
        ApprovalState::NotApproved,
    ];

    /// Returns the state a single toggle moves to
    ///
    /// # Example
    /// ```
    /// use team_approvals_api::domain::team::ApprovalState;
    ///
    /// assert_eq!(ApprovalState::Pending.next(), ApprovalState::Approved);
    /// assert_eq!(ApprovalState::NotApproved.next(), ApprovalState::Pending);
    /// ```
    pub fn next(self) -> ApprovalState {
        match self {
            ApprovalState::Pending => ApprovalState::Approved,
            ApprovalState::Approved => ApprovalState::NotApproved,
            ApprovalState::NotApproved => ApprovalState::Pending,
        }
    }

    /// Wire literal, e.g. `"Not Approved"`
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalState::Pending => "Pending",
            ApprovalState::Approved => "Approved",
            ApprovalState::NotApproved => "Not Approved",
        }
    }
}

impl Default for ApprovalState {
    fn default() -> Self {
        ApprovalState::Pending
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalState {
    type Err = String;

    /// Exact match only: `"approved"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApprovalState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| format!("Invalid approval state: {}", s))
    }
}

/// Which of the two independent sign-offs an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalTrack {
    Manager,
    Director,
}

impl fmt::Display for ApprovalTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalTrack::Manager => write!(f, "manager"),
            ApprovalTrack::Director => write!(f, "director"),
        }
    }
}

/// Identity token of a team
///
/// # Invariants
/// - Assigned once at creation, never reused
/// - Only well-formed UUIDs parse; anything else is an invalid identity,
///   which is distinct from a missing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(Uuid);

impl TeamId {
    /// Generates a fresh identity
    pub fn new() -> Self {
        TeamId(Uuid::new_v4())
    }

    /// Parses a caller-supplied identity token
    pub fn parse(raw: &str) -> Result<Self, String> {
        Uuid::parse_str(raw.trim())
            .map(TeamId)
            .map_err(|_| format!("Invalid team id: {}", raw))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TeamId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TeamId {
    fn from(id: Uuid) -> Self {
        TeamId(id)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person belonging to a team
///
/// Embedded in the team record; has no identity or lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub gender: String,
    /// `YYYY-MM-DDTHH:MM:SS.sssZ`
    #[serde(with = "iso_millis")]
    pub date_of_birth: DateTime<Utc>,
    pub contact: String,
}

/// Serializes timestamps as `YYYY-MM-DDTHH:MM:SS.sssZ`
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rotation_cycles_through_all_states() {
        let mut state = ApprovalState::Pending;
        state = state.next();
        assert_eq!(state, ApprovalState::Approved);
        state = state.next();
        assert_eq!(state, ApprovalState::NotApproved);
        state = state.next();
        assert_eq!(state, ApprovalState::Pending);
    }

    #[test]
    fn default_state_is_pending() {
        assert_eq!(ApprovalState::default(), ApprovalState::Pending);
    }

    #[test]
    fn parse_requires_exact_literal() {
        assert_eq!("Approved".parse::<ApprovalState>(), Ok(ApprovalState::Approved));
        assert_eq!(
            "Not Approved".parse::<ApprovalState>(),
            Ok(ApprovalState::NotApproved)
        );
        assert!("approved".parse::<ApprovalState>().is_err());
        assert!("NotApproved".parse::<ApprovalState>().is_err());
        assert!("Not  Approved".parse::<ApprovalState>().is_err());
    }

    #[test]
    fn state_serializes_to_wire_literal() {
        let json = serde_json::to_string(&ApprovalState::NotApproved).unwrap();
        assert_eq!(json, "\"Not Approved\"");

        let state: ApprovalState = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(state, ApprovalState::Pending);
    }

    #[test]
    fn team_id_rejects_malformed_tokens() {
        assert!(TeamId::parse("not-a-uuid").is_err());
        assert!(TeamId::parse("").is_err());
        assert!(TeamId::parse("507f1f77bcf86cd799439011").is_err());

        let id = TeamId::new();
        assert_eq!(TeamId::parse(&id.to_string()), Ok(id));
    }

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(TeamId::new(), TeamId::new());
    }

    #[test]
    fn member_uses_camel_case_and_millisecond_dates() {
        let member = Member {
            name: "M".to_string(),
            gender: "F".to_string(),
            date_of_birth: Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap(),
            contact: "12345".to_string(),
        };

        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(value["dateOfBirth"], "1990-01-01T00:00:00.000Z");
        assert_eq!(value["contact"], "12345");

        let back: Member = serde_json::from_value(value).unwrap();
        assert_eq!(back, member);
    }

    #[test]
    fn member_dates_survive_storage_at_year_bounds() {
        let bounds = [
            Utc.with_ymd_and_hms(0, 1, 1, 0, 0, 0).unwrap(),
            Utc.timestamp_millis_opt(253_402_300_799_999).unwrap(),
        ];

        for date_of_birth in bounds {
            let member = Member {
                name: "M".to_string(),
                gender: "F".to_string(),
                date_of_birth,
                contact: "1".to_string(),
            };

            let stored = serde_json::to_string(&vec![member.clone()]).unwrap();
            let loaded: Vec<Member> = serde_json::from_str(&stored).unwrap();
            assert_eq!(loaded, vec![member]);
        }
    }
}
