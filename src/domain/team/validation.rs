//! Validation gate for team payloads
//!
//! Pure checks over raw JSON bodies, run before anything reaches storage.
//! Two gates exist on purpose:
//! - the server gate (`validate_create`, `validate_update`) only requires
//!   member fields to be present and non-empty
//! - the form gate (`validate_submission`) additionally requires at least one
//!   member and digits-only contact numbers

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::value_objects::{ApprovalState, Member};

/// Field-keyed validation failures
///
/// Keys are field paths such as `name` or `members.0.contact`. Serializes as a
/// plain JSON object of `path -> [messages]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an error set holding a single message
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field path
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validated input for creating a team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub description: String,
    pub members: Vec<Member>,
}

/// Validated partial replacement of a team's editable fields
///
/// `None` leaves the stored value untouched. `members` replaces the whole
/// sequence; individual members are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub members: Option<Vec<Member>>,
}

impl TeamChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.members.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactRule {
    NonEmpty,
    DigitsOnly,
}

/// Server-side gate for `POST /teams`
///
/// `name` and `description` are required; `members` defaults to empty.
pub fn validate_create(payload: &Value) -> Result<TeamDraft, ValidationErrors> {
    check_draft(payload, ContactRule::NonEmpty)
}

/// Form-submission gate
///
/// Everything `validate_create` checks, plus at least one member and
/// digits-only contact numbers.
pub fn validate_submission(payload: &Value) -> Result<TeamDraft, ValidationErrors> {
    let mut errors = match check_draft(payload, ContactRule::DigitsOnly) {
        Ok(draft) if !draft.members.is_empty() => return Ok(draft),
        Ok(_) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    let has_members = payload
        .get("members")
        .and_then(Value::as_array)
        .map(|members| !members.is_empty())
        .unwrap_or(false);
    if !has_members && errors.get("members").is_none() {
        errors.add("members", "At least one team member is required");
    }

    Err(errors)
}

/// Server-side gate for `PUT /teams/{id}`
///
/// Every field is optional; only present fields are checked. Approval fields
/// are not editable here and are ignored.
pub fn validate_update(payload: &Value) -> Result<TeamChanges, ValidationErrors> {
    let body = as_object(payload)?;
    let mut errors = ValidationErrors::new();

    let name = body
        .get("name")
        .and_then(|value| text(Some(value), "name", "Name is required", &mut errors));
    let description = body.get("description").and_then(|value| {
        text(
            Some(value),
            "description",
            "Description is required",
            &mut errors,
        )
    });
    let members = body
        .get("members")
        .and_then(|value| members(value, ContactRule::NonEmpty, &mut errors));

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(TeamChanges {
        name,
        description,
        members,
    })
}

/// Checks a requested approval state
///
/// Only the exact literals `Pending`, `Approved` and `Not Approved` pass.
pub fn validate_approval_status(value: &Value) -> Result<ApprovalState, ValidationErrors> {
    value
        .as_str()
        .and_then(|raw| raw.parse::<ApprovalState>().ok())
        .ok_or_else(|| {
            ValidationErrors::single(
                "status",
                "Status must be one of 'Pending', 'Approved', 'Not Approved'",
            )
        })
}

/// Checks an approval body of the form `{"status": ...}`
pub fn validate_approval_request(payload: &Value) -> Result<ApprovalState, ValidationErrors> {
    let body = as_object(payload)?;
    match body.get("status") {
        Some(value) => validate_approval_status(value),
        None => Err(ValidationErrors::single("status", "Status is required")),
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    payload
        .as_object()
        .ok_or_else(|| ValidationErrors::single("body", "Expected a JSON object"))
}

fn check_draft(payload: &Value, rule: ContactRule) -> Result<TeamDraft, ValidationErrors> {
    let body = as_object(payload)?;
    let mut errors = ValidationErrors::new();

    let name = text(body.get("name"), "name", "Name is required", &mut errors);
    let description = text(
        body.get("description"),
        "description",
        "Description is required",
        &mut errors,
    );
    let members = match body.get("members") {
        None => Some(Vec::new()),
        Some(value) => members(value, rule, &mut errors),
    };

    match (name, description, members) {
        (Some(name), Some(description), Some(members)) if errors.is_empty() => Ok(TeamDraft {
            name,
            description,
            members,
        }),
        _ => Err(errors),
    }
}

/// Required, non-blank string; returned trimmed
fn text(
    value: Option<&Value>,
    path: &str,
    required: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match value {
        None => {
            errors.add(path, required);
            None
        }
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                errors.add(path, required);
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            errors.add(path, "Expected a string");
            None
        }
    }
}

fn members(value: &Value, rule: ContactRule, errors: &mut ValidationErrors) -> Option<Vec<Member>> {
    let Some(items) = value.as_array() else {
        errors.add("members", "Expected an array");
        return None;
    };

    let before = errors.0.len();
    let parsed: Vec<Option<Member>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| member(item, index, rule, errors))
        .collect();

    if errors.0.len() != before {
        return None;
    }
    parsed.into_iter().collect()
}

fn member(
    value: &Value,
    index: usize,
    rule: ContactRule,
    errors: &mut ValidationErrors,
) -> Option<Member> {
    let prefix = format!("members.{}", index);
    let Some(fields) = value.as_object() else {
        errors.add(prefix, "Expected an object");
        return None;
    };

    let name = text(
        fields.get("name"),
        &format!("{}.name", prefix),
        "Name is required",
        errors,
    );
    let gender = text(
        fields.get("gender"),
        &format!("{}.gender", prefix),
        "Gender is required",
        errors,
    );

    let dob_path = format!("{}.dateOfBirth", prefix);
    let date_of_birth = match fields.get("dateOfBirth") {
        None | Some(Value::Null) => {
            errors.add(dob_path, "Date of birth is required");
            None
        }
        Some(raw) => {
            let parsed = coerce_date(raw);
            if parsed.is_none() {
                errors.add(dob_path, "Invalid date");
            }
            parsed
        }
    };

    let contact_path = format!("{}.contact", prefix);
    let contact = text(
        fields.get("contact"),
        &contact_path,
        "Contact number is required",
        errors,
    )
    .and_then(|contact| {
        if rule == ContactRule::DigitsOnly && !contact.chars().all(|c| c.is_ascii_digit()) {
            errors.add(contact_path, "Contact number must contain digits only");
            None
        } else {
            Some(contact)
        }
    });

    Some(Member {
        name: name?,
        gender: gender?,
        date_of_birth: date_of_birth?,
        contact: contact?,
    })
}

/// Years a stored date may fall in; RFC 3339 has no room for more digits
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Coerces a JSON value into a UTC timestamp
///
/// Accepts RFC 3339 strings, naive date-times (taken as UTC), plain
/// `YYYY-MM-DD` dates (midnight UTC) and epoch milliseconds. The UTC result
/// must fall in years 0000 to 9999.
pub fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    let parsed = match value {
        Value::String(raw) => parse_date_str(raw.trim()),
        Value::Number(number) => {
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }?;

    YEAR_RANGE.contains(&parsed.year()).then_some(parsed)
}

fn parse_date_str(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
