// Team domain module
// Contains the team aggregate root, its value objects and the validation gate

#![allow(clippy::module_inception)]

pub mod errors;
pub mod team;
pub mod validation;
pub mod value_objects;

// Re-export main types for convenience
pub use errors::TeamError;
pub use team::Team;
pub use validation::{TeamChanges, TeamDraft, ValidationErrors};
pub use value_objects::{ApprovalState, ApprovalTrack, Member, TeamId};
