//! Team Approvals API Library
//!
//! Tracks teams and their two independent sign-offs (manager and director).
//! Provides the domain model, validation gate, repository adapters and the
//! HTTP layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod telemetry;
