//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record and its status lifecycle.
//! - Provide constructors that stamp identity and timestamps.
//!
//! # Invariants
//! - `id` is generated once and never reused for another project.
//! - A status transition yields a new record with every other field kept.
//! - `created_at`/`updated_at` are informational and never used for ordering.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Opaque identity of one project.
///
/// Kept as a plain string because it doubles as the drag payload token and
/// the card's element id on the rendering surface.
pub type ProjectId = String;

/// Board column a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work still in progress.
    Active,
    /// Work completed.
    Finished,
}

impl ProjectStatus {
    /// Both statuses in board order.
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::Active, ProjectStatus::Finished];

    /// Stable lowercase label, used for element ids and wire values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }

    /// Parses a label produced by [`ProjectStatus::as_str`], ignoring case
    /// and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Number of people assigned; always positive for records built by the
    /// input component.
    pub people: u32,
    pub status: ProjectStatus,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Project {
    /// Creates an `active` project with a fresh random identity.
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, description, people)
    }

    /// Creates an `active` project with a caller-provided identity.
    ///
    /// The caller is responsible for identity uniqueness within one store.
    pub fn with_id(
        id: impl Into<ProjectId>,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> Self {
        let now = now_epoch_ms();
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy carrying `status`, keeping identity and every other
    /// field unchanged.
    pub fn with_status(&self, status: ProjectStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
