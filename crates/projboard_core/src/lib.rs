//! Core logic for the project board.
//! This crate owns the store, its notification protocol and the UI
//! components that render through a host surface.

pub mod board;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod ui;
pub mod validation;

pub use board::ProjectBoard;
pub use config::{BoardConfig, ConfigError};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use state::listener::{ListenerFn, ListenerRegistry};
pub use state::project_state::{ProjectPartition, ProjectState};
pub use ui::context::BoardContext;
pub use ui::drag::{DataTransfer, DragPayload, DropEffect};
pub use ui::memory::{MemorySurface, TemplateNode};
pub use ui::mount::{mount, MountError, MountSpec, Mounted};
pub use ui::project_input::{
    gather_user_input, FormInput, ProjectDraft, ProjectInput, SubmitOutcome,
    INVALID_INPUT_MESSAGE,
};
pub use ui::project_item::{people_label, ProjectItem};
pub use ui::project_list::{DropOutcome, ListTemplates, ProjectList};
pub use ui::surface::{ElementId, InsertPosition, SharedSurface, Surface};
pub use validation::{validate_field, FieldValue, Validatable};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
