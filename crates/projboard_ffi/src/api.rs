//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose board use-cases (submit, move, list) to Dart via FRB.
//! - Own the one board per UI thread that those calls operate on.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported in response envelopes, never as panics.
//! - The board is thread-local; each calling thread sees its own board.

use log::warn;
use projboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, people_label,
    ping as ping_inner, BoardConfig, DropOutcome, FormInput, MemorySurface, ProjectBoard,
    ProjectStatus, SubmitOutcome, INVALID_INPUT_MESSAGE,
};
use std::cell::RefCell;

thread_local! {
    static BOARD: RefCell<Option<ProjectBoard<MemorySurface>>> = const { RefCell::new(None) };
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered card as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProjectItem {
    pub project_id: String,
    pub title: String,
    pub description: String,
    /// Caption shown under the title, e.g. `2 Persons Assigned.`.
    pub people_label: String,
    /// `active` or `finished`.
    pub status: String,
}

/// Cards of one list, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardListResponse {
    pub items: Vec<BoardProjectItem>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    pub ok: bool,
    pub project_id: Option<String>,
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, project_id: Option<String>) -> Self {
        Self {
            ok: true,
            project_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            project_id: None,
            message: message.into(),
        }
    }
}

/// Discards the current board and mounts a fresh, empty one.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn board_reset() -> String {
    match mount_board() {
        Ok(board) => {
            BOARD.with(|slot| *slot.borrow_mut() = Some(board));
            String::new()
        }
        Err(err) => err,
    }
}

/// Submits the input form with raw field values.
///
/// # FFI contract
/// - Invalid input returns `ok = false` with the user-facing rejection
///   message; nothing is stored.
#[flutter_rust_bridge::frb(sync)]
pub fn board_submit(title: String, description: String, people: String) -> BoardActionResponse {
    let form = FormInput::new(title, description, people);
    match with_board(|board| board.submit(&form)) {
        Ok(SubmitOutcome::Committed(project_id)) => {
            BoardActionResponse::success("Project added.", Some(project_id))
        }
        Ok(SubmitOutcome::Rejected) => BoardActionResponse::failure(INVALID_INPUT_MESSAGE),
        Err(err) => BoardActionResponse::failure(format!("board_submit failed: {err}")),
    }
}

/// Drags one card onto the list for `status` (`active|finished`).
///
/// # FFI contract
/// - Unknown project ids are reported with `ok = false` and change nothing.
/// - Moving a card onto its own list succeeds without a state change.
#[flutter_rust_bridge::frb(sync)]
pub fn board_move(project_id: String, status: String) -> BoardActionResponse {
    let Some(target) = ProjectStatus::parse(&status) else {
        return BoardActionResponse::failure(format!(
            "board_move failed: unsupported status `{}`",
            status.trim()
        ));
    };
    let project_id = project_id.trim().to_string();
    match with_board(|board| board.move_project(&project_id, target)) {
        Ok(DropOutcome::Moved) => {
            BoardActionResponse::success(format!("Project moved to {target}."), Some(project_id))
        }
        Ok(DropOutcome::Unchanged) => BoardActionResponse::success(
            format!("Project already {target}."),
            Some(project_id),
        ),
        Ok(DropOutcome::UnknownProject | DropOutcome::Empty) => {
            BoardActionResponse::failure("Project not found.")
        }
        Err(err) => BoardActionResponse::failure(format!("board_move failed: {err}")),
    }
}

/// Returns the rendered cards of the list for `status`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_list(status: String) -> BoardListResponse {
    let Some(status) = ProjectStatus::parse(&status) else {
        return BoardListResponse {
            items: Vec::new(),
            message: format!("board_list failed: unsupported status `{}`", status.trim()),
        };
    };
    let items = with_board(|board| {
        board
            .list(status)
            .items()
            .iter()
            .map(|item| to_board_item(item.project()))
            .collect::<Vec<_>>()
    });
    match items {
        Ok(items) => {
            let message = if items.is_empty() {
                "No projects.".to_string()
            } else {
                format!("{} project(s).", items.len())
            };
            BoardListResponse { items, message }
        }
        Err(err) => BoardListResponse {
            items: Vec::new(),
            message: format!("board_list failed: {err}"),
        },
    }
}

fn mount_board() -> Result<ProjectBoard<MemorySurface>, String> {
    let config = BoardConfig::from_env().map_err(|err| format!("board config invalid: {err}"))?;
    ProjectBoard::new(MemorySurface::project_board(), &config).map_err(|err| {
        warn!("event=board_mount module=ffi status=error error={err}");
        format!("board mount failed: {err}")
    })
}

fn with_board<T>(f: impl FnOnce(&ProjectBoard<MemorySurface>) -> T) -> Result<T, String> {
    BOARD.with(|slot| {
        let mut slot = slot
            .try_borrow_mut()
            .map_err(|_| "board is busy".to_string())?;
        if slot.is_none() {
            *slot = Some(mount_board()?);
        }
        match slot.as_ref() {
            Some(board) => Ok(f(board)),
            None => Err("board unavailable".to_string()),
        }
    })
}

fn to_board_item(project: &projboard_core::Project) -> BoardProjectItem {
    BoardProjectItem {
        project_id: project.id.clone(),
        title: project.title.clone(),
        description: project.description.clone(),
        people_label: people_label(project.people),
        status: project.status.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        board_list, board_move, board_reset, board_submit, core_version, init_logging, ping,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn submit_then_move_updates_both_lists() {
        assert_eq!(board_reset(), "");
        let created = board_submit("Ship".to_string(), "notes".to_string(), "2".to_string());
        assert!(created.ok, "{}", created.message);
        let project_id = created.project_id.expect("created project id");

        let active = board_list("active".to_string());
        assert_eq!(active.items.len(), 1);
        assert_eq!(active.items[0].people_label, "2 Persons Assigned.");

        let moved = board_move(project_id.clone(), "Finished".to_string());
        assert!(moved.ok, "{}", moved.message);
        assert!(board_list("active".to_string()).items.is_empty());
        let finished = board_list("finished".to_string());
        assert_eq!(finished.items[0].project_id, project_id);
        assert_eq!(finished.items[0].status, "finished");
    }

    #[test]
    fn invalid_submit_reports_rejection() {
        assert_eq!(board_reset(), "");
        let response = board_submit("A".to_string(), "d".to_string(), "-1".to_string());
        assert!(!response.ok);
        assert_eq!(response.message, "Invalid user input");
        assert!(board_list("active".to_string()).items.is_empty());
    }

    #[test]
    fn move_rejects_unknown_project_and_status() {
        assert_eq!(board_reset(), "");
        assert!(!board_move("ghost".to_string(), "finished".to_string()).ok);
        let response = board_move("ghost".to_string(), "archived".to_string());
        assert!(response.message.contains("unsupported status"));
    }
}
