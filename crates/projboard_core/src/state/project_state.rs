//! Project store with status-partitioned notifications.
//!
//! # Responsibility
//! - Own the ordered sequence of projects (insertion order preserved).
//! - Apply insert and status-transition mutations.
//! - Notify observers with per-status snapshots after every mutation.
//!
//! # Invariants
//! - No two stored projects share an identity (ids are random and fresh).
//! - A status transition keeps the record's position and other fields.
//! - Observers receive copies, never the live sequence.
//! - Every stored project appears in exactly one of the two snapshots.

use crate::model::project::{Project, ProjectStatus};
use crate::state::listener::ListenerRegistry;
use log::debug;
use std::cell::{Cell, RefCell};

/// Order-preserving split of the store into its two status subsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPartition {
    pub active: Vec<Project>,
    pub finished: Vec<Project>,
}

impl ProjectPartition {
    pub fn from_projects(projects: &[Project]) -> Self {
        let (active, finished) = projects
            .iter()
            .cloned()
            .partition(|project| project.status == ProjectStatus::Active);
        Self { active, finished }
    }

    pub fn get(&self, status: ProjectStatus) -> &[Project] {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }
}

/// Authoritative in-process store for one board.
///
/// Shared between components as `Rc<ProjectState>`; all methods take
/// `&self` and release internal borrows before invoking observers, so a
/// callback may read from or mutate the store re-entrantly.
#[derive(Default)]
pub struct ProjectState {
    projects: RefCell<Vec<Project>>,
    listeners: ListenerRegistry<Project>,
    notifications: Cell<u64>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `project` and notifies observers.
    ///
    /// Identity uniqueness is not checked; callers supply fresh ids.
    pub fn add_project(&self, project: Project) {
        debug!(
            "event=project_add module=state status=ok project_id={}",
            project.id
        );
        self.projects.borrow_mut().push(project);
        self.notify();
    }

    /// Returns whether a project with `project_id` is stored.
    ///
    /// Blank ids never match.
    pub fn project_exists(&self, project_id: &str) -> bool {
        if project_id.trim().is_empty() {
            return false;
        }
        self.projects
            .borrow()
            .iter()
            .any(|project| project.id == project_id)
    }

    /// Moves one project to `new_status`.
    ///
    /// Returns `false` without notifying when the id is unknown or the
    /// project already carries `new_status`.
    pub fn update_project_status(&self, project_id: &str, new_status: ProjectStatus) -> bool {
        {
            let mut projects = self.projects.borrow_mut();
            let Some(slot) = projects
                .iter_mut()
                .find(|project| project.id == project_id)
            else {
                debug!(
                    "event=project_status module=state status=skipped reason=not_found project_id={project_id}"
                );
                return false;
            };
            if slot.status == new_status {
                debug!(
                    "event=project_status module=state status=skipped reason=unchanged project_id={project_id}"
                );
                return false;
            }
            *slot = slot.with_status(new_status);
        }

        debug!(
            "event=project_status module=state status=ok project_id={project_id} new_status={new_status}"
        );
        self.notify();
        true
    }

    /// Registers `callback` for snapshots of `filter`.
    ///
    /// The callback first fires on the next mutation, not on registration.
    pub fn add_listener(&self, filter: ProjectStatus, callback: impl Fn(Vec<Project>) + 'static) {
        self.listeners.register(filter, callback);
    }

    /// Copy of every stored project in insertion order.
    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    /// Copy of the projects carrying `status`, in insertion order.
    pub fn snapshot(&self, status: ProjectStatus) -> Vec<Project> {
        self.projects
            .borrow()
            .iter()
            .filter(|project| project.status == status)
            .cloned()
            .collect()
    }

    pub fn get_project(&self, project_id: &str) -> Option<Project> {
        self.projects
            .borrow()
            .iter()
            .find(|project| project.id == project_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of notification cycles triggered by successful mutations.
    pub fn notification_count(&self) -> u64 {
        self.notifications.get()
    }

    fn notify(&self) {
        self.notifications.set(self.notifications.get() + 1);
        if self.listeners.is_empty() {
            return;
        }

        let partition = ProjectPartition::from_projects(&self.projects.borrow());
        let invoked = self.listeners.dispatch(|status| partition.get(status));
        debug!(
            "event=notify module=state status=ok listeners={invoked} active={} finished={}",
            partition.active.len(),
            partition.finished.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ProjectPartition, ProjectState};
    use crate::model::project::{Project, ProjectStatus};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn partition_preserves_relative_order() {
        let a = Project::with_id("a", "A", "d", 1);
        let b = Project::with_id("b", "B", "d", 1).with_status(ProjectStatus::Finished);
        let c = Project::with_id("c", "C", "d", 1);

        let partition = ProjectPartition::from_projects(&[a.clone(), b.clone(), c.clone()]);
        assert_eq!(partition.get(ProjectStatus::Active), &[a, c][..]);
        assert_eq!(partition.get(ProjectStatus::Finished), &[b][..]);
    }

    #[test]
    fn status_update_keeps_position() {
        let state = ProjectState::new();
        for id in ["a", "b", "c"] {
            state.add_project(Project::with_id(id, id, "d", 1));
        }

        assert!(state.update_project_status("b", ProjectStatus::Finished));
        let ids: Vec<_> = state.projects().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(state.projects()[1].status, ProjectStatus::Finished);
    }

    #[test]
    fn blank_id_never_exists() {
        let state = ProjectState::new();
        state.add_project(Project::with_id("x", "A", "d", 1));
        assert!(!state.project_exists(""));
        assert!(!state.project_exists("  "));
        assert!(state.project_exists("x"));
    }

    #[test]
    fn mutations_without_listeners_still_count() {
        let state = ProjectState::new();
        state.add_project(Project::with_id("x", "A", "d", 1));
        assert_eq!(state.notification_count(), 1);
    }

    #[test]
    fn listener_can_mutate_store_reentrantly() {
        let state = Rc::new(ProjectState::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let inner = Rc::downgrade(&state);
        state.add_listener(ProjectStatus::Active, move |projects| {
            let Some(state) = inner.upgrade() else {
                return;
            };
            for project in projects {
                state.update_project_status(&project.id, ProjectStatus::Finished);
            }
        });
        let sink = Rc::clone(&seen);
        state.add_listener(ProjectStatus::Finished, move |projects| {
            sink.borrow_mut().push(projects.len());
        });

        state.add_project(Project::with_id("x", "A", "d", 1));

        assert_eq!(state.snapshot(ProjectStatus::Finished).len(), 1);
        // Nested cycle reports the move first, then the outer cycle's stale view.
        assert_eq!(*seen.borrow(), vec![1, 0]);
    }
}
