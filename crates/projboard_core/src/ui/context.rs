//! Shared handles every component is constructed with.

use crate::state::project_state::ProjectState;
use crate::ui::surface::{SharedSurface, Surface};
use std::cell::RefCell;
use std::rc::Rc;

/// The board's single store plus the surface it renders to.
pub struct BoardContext<S: Surface> {
    pub store: Rc<ProjectState>,
    pub surface: SharedSurface<S>,
}

impl<S: Surface> BoardContext<S> {
    /// Creates a fresh store for `surface`.
    pub fn new(surface: S) -> Self {
        Self::with_shared(Rc::new(ProjectState::new()), Rc::new(RefCell::new(surface)))
    }

    pub fn with_shared(store: Rc<ProjectState>, surface: SharedSurface<S>) -> Self {
        Self { store, surface }
    }
}

impl<S: Surface> Clone for BoardContext<S> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            surface: Rc::clone(&self.surface),
        }
    }
}
