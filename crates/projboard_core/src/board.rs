//! Board composition root.
//!
//! # Responsibility
//! - Create the board's store and mount the input form plus one list per
//!   status, in that order.
//! - Offer host-level helpers that replay user gestures (submit, drag a
//!   card onto a list).
//!
//! # Invariants
//! - One store per board; every component shares it through
//!   [`BoardContext`].

use crate::config::BoardConfig;
use crate::model::project::ProjectStatus;
use crate::state::project_state::ProjectState;
use crate::ui::context::BoardContext;
use crate::ui::drag::{DataTransfer, DragPayload};
use crate::ui::mount::MountError;
use crate::ui::project_input::{FormInput, ProjectInput, SubmitOutcome};
use crate::ui::project_list::{DropOutcome, ListTemplates, ProjectList};
use crate::ui::surface::{SharedSurface, Surface};
use log::info;
use std::rc::Rc;

/// Input form plus the `active` and `finished` lists over one store.
pub struct ProjectBoard<S: Surface + 'static> {
    context: BoardContext<S>,
    input: ProjectInput<S>,
    active: ProjectList<S>,
    finished: ProjectList<S>,
}

impl<S: Surface + 'static> ProjectBoard<S> {
    /// Mounts a board with a fresh store onto `surface`.
    pub fn new(surface: S, config: &BoardConfig) -> Result<Self, MountError> {
        Self::with_context(BoardContext::new(surface), config)
    }

    /// Mounts a board onto an existing store and surface.
    pub fn with_context(context: BoardContext<S>, config: &BoardConfig) -> Result<Self, MountError> {
        let input = ProjectInput::new(&context, &config.input_template_id, &config.host_id)?;
        let templates = ListTemplates {
            list_template_id: &config.list_template_id,
            item_template_id: &config.item_template_id,
        };
        let active = ProjectList::new(&context, templates, &config.host_id, ProjectStatus::Active)?;
        let finished =
            ProjectList::new(&context, templates, &config.host_id, ProjectStatus::Finished)?;

        info!(
            "event=board_mount module=board status=ok host={}",
            config.host_id
        );
        Ok(Self {
            context,
            input,
            active,
            finished,
        })
    }

    pub fn store(&self) -> &Rc<ProjectState> {
        &self.context.store
    }

    pub fn surface(&self) -> &SharedSurface<S> {
        &self.context.surface
    }

    pub fn input(&self) -> &ProjectInput<S> {
        &self.input
    }

    pub fn list(&self, status: ProjectStatus) -> &ProjectList<S> {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }

    /// Types `form` into the input fields and submits it.
    pub fn submit(&self, form: &FormInput) -> SubmitOutcome {
        self.input.fill(form);
        self.input.submit()
    }

    /// Drags the card for `project_id` onto the `target` list.
    ///
    /// When no card is rendered for the id, the drop still happens with a
    /// bare payload and is ignored by the list if the id is unknown.
    pub fn move_project(&self, project_id: &str, target: ProjectStatus) -> DropOutcome {
        let source = ProjectStatus::ALL
            .into_iter()
            .map(|status| self.list(status))
            .find_map(|list| list.start_drag(project_id).map(|transfer| (list, transfer)));

        let target_list = self.list(target);
        target_list.drag_over();
        let outcome = match &source {
            Some((_, transfer)) => target_list.handle_drop(transfer),
            None => {
                target_list.handle_drop(&DataTransfer::with_payload(DragPayload::moving(project_id)))
            }
        };
        if let Some((list, transfer)) = &source {
            list.end_drag(transfer);
        }
        outcome
    }
}
