//! Project input form component.
//!
//! # Responsibility
//! - Capture title, description and people count from the form fields.
//! - Validate, build an `active` project and hand it to the store.
//!
//! # Invariants
//! - Invalid input raises exactly one alert and leaves every field as is.
//! - Fields are cleared only after the store accepted the project.

use crate::model::project::{Project, ProjectId};
use crate::ui::context::BoardContext;
use crate::ui::mount::{mount, MountError, MountSpec, Mounted};
use crate::ui::surface::{ElementId, InsertPosition, Surface};
use crate::validation::{validate_field, Validatable};
use log::{info, warn};

const COMPONENT: &str = "project input";

/// Element id given to the mounted form.
pub const INPUT_ELEMENT_ID: &str = "user-input";
/// Message shown when a submission fails validation.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid user input";

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub title: String,
    pub description: String,
    pub people: String,
}

impl FormInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        people: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people: people.into(),
        }
    }
}

/// Validated field values, ready to become a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub people: u32,
}

impl ProjectDraft {
    /// Builds an `active` project with a fresh identity.
    pub fn into_project(self) -> Project {
        Project::new(self.title, self.description, self.people)
    }
}

/// Result of one submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Committed(ProjectId),
    Rejected,
}

/// Validates raw form values.
///
/// Title and description are required; people is required, strictly
/// positive and must be a whole number.
pub fn gather_user_input(input: &FormInput) -> Option<ProjectDraft> {
    let valid = validate_field(&Validatable::text(&input.title).required())
        && validate_field(&Validatable::text(&input.description).required())
        && validate_field(&Validatable::text(&input.people).required().positive());
    if !valid {
        return None;
    }

    let people = input.people.trim().parse::<u32>().ok()?;
    Some(ProjectDraft {
        title: input.title.clone(),
        description: input.description.clone(),
        people,
    })
}

/// The form that creates new projects.
pub struct ProjectInput<S: Surface> {
    context: BoardContext<S>,
    mounted: Mounted,
    title_el: ElementId,
    description_el: ElementId,
    people_el: ElementId,
}

impl<S: Surface> ProjectInput<S> {
    /// Mounts the form at the start of `host_id`.
    pub fn new(
        context: &BoardContext<S>,
        template_id: &str,
        host_id: &str,
    ) -> Result<Self, MountError> {
        let mut surface = context.surface.borrow_mut();
        let mounted = mount(
            &mut *surface,
            &MountSpec {
                template_id,
                host_id,
                position: InsertPosition::AfterBegin,
                element_id: Some(INPUT_ELEMENT_ID),
            },
        )?;
        let title_el = mounted.slot(&*surface, COMPONENT, "#title")?;
        let description_el = mounted.slot(&*surface, COMPONENT, "#description")?;
        let people_el = mounted.slot(&*surface, COMPONENT, "#people")?;
        drop(surface);

        Ok(Self {
            context: context.clone(),
            mounted,
            title_el,
            description_el,
            people_el,
        })
    }

    pub fn root(&self) -> ElementId {
        self.mounted.root
    }

    /// Writes field values, as a user typing into the form would.
    pub fn fill(&self, input: &FormInput) {
        let mut surface = self.context.surface.borrow_mut();
        surface.set_value(self.title_el, &input.title);
        surface.set_value(self.description_el, &input.description);
        surface.set_value(self.people_el, &input.people);
    }

    /// Current raw field values.
    pub fn read(&self) -> FormInput {
        let surface = self.context.surface.borrow();
        FormInput {
            title: surface.value(self.title_el),
            description: surface.value(self.description_el),
            people: surface.value(self.people_el),
        }
    }

    /// Handles a form submission.
    pub fn submit(&self) -> SubmitOutcome {
        let Some(draft) = gather_user_input(&self.read()) else {
            warn!("event=project_submit module=ui status=rejected reason=invalid_input");
            self.context
                .surface
                .borrow_mut()
                .alert(INVALID_INPUT_MESSAGE);
            return SubmitOutcome::Rejected;
        };

        let project = draft.into_project();
        let project_id = project.id.clone();
        // Lists re-render from inside this call; no surface borrow may be live.
        self.context.store.add_project(project);
        self.clear();

        info!("event=project_submit module=ui status=ok project_id={project_id}");
        SubmitOutcome::Committed(project_id)
    }

    /// Resets all three fields to empty.
    pub fn clear(&self) {
        self.fill(&FormInput::default());
    }
}
