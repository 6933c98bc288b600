//! Status list component and drop target.
//!
//! # Responsibility
//! - Subscribe to the store for one status and re-render on every snapshot.
//! - Accept dropped cards and move them to this list's status.
//!
//! # Invariants
//! - Each notification replaces the whole rendered collection, in
//!   snapshot order.
//! - The store only holds a weak reference to the list.
//! - Every drop clears the droppable state, whatever the payload.
//! - A snapshot that arrives while the surface is borrowed is kept and
//!   rendered on the next access to the list.

use crate::model::project::{Project, ProjectStatus};
use crate::state::project_state::ProjectState;
use crate::ui::context::BoardContext;
use crate::ui::drag::DataTransfer;
use crate::ui::mount::{mount, MountError, MountSpec, Mounted};
use crate::ui::project_item::ProjectItem;
use crate::ui::surface::{ElementId, InsertPosition, SharedSurface, Surface};
use log::{debug, error, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const COMPONENT: &str = "project list";
const DROPPABLE_CLASS: &str = "droppable";

/// Template ids a list mounts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTemplates<'a> {
    pub list_template_id: &'a str,
    pub item_template_id: &'a str,
}

/// Result of dropping a payload onto a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The project moved to this list's status.
    Moved,
    /// The project already carried this list's status.
    Unchanged,
    /// The payload named no stored project.
    UnknownProject,
    /// The carrier held no payload.
    Empty,
}

/// List of cards for one status.
pub struct ProjectList<S: Surface + 'static> {
    inner: Rc<ListInner<S>>,
}

struct ListInner<S: Surface> {
    status: ProjectStatus,
    store: Rc<ProjectState>,
    surface: SharedSurface<S>,
    item_template_id: String,
    mounted: Mounted,
    list_el: ElementId,
    list_element_id: String,
    assigned: RefCell<Vec<Project>>,
    items: RefCell<Vec<ProjectItem>>,
    stale: Cell<bool>,
}

impl<S: Surface + 'static> ProjectList<S> {
    /// Mounts the list at the end of `host_id` and subscribes it to
    /// `status` snapshots. Nothing is rendered until the next mutation.
    pub fn new(
        context: &BoardContext<S>,
        templates: ListTemplates<'_>,
        host_id: &str,
        status: ProjectStatus,
    ) -> Result<Self, MountError> {
        let root_element_id = format!("{status}-projects");
        let list_element_id = format!("{status}-projects-list");

        let (mounted, list_el) = {
            let mut surface = context.surface.borrow_mut();
            let mounted = mount(
                &mut *surface,
                &MountSpec {
                    template_id: templates.list_template_id,
                    host_id,
                    position: InsertPosition::BeforeEnd,
                    element_id: Some(root_element_id.as_str()),
                },
            )?;
            let heading = mounted.slot(&*surface, COMPONENT, "h2")?;
            let list_el = mounted.slot(&*surface, COMPONENT, "ul")?;
            surface.set_text(
                heading,
                &format!("{} PROJECTS", status.as_str().to_ascii_uppercase()),
            );
            surface.set_element_id(list_el, &list_element_id);
            (mounted, list_el)
        };

        let inner = Rc::new(ListInner {
            status,
            store: Rc::clone(&context.store),
            surface: Rc::clone(&context.surface),
            item_template_id: templates.item_template_id.to_string(),
            mounted,
            list_el,
            list_element_id,
            assigned: RefCell::new(Vec::new()),
            items: RefCell::new(Vec::new()),
            stale: Cell::new(false),
        });

        let weak = Rc::downgrade(&inner);
        context.store.add_listener(status, move |projects| {
            if let Some(inner) = weak.upgrade() {
                inner.render(projects);
            }
        });
        debug!("event=list_mount module=ui status=ok list={status}");

        Ok(Self { inner })
    }

    pub fn status(&self) -> ProjectStatus {
        self.inner.status
    }

    pub fn root(&self) -> ElementId {
        self.inner.mounted.root
    }

    /// The `ul` element cards are rendered into.
    pub fn list_element(&self) -> ElementId {
        self.inner.list_el
    }

    pub fn list_element_id(&self) -> &str {
        &self.inner.list_element_id
    }

    /// Projects from the most recent snapshot.
    pub fn assigned_projects(&self) -> Vec<Project> {
        self.inner.assigned.borrow().clone()
    }

    /// Cards currently rendered, in snapshot order.
    pub fn items(&self) -> Vec<ProjectItem> {
        self.inner.render_pending();
        self.inner.items.borrow().clone()
    }

    /// Starts a drag on the rendered card for `project_id`, if any.
    pub fn start_drag(&self, project_id: &str) -> Option<DataTransfer> {
        self.inner.render_pending();
        let items = self.inner.items.borrow();
        let item = items.iter().find(|item| item.project_id() == project_id)?;
        let mut transfer = DataTransfer::new();
        item.drag_start(&mut transfer);
        Some(transfer)
    }

    /// Ends a drag started on one of this list's cards.
    pub fn end_drag(&self, transfer: &DataTransfer) {
        let Some(payload) = transfer.payload() else {
            return;
        };
        let items = self.inner.items.borrow();
        if let Some(item) = items
            .iter()
            .find(|item| item.project_id() == &payload.project_id)
        {
            item.drag_end(transfer);
        }
    }

    /// A card entered the list: show the droppable state.
    pub fn drag_over(&self) {
        self.inner.set_droppable(true);
    }

    pub fn drag_leave(&self) {
        self.inner.set_droppable(false);
    }

    pub fn is_droppable(&self) -> bool {
        self.inner
            .surface
            .borrow()
            .has_class(self.inner.list_el, DROPPABLE_CLASS)
    }

    /// Moves the dropped project to this list's status.
    ///
    /// Unknown or missing payloads are ignored.
    pub fn handle_drop(&self, transfer: &DataTransfer) -> DropOutcome {
        let outcome = match transfer.payload() {
            None => DropOutcome::Empty,
            Some(payload) if !self.inner.store.project_exists(&payload.project_id) => {
                debug!(
                    "event=drop module=ui status=ignored reason=unknown_project list={}",
                    self.inner.status
                );
                DropOutcome::UnknownProject
            }
            Some(payload) => {
                if self
                    .inner
                    .store
                    .update_project_status(&payload.project_id, self.inner.status)
                {
                    DropOutcome::Moved
                } else {
                    DropOutcome::Unchanged
                }
            }
        };
        self.inner.set_droppable(false);
        outcome
    }
}

impl<S: Surface> ListInner<S> {
    fn render(&self, projects: Vec<Project>) {
        let Ok(mut surface) = self.surface.try_borrow_mut() else {
            warn!(
                "event=list_render module=ui status=deferred reason=surface_busy list={} items={}",
                self.status,
                projects.len()
            );
            *self.assigned.borrow_mut() = projects;
            self.stale.set(true);
            return;
        };

        surface.clear_children(self.list_el);
        let mut items = Vec::with_capacity(projects.len());
        for project in &projects {
            match ProjectItem::new(
                &mut *surface,
                &self.item_template_id,
                &self.list_element_id,
                project.clone(),
            ) {
                Ok(item) => items.push(item),
                Err(err) => {
                    error!(
                        "event=list_render module=ui status=error list={} error={err}",
                        self.status
                    );
                    break;
                }
            }
        }
        drop(surface);

        debug!(
            "event=list_render module=ui status=ok list={} items={}",
            self.status,
            items.len()
        );
        *self.items.borrow_mut() = items;
        *self.assigned.borrow_mut() = projects;
        self.stale.set(false);
    }

    fn render_pending(&self) {
        if self.stale.get() {
            let projects = self.assigned.borrow().clone();
            self.render(projects);
        }
    }

    fn set_droppable(&self, enabled: bool) {
        if let Ok(mut surface) = self.surface.try_borrow_mut() {
            surface.set_class(self.list_el, DROPPABLE_CLASS, enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DropOutcome, ListTemplates, ProjectList};
    use crate::model::project::{Project, ProjectStatus};
    use crate::ui::context::BoardContext;
    use crate::ui::drag::{DataTransfer, DragPayload};
    use crate::ui::memory::MemorySurface;
    use crate::ui::surface::Surface;

    const TEMPLATES: ListTemplates<'static> = ListTemplates {
        list_template_id: "project-list",
        item_template_id: "single-project",
    };

    fn list(status: ProjectStatus) -> (BoardContext<MemorySurface>, ProjectList<MemorySurface>) {
        let context = BoardContext::new(MemorySurface::project_board());
        let list = ProjectList::new(&context, TEMPLATES, "app", status).expect("list mounts");
        (context, list)
    }

    #[test]
    fn mount_sets_heading_and_list_id() {
        let (context, list) = list(ProjectStatus::Finished);
        let surface = context.surface.borrow();
        assert_eq!(surface.find_by_id("finished-projects"), Some(list.root()));
        assert_eq!(
            surface.find_by_id("finished-projects-list"),
            Some(list.list_element())
        );
        let heading = surface.select(list.root(), "h2").expect("heading");
        assert_eq!(surface.text(heading), Some("FINISHED PROJECTS"));
    }

    #[test]
    fn renders_nothing_before_first_notification() {
        let (context, list) = list(ProjectStatus::Active);
        assert!(list.items().is_empty());
        assert!(context
            .surface
            .borrow()
            .children(list.list_element())
            .is_empty());
    }

    #[test]
    fn notification_replaces_rendered_items() {
        let (context, list) = list(ProjectStatus::Active);
        context.store.add_project(Project::with_id("a", "A", "d", 1));
        context.store.add_project(Project::with_id("b", "B", "d", 1));

        let ids: Vec<_> = list.items().iter().map(|i| i.project_id().clone()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(
            context.surface.borrow().children(list.list_element()).len(),
            2
        );
    }

    #[test]
    fn drop_reports_each_outcome_and_clears_droppable() {
        let (context, list) = list(ProjectStatus::Finished);
        context.store.add_project(Project::with_id("a", "A", "d", 1));

        list.drag_over();
        assert!(list.is_droppable());
        assert_eq!(list.handle_drop(&DataTransfer::new()), DropOutcome::Empty);
        assert!(!list.is_droppable());

        let unknown = DataTransfer::with_payload(DragPayload::moving("zzz"));
        assert_eq!(list.handle_drop(&unknown), DropOutcome::UnknownProject);

        let known = DataTransfer::with_payload(DragPayload::moving("a"));
        assert_eq!(list.handle_drop(&known), DropOutcome::Moved);
        assert_eq!(list.handle_drop(&known), DropOutcome::Unchanged);
        assert_eq!(list.assigned_projects().len(), 1);
    }

    #[test]
    fn snapshot_during_busy_surface_renders_on_next_access() {
        let (context, list) = list(ProjectStatus::Active);
        {
            let _held = context.surface.borrow();
            context.store.add_project(Project::with_id("a", "A", "d", 1));
            assert!(list.inner.stale.get());
            assert_eq!(list.assigned_projects().len(), 1);
        }

        let ids: Vec<_> = list.items().iter().map(|i| i.project_id().clone()).collect();
        assert_eq!(ids, ["a"]);
        assert!(!list.inner.stale.get());
        assert_eq!(
            context.surface.borrow().children(list.list_element()).len(),
            1
        );
    }

    #[test]
    fn dropped_list_does_not_outlive_its_owner() {
        let (context, list) = list(ProjectStatus::Active);
        drop(list);
        context.store.add_project(Project::with_id("a", "A", "d", 1));
        assert_eq!(context.store.listener_count(), 1);
    }
}
