//! Project card component and drag source.

use crate::model::project::{Project, ProjectId};
use crate::ui::drag::{DataTransfer, DragPayload};
use crate::ui::mount::{mount, MountError, MountSpec, Mounted};
use crate::ui::surface::{ElementId, InsertPosition, Surface};
use log::debug;

const COMPONENT: &str = "project item";

/// Rendered card for one project.
///
/// The card's root element id is the project id, so hosts can route drag
/// events back to the card.
#[derive(Debug, Clone)]
pub struct ProjectItem {
    project: Project,
    mounted: Mounted,
}

impl ProjectItem {
    /// Mounts a card for `project` at the end of `host_id`.
    pub fn new<S: Surface + ?Sized>(
        surface: &mut S,
        template_id: &str,
        host_id: &str,
        project: Project,
    ) -> Result<Self, MountError> {
        let mounted = mount(
            &mut *surface,
            &MountSpec {
                template_id,
                host_id,
                position: InsertPosition::BeforeEnd,
                element_id: Some(project.id.as_str()),
            },
        )?;

        let title = mounted.slot(&*surface, COMPONENT, "h2")?;
        let people = mounted.slot(&*surface, COMPONENT, "h3")?;
        let description = mounted.slot(&*surface, COMPONENT, "p")?;
        surface.set_text(title, &project.title);
        surface.set_text(people, &people_label(project.people));
        surface.set_text(description, &project.description);

        Ok(Self { project, mounted })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project.id
    }

    pub fn root(&self) -> ElementId {
        self.mounted.root
    }

    /// Puts this card's identity on the carrier as a move payload.
    pub fn drag_start(&self, transfer: &mut DataTransfer) {
        transfer.set_payload(DragPayload::moving(self.project.id.clone()));
        debug!(
            "event=drag_start module=ui status=ok project_id={}",
            self.project.id
        );
    }

    /// Observational only.
    pub fn drag_end(&self, transfer: &DataTransfer) {
        debug!(
            "event=drag_end module=ui status=ok project_id={} effect={:?}",
            self.project.id,
            transfer.effect_allowed()
        );
    }
}

/// People-count caption shown on a card.
pub fn people_label(people: u32) -> String {
    let suffix = if people > 1 { "s" } else { "" };
    format!("{people} Person{suffix} Assigned.")
}

#[cfg(test)]
mod tests {
    use super::{people_label, ProjectItem};
    use crate::model::project::Project;
    use crate::ui::drag::{DataTransfer, DropEffect};
    use crate::ui::memory::MemorySurface;
    use crate::ui::surface::Surface;

    #[test]
    fn people_label_pluralizes() {
        assert_eq!(people_label(1), "1 Person Assigned.");
        assert_eq!(people_label(4), "4 Persons Assigned.");
    }

    #[test]
    fn card_renders_project_fields() {
        let mut surface = MemorySurface::project_board();
        let project = Project::with_id("p-1", "Ship", "release notes", 2);
        let item = ProjectItem::new(&mut surface, "single-project", "app", project)
            .expect("card mounts");

        assert_eq!(surface.find_by_id("p-1"), Some(item.root()));
        let texts: Vec<_> = surface
            .children(item.root())
            .iter()
            .map(|child| surface.text(*child).unwrap_or_default().to_string())
            .collect();
        assert_eq!(texts, ["Ship", "2 Persons Assigned.", "release notes"]);
    }

    #[test]
    fn drag_start_sets_move_payload() {
        let mut surface = MemorySurface::project_board();
        let item = ProjectItem::new(
            &mut surface,
            "single-project",
            "app",
            Project::with_id("p-1", "A", "d", 1),
        )
        .expect("card mounts");

        let mut transfer = DataTransfer::new();
        item.drag_start(&mut transfer);
        let payload = transfer.payload().expect("payload set");
        assert_eq!(payload.project_id, "p-1");
        assert_eq!(payload.effect, DropEffect::Move);

        item.drag_end(&transfer);
        assert_eq!(transfer.payload().map(|p| p.project_id.as_str()), Some("p-1"));
    }
}
