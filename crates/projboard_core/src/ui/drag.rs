//! Typed drag-and-drop payload.

use crate::model::project::ProjectId;

/// Operation a drag gesture is allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    Move,
    Copy,
}

/// Data carried from a drag source to a drop target: exactly one project
/// identity plus the intended operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub project_id: ProjectId,
    pub effect: DropEffect,
}

impl DragPayload {
    pub fn moving(project_id: impl Into<ProjectId>) -> Self {
        Self {
            project_id: project_id.into(),
            effect: DropEffect::Move,
        }
    }
}

/// Carrier handed to drag handlers for the duration of one gesture.
///
/// Holds at most one payload; setting a new one replaces the previous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    payload: Option<DragPayload>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carrier already holding `payload`, as a host receives it on drop.
    pub fn with_payload(payload: DragPayload) -> Self {
        Self {
            payload: Some(payload),
        }
    }

    pub fn set_payload(&mut self, payload: DragPayload) {
        self.payload = Some(payload);
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.payload.as_ref()
    }

    /// Effect allowed by the current payload; `Move` when empty.
    pub fn effect_allowed(&self) -> DropEffect {
        self.payload
            .as_ref()
            .map(|payload| payload.effect)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{DataTransfer, DragPayload, DropEffect};

    #[test]
    fn effect_follows_the_current_payload() {
        let mut transfer = DataTransfer::new();
        assert_eq!(transfer.effect_allowed(), DropEffect::Move);

        transfer.set_payload(DragPayload {
            project_id: "p-1".to_string(),
            effect: DropEffect::Copy,
        });
        assert_eq!(transfer.effect_allowed(), DropEffect::Copy);

        transfer.set_payload(DragPayload::moving("p-2"));
        assert_eq!(transfer.effect_allowed(), DropEffect::Move);
        assert_eq!(
            transfer.payload().map(|payload| payload.project_id.as_str()),
            Some("p-2")
        );
    }
}
