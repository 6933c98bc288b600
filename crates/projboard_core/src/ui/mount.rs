//! Mountable capability shared by every component.
//!
//! # Responsibility
//! - Instantiate a template, attach it to a host container, resolve slots.
//!
//! # Invariants
//! - Template and host are both resolved before anything is attached.
//! - Failures are reported as [`MountError`] and abort component setup.

use crate::ui::surface::{ElementId, InsertPosition, Surface};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Component setup failure caused by a missing mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    TemplateNotFound(String),
    HostNotFound(String),
    SlotNotFound {
        component: &'static str,
        selector: String,
    },
}

impl Display for MountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateNotFound(id) => write!(f, "template not found: {id}"),
            Self::HostNotFound(id) => write!(f, "host element not found: {id}"),
            Self::SlotNotFound {
                component,
                selector,
            } => write!(f, "{component} template has no `{selector}` element"),
        }
    }
}

impl Error for MountError {}

/// Where and how one component attaches to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountSpec<'a> {
    pub template_id: &'a str,
    pub host_id: &'a str,
    pub position: InsertPosition,
    /// Element id given to the mounted root, if any.
    pub element_id: Option<&'a str>,
}

/// Root element of a mounted component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mounted {
    pub root: ElementId,
    pub host: ElementId,
}

impl Mounted {
    /// Resolves a required slot under the mounted root.
    pub fn slot<S: Surface + ?Sized>(
        &self,
        surface: &S,
        component: &'static str,
        selector: &str,
    ) -> Result<ElementId, MountError> {
        surface
            .select(self.root, selector)
            .ok_or_else(|| MountError::SlotNotFound {
                component,
                selector: selector.to_string(),
            })
    }
}

/// Instantiates `spec.template_id` and attaches it inside `spec.host_id`.
pub fn mount<S: Surface + ?Sized>(
    surface: &mut S,
    spec: &MountSpec<'_>,
) -> Result<Mounted, MountError> {
    let host = surface
        .find_by_id(spec.host_id)
        .ok_or_else(|| MountError::HostNotFound(spec.host_id.to_string()))?;
    let root = surface
        .instantiate(spec.template_id)
        .ok_or_else(|| MountError::TemplateNotFound(spec.template_id.to_string()))?;
    if let Some(element_id) = spec.element_id {
        surface.set_element_id(root, element_id);
    }
    surface.insert(host, root, spec.position);
    Ok(Mounted { root, host })
}
