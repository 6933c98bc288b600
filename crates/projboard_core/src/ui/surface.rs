//! Host rendering surface contract.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle to one element owned by a surface.
///
/// The generation changes whenever a slot is reused, so a handle to a
/// discarded element never resolves to its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

impl ElementId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Surface shared between all components of one board.
pub type SharedSurface<S> = Rc<RefCell<S>>;

/// Where a mounted element lands inside its host container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before the host's first child.
    AfterBegin,
    /// After the host's last child.
    BeforeEnd,
}

/// Primitive operations the components need from a rendering host.
///
/// Templates are addressed by id and instantiated as detached element
/// trees; containers are addressed by element id among attached elements.
pub trait Surface {
    /// Clones the root element of template `template_id`, detached.
    fn instantiate(&mut self, template_id: &str) -> Option<ElementId>;

    /// Looks up an attached element by its element id.
    fn find_by_id(&self, element_id: &str) -> Option<ElementId>;

    fn insert(&mut self, host: ElementId, element: ElementId, position: InsertPosition);

    fn set_element_id(&mut self, element: ElementId, element_id: &str);

    /// First descendant of `root` matching `selector` (`#id` or a tag name).
    fn select(&self, root: ElementId, selector: &str) -> Option<ElementId>;

    fn set_text(&mut self, element: ElementId, text: &str);

    /// Current value of a form field.
    fn value(&self, element: ElementId) -> String;

    fn set_value(&mut self, element: ElementId, value: &str);

    /// Removes every child of `element` and discards their subtrees.
    ///
    /// Handles into a discarded subtree stop resolving.
    fn clear_children(&mut self, element: ElementId);

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool);

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Shows a user-facing message.
    fn alert(&mut self, message: &str);
}
