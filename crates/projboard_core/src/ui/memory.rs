//! In-memory rendering surface.
//!
//! # Responsibility
//! - Implement [`Surface`] over a small element arena.
//! - Ship the board's templates and `app` container for headless hosts
//!   (CLI, FFI, tests).
//!
//! # Invariants
//! - Cleared subtrees are freed and their slots reused; a reused slot gets
//!   a new generation, so stale handles resolve to nothing.
//! - Id lookups only see elements attached to the document.

use crate::ui::surface::{ElementId, InsertPosition, Surface};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

pub const APP_HOST_ID: &str = "app";
pub const INPUT_TEMPLATE_ID: &str = "project-input";
pub const LIST_TEMPLATE_ID: &str = "project-list";
pub const ITEM_TEMPLATE_ID: &str = "single-project";

/// Declarative template element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    pub tag: String,
    pub element_id: Option<String>,
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            element_id: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    pub fn child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    element_id: Option<String>,
    classes: BTreeSet<String>,
    text: String,
    value: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Arena-backed surface with a single document root.
#[derive(Debug)]
pub struct MemorySurface {
    slots: Vec<Slot>,
    free: Vec<u32>,
    document: ElementId,
    templates: HashMap<String, TemplateNode>,
    alerts: Vec<String>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// Creates an empty document without templates.
    pub fn new() -> Self {
        let body = Element {
            tag: "body".to_string(),
            ..Element::default()
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                element: Some(body),
            }],
            free: Vec::new(),
            document: ElementId::new(0, 0),
            templates: HashMap::new(),
            alerts: Vec::new(),
        }
    }

    /// Document with the `app` container and the board templates.
    pub fn project_board() -> Self {
        let mut surface = Self::new();
        surface.add_container(APP_HOST_ID);
        surface.register_template(
            INPUT_TEMPLATE_ID,
            TemplateNode::new("form")
                .child(TemplateNode::new("input").with_id("title"))
                .child(TemplateNode::new("textarea").with_id("description"))
                .child(TemplateNode::new("input").with_id("people"))
                .child(TemplateNode::new("button")),
        );
        surface.register_template(
            LIST_TEMPLATE_ID,
            TemplateNode::new("section")
                .child(TemplateNode::new("header").child(TemplateNode::new("h2")))
                .child(TemplateNode::new("ul")),
        );
        surface.register_template(
            ITEM_TEMPLATE_ID,
            TemplateNode::new("li")
                .child(TemplateNode::new("h2"))
                .child(TemplateNode::new("h3"))
                .child(TemplateNode::new("p")),
        );
        surface
    }

    /// Appends a `div` container with `element_id` to the document.
    pub fn add_container(&mut self, element_id: &str) -> ElementId {
        let container = self.alloc(Element {
            tag: "div".to_string(),
            element_id: Some(element_id.to_string()),
            ..Element::default()
        });
        self.insert(self.document, container, InsertPosition::BeforeEnd);
        container
    }

    pub fn register_template(&mut self, template_id: &str, root: TemplateNode) {
        self.templates.insert(template_id.to_string(), root);
    }

    pub fn document(&self) -> ElementId {
        self.document
    }

    /// Messages raised through [`Surface::alert`], oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.get(element).map(|el| el.text.as_str())
    }

    pub fn element_id(&self, element: ElementId) -> Option<&str> {
        self.get(element).and_then(|el| el.element_id.as_deref())
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.get(element)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live elements, attached or not.
    pub fn element_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether `element` is reachable from the document root.
    pub fn is_attached(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == self.document {
                return true;
            }
            current = self.get(id).and_then(|el| el.parent);
        }
        false
    }

    /// Indented outline of the attached tree, one element per line.
    pub fn render_outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(self.document, 0, &mut out);
        out
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn write_outline(&self, element: ElementId, depth: usize, out: &mut String) {
        let Some(el) = self.get(element) else {
            return;
        };
        let _ = write!(out, "{}<{}", "  ".repeat(depth), el.tag);
        if let Some(element_id) = &el.element_id {
            let _ = write!(out, "#{element_id}");
        }
        for class in &el.classes {
            let _ = write!(out, ".{class}");
        }
        out.push('>');
        if !el.text.is_empty() {
            let _ = write!(out, " {}", el.text);
        }
        if !el.value.is_empty() {
            let _ = write!(out, " value={:?}", el.value);
        }
        out.push('\n');
        for child in &el.children {
            self.write_outline(*child, depth + 1, out);
        }
    }

    fn get(&self, element: ElementId) -> Option<&Element> {
        let slot = self.slots.get(element.index() as usize)?;
        if slot.generation != element.generation() {
            return None;
        }
        slot.element.as_ref()
    }

    fn get_mut(&mut self, element: ElementId) -> Option<&mut Element> {
        let slot = self.slots.get_mut(element.index() as usize)?;
        if slot.generation != element.generation() {
            return None;
        }
        slot.element.as_mut()
    }

    fn alloc(&mut self, element: Element) -> ElementId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.element = Some(element);
            return ElementId::new(index, slot.generation);
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        ElementId::new(index, 0)
    }

    /// Frees `element` and its whole subtree.
    fn release(&mut self, element: ElementId) {
        let Some(slot) = self.slots.get_mut(element.index() as usize) else {
            return;
        };
        if slot.generation != element.generation() {
            return;
        }
        let Some(el) = slot.element.take() else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(element.index());
        for child in el.children {
            self.release(child);
        }
    }

    fn build(&mut self, node: &TemplateNode, parent: Option<ElementId>) -> ElementId {
        let id = self.alloc(Element {
            tag: node.tag.clone(),
            element_id: node.element_id.clone(),
            parent,
            ..Element::default()
        });
        for child in &node.children {
            let child_id = self.build(child, Some(id));
            if let Some(el) = self.get_mut(id) {
                el.children.push(child_id);
            }
        }
        id
    }

    fn detach(&mut self, element: ElementId) {
        let Some(parent) = self.get(element).and_then(|el| el.parent) else {
            return;
        };
        if let Some(parent_el) = self.get_mut(parent) {
            parent_el.children.retain(|child| *child != element);
        }
        if let Some(el) = self.get_mut(element) {
            el.parent = None;
        }
    }

    fn find_descendant(
        &self,
        root: ElementId,
        matches: &dyn Fn(&Element) -> bool,
    ) -> Option<ElementId> {
        let el = self.get(root)?;
        for child in &el.children {
            if self.get(*child).is_some_and(matches) {
                return Some(*child);
            }
            if let Some(found) = self.find_descendant(*child, matches) {
                return Some(found);
            }
        }
        None
    }
}

impl Surface for MemorySurface {
    fn instantiate(&mut self, template_id: &str) -> Option<ElementId> {
        let template = self.templates.get(template_id)?.clone();
        Some(self.build(&template, None))
    }

    fn find_by_id(&self, element_id: &str) -> Option<ElementId> {
        self.find_descendant(self.document, &|el: &Element| {
            el.element_id.as_deref() == Some(element_id)
        })
    }

    fn insert(&mut self, host: ElementId, element: ElementId, position: InsertPosition) {
        if host == element || self.get(host).is_none() || self.get(element).is_none() {
            return;
        }
        self.detach(element);
        if let Some(host_el) = self.get_mut(host) {
            match position {
                InsertPosition::AfterBegin => host_el.children.insert(0, element),
                InsertPosition::BeforeEnd => host_el.children.push(element),
            }
        }
        if let Some(el) = self.get_mut(element) {
            el.parent = Some(host);
        }
    }

    fn set_element_id(&mut self, element: ElementId, element_id: &str) {
        if let Some(el) = self.get_mut(element) {
            el.element_id = Some(element_id.to_string());
        }
    }

    fn select(&self, root: ElementId, selector: &str) -> Option<ElementId> {
        match selector.strip_prefix('#') {
            Some(element_id) => self.find_descendant(root, &|el: &Element| {
                el.element_id.as_deref() == Some(element_id)
            }),
            None => self.find_descendant(root, &|el: &Element| el.tag == selector),
        }
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(el) = self.get_mut(element) {
            el.text = text.to_string();
        }
    }

    fn value(&self, element: ElementId) -> String {
        self.get(element)
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, element: ElementId, value: &str) {
        if let Some(el) = self.get_mut(element) {
            el.value = value.to_string();
        }
    }

    fn clear_children(&mut self, element: ElementId) {
        let Some(el) = self.get_mut(element) else {
            return;
        };
        let children = std::mem::take(&mut el.children);
        for child in children {
            self.release(child);
        }
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) {
        if let Some(el) = self.get_mut(element) {
            if enabled {
                el.classes.insert(class.to_string());
            } else {
                el.classes.remove(class);
            }
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.get(element)
            .is_some_and(|el| el.classes.contains(class))
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySurface, TemplateNode, APP_HOST_ID, ITEM_TEMPLATE_ID};
    use crate::ui::surface::{InsertPosition, Surface};

    #[test]
    fn instantiated_templates_stay_detached_until_inserted() {
        let mut surface = MemorySurface::project_board();
        let card = surface
            .instantiate(ITEM_TEMPLATE_ID)
            .expect("item template registered");
        surface.set_element_id(card, "card-1");
        assert_eq!(surface.find_by_id("card-1"), None);

        let app = surface.find_by_id(APP_HOST_ID).expect("app container");
        surface.insert(app, card, InsertPosition::BeforeEnd);
        assert_eq!(surface.find_by_id("card-1"), Some(card));
        assert!(surface.is_attached(card));
    }

    #[test]
    fn insert_positions_order_children() {
        let mut surface = MemorySurface::new();
        surface.register_template("t", TemplateNode::new("p"));
        let host = surface.add_container("host");

        let first = surface.instantiate("t").expect("template");
        let second = surface.instantiate("t").expect("template");
        surface.insert(host, first, InsertPosition::BeforeEnd);
        surface.insert(host, second, InsertPosition::AfterBegin);

        assert_eq!(surface.children(host), &[second, first]);
    }

    #[test]
    fn select_matches_ids_and_tags_in_document_order() {
        let mut surface = MemorySurface::project_board();
        let form = surface.instantiate("project-input").expect("template");

        let description = surface.select(form, "textarea").expect("textarea");
        assert_eq!(surface.element_id(description), Some("description"));
        let first_input = surface.select(form, "input").expect("input");
        assert_eq!(surface.element_id(first_input), Some("title"));
        assert_eq!(surface.select(form, "#missing"), None);
    }

    #[test]
    fn clear_children_detaches_subtree() {
        let mut surface = MemorySurface::project_board();
        let app = surface.find_by_id(APP_HOST_ID).expect("app container");
        let card = surface.instantiate(ITEM_TEMPLATE_ID).expect("template");
        surface.set_element_id(card, "card-1");
        surface.insert(app, card, InsertPosition::BeforeEnd);

        surface.clear_children(app);
        assert!(surface.children(app).is_empty());
        assert_eq!(surface.find_by_id("card-1"), None);
    }

    #[test]
    fn cleared_slots_are_reused_and_stale_handles_stop_resolving() {
        let mut surface = MemorySurface::project_board();
        let app = surface.find_by_id(APP_HOST_ID).expect("app container");
        let card = surface.instantiate(ITEM_TEMPLATE_ID).expect("template");
        surface.set_element_id(card, "card-1");
        surface.insert(app, card, InsertPosition::BeforeEnd);
        let live = surface.element_count();
        let slots = surface.slot_count();

        surface.clear_children(app);
        assert_eq!(surface.element_count(), live - 4);
        assert_eq!(surface.element_id(card), None);

        let next = surface.instantiate(ITEM_TEMPLATE_ID).expect("template");
        assert_eq!(surface.slot_count(), slots);
        assert_ne!(next, card);
        surface.set_text(card, "stale");
        assert_eq!(surface.text(next), Some(""));
    }

    #[test]
    fn outline_shows_ids_classes_and_text() {
        let mut surface = MemorySurface::new();
        let host = surface.add_container("host");
        surface.set_class(host, "droppable", true);
        surface.set_text(host, "hello");

        let outline = surface.render_outline();
        assert!(outline.contains("<div#host.droppable> hello"), "{outline}");
    }
}
