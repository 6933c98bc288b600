//! Board UI components over a host rendering surface.
//!
//! # Responsibility
//! - Define the surface contract the components render through.
//! - Provide the input form, status list and project card components.
//!
//! # Invariants
//! - Components never hold a surface borrow while calling into the store;
//!   store notifications re-render lists synchronously.
//! - A host holding a surface borrow during a mutation defers the affected
//!   lists' render until the list is next read or dragged from.
//! - A missing template, host or slot fails component construction.

pub mod context;
pub mod drag;
pub mod memory;
pub mod mount;
pub mod project_input;
pub mod project_item;
pub mod project_list;
pub mod surface;
