//! Board domain model.
//!
//! # Responsibility
//! - Define the project record shared by the store and every component.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Only `status` ever changes after creation.

pub mod project;
