//! In-process board state and change notification.
//!
//! # Responsibility
//! - Hold the authoritative ordered sequence of projects.
//! - Push per-status snapshots to registered observers after each mutation.
//!
//! # Invariants
//! - One store instance per running board, shared by reference.
//! - Observers are invoked synchronously in registration order.

pub mod listener;
pub mod project_state;
