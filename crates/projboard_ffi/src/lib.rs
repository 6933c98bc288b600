//! Flutter-facing bindings for the project board.

pub mod api;
