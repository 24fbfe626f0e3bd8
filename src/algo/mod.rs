//! Graph algorithms module
//!
//! Traversals run directly against the store's adjacency lists.

pub mod pathfinding;

pub use pathfinding::{shortest_path, PathResult};
