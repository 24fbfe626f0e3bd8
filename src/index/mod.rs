//! Property Indexing module
//!
//! Provides the exact-match (key, value) index behind property lookups.

pub mod property_index;

pub use property_index::{IndexMode, PropertyIndex};
