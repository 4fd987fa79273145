//! Common types for all list entities

pub mod entity_id;

pub use entity_id::EntityId;
