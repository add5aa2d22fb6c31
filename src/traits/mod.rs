//! Trait definitions for typed Taleo entities.
//!
//! Each entity type wraps a [`Resource`](crate::Resource) of one static kind
//! and gets fetching and searching through blanket implementations.

mod entity;
mod fetch;
mod search;

pub use entity::Entity;
pub use fetch::Fetch;
pub use search::Search;
