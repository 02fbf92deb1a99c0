//! Colloquy Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic.

mod entities;
mod enums;
mod identity;

pub use entities::{Agent, FavoriteEdge, Turn, UserProfile};
pub use enums::{ColorScheme, IconGlyph, TurnRole, TurnRoleParseError};
pub use identity::{
    new_entity_id, AgentId, EntityId, EntityIdType, FavoriteId, Timestamp, TurnId, UserId,
};
