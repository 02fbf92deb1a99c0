//! Identity types for Colloquy entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Entity identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type EntityId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

/// Common interface for strongly typed entity ids.
pub trait EntityIdType: Copy + fmt::Display {
    fn new(id: Uuid) -> Self;
    fn as_uuid(&self) -> Uuid;
    fn generate() -> Self
    where
        Self: Sized,
    {
        Self::new(new_entity_id())
    }
}

macro_rules! define_entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl EntityIdType for $name {
            fn new(id: Uuid) -> Self {
                Self(id)
            }

            fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_entity_id!(
    /// Identifier for an agent persona row.
    AgentId
);
define_entity_id!(
    /// Identifier for an authenticated user.
    UserId
);
define_entity_id!(
    /// Identifier for a single transcript turn.
    TurnId
);
define_entity_id!(
    /// Identifier for a (user, agent) favorite edge.
    FavoriteId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_are_timestamp_sortable() {
        let a = new_entity_id();
        let b = new_entity_id();
        // UUIDv7 embeds a millisecond timestamp, so sequential ids never decrease.
        assert!(a <= b);
    }

    #[test]
    fn typed_id_round_trips_through_uuid() {
        let raw = new_entity_id();
        let id = AgentId::new(raw);
        assert_eq!(id.as_uuid(), raw);
        assert_eq!(id.to_string(), raw.to_string());
    }
}
