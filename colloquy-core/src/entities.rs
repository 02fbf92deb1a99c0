//! Core entity structures

use crate::{
    AgentId, ColorScheme, EntityIdType, FavoriteId, IconGlyph, Timestamp, TurnId, TurnRole, UserId,
};
use serde::{Deserialize, Serialize};

/// Agent - a canned persona presented as a chat counterpart.
/// Immutable once loaded from the catalog; never mutated client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id: AgentId,
    pub name: String,
    pub description: String,
    /// Comma-separated expertise tags; the first tag is the primary one.
    pub expertise: String,
    pub color_scheme: ColorScheme,
    pub icon: IconGlyph,
    pub created_at: Timestamp,
}

impl Agent {
    /// Expertise tags in catalog order.
    pub fn expertise_tags(&self) -> Vec<&str> {
        self.expertise
            .split(", ")
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// The primary expertise tag, shown under the agent name.
    pub fn primary_expertise(&self) -> &str {
        self.expertise_tags().first().copied().unwrap_or("")
    }
}

/// Authenticated user. The client treats presence of a profile as the
/// authentication capability and only ever reads the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

/// Favorite edge - a (user, agent) bookmark pair.
/// Invariant: at most one edge exists per (user, agent) pair at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEdge {
    pub favorite_id: FavoriteId,
    pub user_id: UserId,
    pub agent_id: AgentId,
    pub created_at: Timestamp,
}

/// Turn - one message exchange unit within a transcript.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub turn_id: TurnId,
    pub role: TurnRole,
    pub content: String,
    pub created_at: Timestamp,
}

impl Turn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            turn_id: TurnId::generate(),
            role,
            content: content.into(),
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityIdType;

    fn sample_agent(expertise: &str) -> Agent {
        Agent {
            agent_id: AgentId::generate(),
            name: "Code Doctor".to_string(),
            description: "Fullstack JavaScript reviewer".to_string(),
            expertise: expertise.to_string(),
            color_scheme: ColorScheme::Emerald,
            icon: IconGlyph::Stethoscope,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn expertise_tags_preserve_order() {
        let agent = sample_agent("JavaScript, Node.js, React");
        assert_eq!(agent.expertise_tags(), vec!["JavaScript", "Node.js", "React"]);
        assert_eq!(agent.primary_expertise(), "JavaScript");
    }

    #[test]
    fn empty_expertise_yields_no_tags() {
        let agent = sample_agent("");
        assert!(agent.expertise_tags().is_empty());
        assert_eq!(agent.primary_expertise(), "");
    }

    #[test]
    fn agent_round_trips_through_json() {
        let agent = sample_agent("JavaScript, Node.js, React");
        let json = serde_json::to_string(&agent).unwrap();
        let back: Agent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, agent);
    }

    #[test]
    fn turn_round_trips_through_json() {
        let turn = Turn::new(TurnRole::Assistant, "Hello! How can I help you today?");
        let json = serde_json::to_string(&turn).unwrap();
        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, turn);
    }

    #[test]
    fn turn_constructor_stamps_identity() {
        let turn = Turn::new(TurnRole::User, "hello");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.content, "hello");
    }
}
