//! Per-user favorite tracking.
//!
//! Local state mirrors the remote favorite edges and is updated only after
//! the corresponding remote write resolves. A failed write leaves local
//! state untouched; the failure is logged, not surfaced.

use crate::gateway::Gateway;
use colloquy_core::{Agent, AgentId, UserId};
use std::collections::HashSet;
use tracing::warn;

#[derive(Debug, Default)]
pub struct FavoritesTracker {
    ids: HashSet<AgentId>,
}

impl FavoritesTracker {
    pub fn is_favorite(&self, agent_id: AgentId) -> bool {
        self.ids.contains(&agent_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forget everything; called when the session becomes anonymous.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the set with the remote edges. Called once per
    /// authenticated-entry; a failed fetch keeps whatever was held before.
    pub async fn refresh(&mut self, gateway: &Gateway, token: &str, user_id: UserId) {
        match gateway.list_favorite_agent_ids(token, user_id).await {
            Ok(ids) => {
                self.ids = ids.into_iter().collect();
            }
            Err(err) => {
                warn!(error = %err, "favorites fetch failed");
            }
        }
    }

    /// Flip the favorite edge for one agent: remote write first, then the
    /// local set. Callers gate on an authenticated session.
    pub async fn toggle(
        &mut self,
        gateway: &Gateway,
        token: &str,
        user_id: UserId,
        agent: &Agent,
    ) {
        if self.is_favorite(agent.agent_id) {
            match gateway.delete_favorite(token, user_id, agent.agent_id).await {
                Ok(()) => self.apply_remove(agent.agent_id),
                Err(err) => warn!(error = %err, agent = %agent.name, "unfavorite failed"),
            }
        } else {
            match gateway.insert_favorite(token, user_id, agent.agent_id).await {
                Ok(()) => self.apply_insert(agent.agent_id),
                Err(err) => warn!(error = %err, agent = %agent.name, "favorite failed"),
            }
        }
    }

    /// Local mutation applied after a successful remote insert.
    pub fn apply_insert(&mut self, agent_id: AgentId) {
        self.ids.insert(agent_id);
    }

    /// Local mutation applied after a successful remote delete.
    pub fn apply_remove(&mut self, agent_id: AgentId) {
        self.ids.remove(&agent_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_core::EntityIdType;

    #[test]
    fn toggle_is_an_involution_when_both_writes_succeed() {
        let mut tracker = FavoritesTracker::default();
        let id = AgentId::generate();
        for starting_favorite in [false, true] {
            if starting_favorite {
                tracker.apply_insert(id);
            } else {
                tracker.apply_remove(id);
            }
            let before = tracker.is_favorite(id);

            // Two toggles with successful remote calls restore the start state.
            if tracker.is_favorite(id) {
                tracker.apply_remove(id);
            } else {
                tracker.apply_insert(id);
            }
            if tracker.is_favorite(id) {
                tracker.apply_remove(id);
            } else {
                tracker.apply_insert(id);
            }

            assert_eq!(tracker.is_favorite(id), before);
        }
    }

    #[test]
    fn clear_forgets_all_edges() {
        let mut tracker = FavoritesTracker::default();
        tracker.apply_insert(AgentId::generate());
        tracker.apply_insert(AgentId::generate());
        assert_eq!(tracker.len(), 2);
        tracker.clear();
        assert!(tracker.is_empty());
    }

    #[test]
    fn insert_is_idempotent_per_edge() {
        let mut tracker = FavoritesTracker::default();
        let id = AgentId::generate();
        tracker.apply_insert(id);
        tracker.apply_insert(id);
        assert_eq!(tracker.len(), 1);
    }
}
