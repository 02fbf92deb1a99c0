//! Agent catalog loader.

use crate::gateway::Gateway;
use colloquy_core::Agent;

/// Loading lifecycle of the agent catalog.
///
/// `Ready` with an empty list is distinct from both `Loading` and `Failed`.
/// Failure is terminal until the caller explicitly refetches; there is no
/// retry policy here.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Ready(Vec<Agent>),
    Failed(String),
}

impl CatalogState {
    pub fn agents(&self) -> &[Agent] {
        match self {
            CatalogState::Ready(agents) => agents,
            _ => &[],
        }
    }
}

/// Fetch the full catalog, ordered by creation time ascending.
///
/// Callers set their state to [`CatalogState::Loading`] before awaiting this;
/// re-invocation while a load is in flight simply restarts it.
pub async fn load(gateway: &Gateway) -> CatalogState {
    match gateway.list_agents().await {
        Ok(agents) => CatalogState::Ready(agents),
        Err(err) => CatalogState::Failed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_with_no_agents_is_not_loading_or_failed() {
        let state = CatalogState::Ready(Vec::new());
        assert!(state.agents().is_empty());
        assert_ne!(state, CatalogState::Loading);
        assert!(!matches!(state, CatalogState::Failed(_)));
    }

    #[test]
    fn loading_and_failed_expose_no_agents() {
        assert!(CatalogState::Loading.agents().is_empty());
        assert!(CatalogState::Failed("boom".to_string()).agents().is_empty());
    }
}
