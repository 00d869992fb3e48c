use super::{load, store};
use crate::address::Address;
use crate::state::{AgentState, StateError, WorldState};

/// Agent records, stored at the agent's own address.
pub struct AgentRepository<S> {
    state: S,
}

impl<S> AgentRepository<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }
}

impl<S: AsRef<WorldState>> AgentRepository<S> {
    pub fn agent(&self, address: &Address) -> Result<Option<AgentState>, StateError> {
        load(self.state.as_ref(), *address)
    }

    /// Stored agent record, or a fresh one with no avatars.
    pub fn agent_or_new(&self, address: &Address) -> Result<AgentState, StateError> {
        Ok(self
            .agent(address)?
            .unwrap_or_else(|| AgentState::new(*address)))
    }
}

impl<S: AsMut<WorldState>> AgentRepository<S> {
    pub fn set_agent(&mut self, agent: &AgentState) -> Result<(), StateError> {
        store(self.state.as_mut(), agent.address, agent)
    }
}
