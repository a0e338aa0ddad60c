//! Id-indexed agent storage.
//!
//! # Layout
//!
//! Agents live in a `Vec<Option<Agent>>` indexed directly by `AgentId`:
//!
//! ```ignore
//! let agent = store.get(id)?;   // O(1), no hashing
//! ```
//!
//! Ids are handed out monotonically by the factory and never reused, so a
//! removed agent leaves a `None` hole and any stale id (a dead mother, a
//! dead child) simply resolves to `None`.  Membership in the store *is* being
//! alive.

use pd_core::AgentId;

use crate::Agent;

#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    slots: Vec<Option<Agent>>,
    live:  usize,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of living agents.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Add a freshly created agent.
    ///
    /// # Panics
    ///
    /// If the agent's id is already in use.  Ids come from one factory, so a
    /// collision is a programming error.
    pub fn insert(&mut self, agent: Agent) {
        let index = agent.id.index();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        assert!(self.slots[index].is_none(), "{} inserted twice", agent.id);
        self.slots[index] = Some(agent);
        self.live += 1;
    }

    /// Remove an agent from the living population.
    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        let removed = self.slots.get_mut(id.index()).and_then(Option::take);
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn contains(&self, id: AgentId) -> bool {
        self.get(id).is_some()
    }

    /// Mutable access to two distinct living agents at once.
    ///
    /// # Panics
    ///
    /// If `a == b`.
    pub fn get_pair_mut(&mut self, a: AgentId, b: AgentId) -> Option<(&mut Agent, &mut Agent)> {
        assert_ne!(a, b, "get_pair_mut needs two distinct agents");
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        if hi.index() >= self.slots.len() {
            return None;
        }
        let (head, tail) = self.slots.split_at_mut(hi.index());
        let lo_agent = head[lo.index()].as_mut()?;
        let hi_agent = tail[0].as_mut()?;
        if a < b { Some((lo_agent, hi_agent)) } else { Some((hi_agent, lo_agent)) }
    }

    /// Snapshot of living ids in ascending order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.iter().map(|a| a.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Income of `id`'s current partner, if both are alive.
    pub fn partner_wage(&self, id: AgentId, benefit_level: f64) -> Option<f64> {
        let partner = self.get(id)?.partner?;
        self.get(partner).map(|p| p.employment.current_wage(benefit_level))
    }
}
