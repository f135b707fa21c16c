//! The directed follower graph.
//!
//! Dense integer agent ids index in parallel into a followers/followees
//! adjacency-set pair (who follows me / who do I follow), structure-of-arrays
//! style. Sets are `rustc_hash`-backed for fast hot-path adjacency lookups.

mod events;

use hk_core::{AgentId, AgentTypeId};
use rustc_hash::FxHashSet;

pub use events::GraphEvent;

/// Owns all agent and adjacency data. Growth is append-only and bounded by
/// `max_agents`; edges may be added and removed freely.
pub struct Graph {
    followers: Vec<FxHashSet<AgentId>>,
    followees: Vec<FxHashSet<AgentId>>,
    agent_type: Vec<AgentTypeId>,
    by_type: Vec<Vec<AgentId>>,
    max_agents: u32,
    events: Vec<GraphEvent>,
}

impl Graph {
    /// `max_agents` bounds how many agents `grow()` will ever admit;
    /// `type_count` pre-sizes the per-type id buckets.
    pub fn new(max_agents: u32, type_count: usize) -> Self {
        Self {
            followers: Vec::new(),
            followees: Vec::new(),
            agent_type: Vec::new(),
            by_type: vec![Vec::new(); type_count],
            max_agents,
            events: Vec::new(),
        }
    }

    /// Current agent count.
    #[inline]
    pub fn size(&self) -> u32 {
        self.followers.len() as u32
    }

    #[inline]
    pub fn max_size(&self) -> u32 {
        self.max_agents
    }

    /// Append one new agent of `type_id`. Returns `None` if the graph is
    /// already at `max_agents` — not an error, just nothing left to grow
    /// into.
    pub fn grow(&mut self, type_id: AgentTypeId) -> Option<AgentId> {
        if self.size() >= self.max_agents {
            return None;
        }
        let id = AgentId::from(self.followers.len());
        self.followers.push(FxHashSet::default());
        self.followees.push(FxHashSet::default());
        self.agent_type.push(type_id);
        if self.by_type.len() <= type_id.index() {
            self.by_type.resize(type_id.index() + 1, Vec::new());
        }
        self.by_type[type_id.index()].push(id);
        self.events.push(GraphEvent::Grown { id, type_id });
        Some(id)
    }

    /// `followee` gains `follower` as a new follower.
    ///
    /// Returns `false` (a no-op, not an error) if `followee == follower` or
    /// the edge already exists. Panics if either id is out of range —
    /// callers only ever reach `connect` with ids produced by
    /// `select_follower`/`select_followee`, so an out-of-range id here is a
    /// bug upstream.
    pub fn connect(&mut self, followee: AgentId, follower: AgentId) -> bool {
        if followee == follower {
            return false;
        }
        if !self.followers[followee.index()].insert(follower) {
            return false;
        }
        self.followees[follower.index()].insert(followee);
        self.events.push(GraphEvent::ConnectionAdded { followee, follower });
        true
    }

    /// Inverse of `connect`. Returns `false` if the edge did not exist.
    pub fn disconnect(&mut self, followee: AgentId, follower: AgentId) -> bool {
        if !self.followers[followee.index()].remove(&follower) {
            return false;
        }
        self.followees[follower.index()].remove(&followee);
        self.events.push(GraphEvent::ConnectionRemoved { followee, follower });
        true
    }

    pub fn have_connection(&self, followee: AgentId, follower: AgentId) -> bool {
        self.followers[followee.index()].contains(&follower)
    }

    pub fn followers_size(&self, id: AgentId) -> u32 {
        self.followers[id.index()].len() as u32
    }

    pub fn followees_size(&self, id: AgentId) -> u32 {
        self.followees[id.index()].len() as u32
    }

    pub fn agent_type(&self, id: AgentId) -> AgentTypeId {
        self.agent_type[id.index()]
    }

    /// How many agents of `type_id` exist right now.
    pub fn count(&self, type_id: AgentTypeId) -> u32 {
        self.by_type
            .get(type_id.index())
            .map(|v| v.len() as u32)
            .unwrap_or(0)
    }

    /// The `k`-th agent of `type_id`, in creation order.
    pub fn agent_by_type(&self, type_id: AgentTypeId, k: usize) -> AgentId {
        self.by_type[type_id.index()][k]
    }

    /// Drain and return every event recorded since the last drain, in the
    /// order the mutations happened.
    pub fn take_events(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.events)
    }

    /// Discard all agents and edges, back to an empty graph with the same
    /// capacity and type-bucket layout.
    pub fn reset(&mut self) {
        let type_count = self.by_type.len();
        *self = Graph::new(self.max_agents, type_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_core::AgentTypeId;

    fn t(n: u16) -> AgentTypeId {
        AgentTypeId(n)
    }

    #[test]
    fn grow_respects_max_agents() {
        let mut g = Graph::new(2, 1);
        assert!(g.grow(t(0)).is_some());
        assert!(g.grow(t(0)).is_some());
        assert!(g.grow(t(0)).is_none());
        assert_eq!(g.size(), 2);
    }

    #[test]
    fn connect_rejects_self_loop_and_duplicate() {
        let mut g = Graph::new(4, 1);
        let a = g.grow(t(0)).unwrap();
        let b = g.grow(t(0)).unwrap();
        assert!(!g.connect(a, a));
        assert!(g.connect(a, b));
        assert!(!g.connect(a, b));
        assert!(g.have_connection(a, b));
        assert_eq!(g.followers_size(a), 1);
        assert_eq!(g.followees_size(b), 1);
    }

    #[test]
    fn disconnect_reverses_connect() {
        let mut g = Graph::new(4, 1);
        let a = g.grow(t(0)).unwrap();
        let b = g.grow(t(0)).unwrap();
        g.connect(a, b);
        assert!(g.disconnect(a, b));
        assert!(!g.have_connection(a, b));
        assert!(!g.disconnect(a, b));
    }

    #[test]
    fn events_accumulate_and_drain_in_order() {
        let mut g = Graph::new(4, 1);
        let a = g.grow(t(0)).unwrap();
        let b = g.grow(t(0)).unwrap();
        g.connect(a, b);
        let events = g.take_events();
        assert_eq!(
            events,
            vec![
                GraphEvent::Grown { id: a, type_id: t(0) },
                GraphEvent::Grown { id: b, type_id: t(0) },
                GraphEvent::ConnectionAdded { followee: a, follower: b },
            ]
        );
        assert!(g.take_events().is_empty());
    }

    #[test]
    fn count_and_agent_by_type_track_creation_order() {
        let mut g = Graph::new(4, 2);
        let a = g.grow(t(0)).unwrap();
        let b = g.grow(t(1)).unwrap();
        let c = g.grow(t(0)).unwrap();
        assert_eq!(g.count(t(0)), 2);
        assert_eq!(g.count(t(1)), 1);
        assert_eq!(g.agent_by_type(t(0), 0), a);
        assert_eq!(g.agent_by_type(t(0), 1), c);
        assert_eq!(g.agent_by_type(t(1), 0), b);
    }
}
