use hk_core::{AgentId, AgentTypeId};

/// A mutation `Graph` just performed, queued for the engine to route to
/// every action after the call that produced it returns.
///
/// `Graph` has no knowledge of which actions exist, so it records what
/// happened and lets the caller decide who cares, rather than calling back
/// into action code directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GraphEvent {
    Grown { id: AgentId, type_id: AgentTypeId },
    ConnectionAdded { followee: AgentId, follower: AgentId },
    ConnectionRemoved { followee: AgentId, follower: AgentId },
}
