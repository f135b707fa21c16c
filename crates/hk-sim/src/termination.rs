//! When a run stops.

use hk_core::Minutes;
use hk_engine::Engine;
use hk_graph::Graph;

#[derive(Clone, Copy, Debug, Default)]
pub struct TerminationCriteria {
    pub max_steps: Option<u64>,
    pub max_time: Option<Minutes>,
    pub max_agents: Option<u32>,
}

impl TerminationCriteria {
    /// `true` once any configured limit has been reached: `steps`, `time`,
    /// or the graph's agent count.
    pub fn reached(&self, engine: &Engine, graph: &Graph) -> bool {
        if let Some(max_steps) = self.max_steps {
            if engine.steps() >= max_steps {
                return true;
            }
        }
        if let Some(max_time) = self.max_time {
            if engine.time().0 >= max_time.0 {
                return true;
            }
        }
        if let Some(max_agents) = self.max_agents {
            if graph.size() >= max_agents {
                return true;
            }
        }
        false
    }
}
