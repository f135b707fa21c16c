//! Fluent builder wiring config → graph/registry/actions/engine.

use std::path::PathBuf;
use std::rc::Rc;

use hk_action::Action;
use hk_addagent::AddAgentAction;
use hk_config::Config;
use hk_core::Minutes;
use hk_engine::{Engine, TimeMode};
use hk_follow::FollowAction;
use hk_graph::Graph;
use hk_types::Registry;

use crate::error::SimResult;
use crate::sim::Simulation;
use crate::termination::TerminationCriteria;

/// Builds a [`Simulation`] from a loaded [`Config`].
///
/// # Example
///
/// ```rust,ignore
/// let cfg = TomlConfig::load(Path::new("run.toml"))?;
/// let mut sim = SimulationBuilder::new(&cfg, 42).build()?;
/// let summary = sim.run()?;
/// ```
pub struct SimulationBuilder<'c> {
    config: &'c dyn Config,
    seed: u64,
}

impl<'c> SimulationBuilder<'c> {
    pub fn new(config: &'c dyn Config, seed: u64) -> Self {
        Self { config, seed }
    }

    pub fn build(self) -> SimResult<Simulation> {
        let registry = Rc::new(Registry::build(self.config));
        let max_agents = self.config.get_u64("network.max_agents", 10_000) as u32;
        let mut graph = Graph::new(max_agents, registry.len().max(1));

        let time_mode = if self.config.get_bool("engine.poisson_time", true) {
            TimeMode::Poisson
        } else {
            TimeMode::Deterministic
        };
        let mut engine = Engine::new(self.seed, time_mode);
        let time = engine.time_handle();

        let mut add_agent: Box<dyn Action> = Box::new(AddAgentAction::new());
        add_agent.init(&graph, registry.clone(), self.config, time.clone())?;
        engine.register(add_agent);

        let mut follow: Box<dyn Action> = Box::new(FollowAction::new());
        follow.init(&graph, registry.clone(), self.config, time.clone())?;
        engine.register(follow);

        engine.call_post_init();

        let max_steps = self.config.get_u64("termination.max_steps", 0);
        let max_time = self.config.get_f64("termination.max_time", 0.0);
        let termination = TerminationCriteria {
            max_steps: (max_steps > 0).then_some(max_steps),
            max_time: (max_time > 0.0).then_some(Minutes(max_time)),
            max_agents: Some(max_agents),
        };

        let output_dir = PathBuf::from(self.config.get_string("output.directory", "output"));

        let mut sim = Simulation {
            graph,
            engine,
            registry,
            termination,
            output_dir,
        };

        let initial_agents = self.config.get_u64("network.initial_agents", 2);
        if sim.registry().len() > 0 {
            for i in 0..initial_agents {
                let type_id = hk_core::AgentTypeId::from((i as usize) % sim.registry().len());
                sim.seed_agent(type_id);
            }
        }

        Ok(sim)
    }
}
