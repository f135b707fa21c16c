//! The runnable simulation itself.

use std::path::PathBuf;
use std::rc::Rc;

use hk_core::AgentTypeId;
use hk_engine::Engine;
use hk_graph::Graph;
use hk_types::Registry;

use crate::error::SimResult;
use crate::termination::TerminationCriteria;

/// Summary returned by [`Simulation::run`] — enough to print a one-line
/// result without re-reading the dumped report files.
#[derive(Debug)]
pub struct SimulationSummary {
    pub steps: u64,
    pub simulated_time: hk_core::Minutes,
    pub agent_count: u32,
}

pub struct Simulation {
    pub(crate) graph: Graph,
    pub(crate) engine: Engine,
    pub(crate) registry: Rc<Registry>,
    pub(crate) termination: TerminationCriteria,
    pub(crate) output_dir: PathBuf,
}

impl Simulation {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Grow the graph by one agent of `type_id` before the run starts.
    pub fn seed_agent(&mut self, type_id: AgentTypeId) {
        self.engine.seed_agent(&mut self.graph, type_id);
    }

    /// Run to completion (a configured step/time limit, or until no action
    /// has any weight left), then write every action's report files.
    pub fn run(&mut self) -> SimResult<SimulationSummary> {
        while !self.termination.reached(&self.engine, &self.graph) {
            log::debug!("{}", self.engine.describe());
            if !self.engine.step(&mut self.graph) {
                log::info!("stopping: no action has any weight left");
                break;
            }
        }
        self.engine.dump_all(&self.output_dir)?;
        Ok(SimulationSummary {
            steps: self.engine.steps(),
            simulated_time: self.engine.time(),
            agent_count: self.graph.size(),
        })
    }

    /// Reset all mutable state (graph, action counters, clock) back to a
    /// fresh start, without re-reading configuration. Used to re-run the
    /// same configured simulation, e.g. under a different RNG seed via a
    /// freshly built `Simulation`.
    pub fn reset(&mut self) {
        self.graph.reset();
        self.engine.reset(&self.graph);
    }
}
