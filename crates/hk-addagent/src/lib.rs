//! The add-agent action `A`: grows the graph by one agent per invocation,
//! picking which configured type to add by weighted draw.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use hk_action::{Action, ActionOutcome, TimeRef};
use hk_config::Config;
use hk_core::{sample_weighted, HkResult, Minutes, SimRng};
use hk_graph::{Graph, GraphEvent};
use hk_types::{AgentType, Registry};

pub struct AddAgentAction {
    registry: Option<Rc<Registry>>,
    add_weights: Vec<f64>,
    rate: f64,
    weight: f64,
    added: u64,
    added_per_type: Vec<u64>,
    output_dir: PathBuf,
}

impl Default for AddAgentAction {
    fn default() -> Self {
        Self {
            registry: None,
            add_weights: Vec::new(),
            rate: 0.0,
            weight: 0.0,
            added: 0,
            added_per_type: Vec::new(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl AddAgentAction {
    pub fn new() -> Self {
        Self::default()
    }

    fn types(&self) -> impl Iterator<Item = (usize, &AgentType)> {
        self.registry
            .as_ref()
            .into_iter()
            .flat_map(|r| r.iter().map(|(id, t)| (id.index(), t)))
    }
}

impl Action for AddAgentAction {
    fn name(&self) -> &'static str {
        "add_agent"
    }

    fn init(&mut self, _graph: &Graph, registry: Rc<Registry>, config: &dyn Config, _time: TimeRef) -> HkResult<()> {
        self.rate = config.get_f64("rates.add.value", 1.0);
        self.add_weights = registry.iter().map(|(_, t)| t.add_weight).collect();
        self.added_per_type = vec![0; registry.len()];
        self.output_dir = PathBuf::from(config.get_string("output.directory", "output"));
        self.registry = Some(registry);
        Ok(())
    }

    fn reset(&mut self, _graph: &Graph) {
        self.weight = 0.0;
        self.added = 0;
        for c in &mut self.added_per_type {
            *c = 0;
        }
    }

    fn update_weight(&mut self, _graph: &Graph, _time: Minutes) {
        // The add rate is a configured constant, not graph-state-dependent —
        // unlike the follow action's weight, which must track population.
        self.weight = self.rate;
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn invoke(&mut self, graph: &mut Graph, rng: &mut SimRng) -> ActionOutcome {
        let Some(type_idx) = sample_weighted(rng, &self.add_weights) else {
            return ActionOutcome::FinishedOnly;
        };
        let type_id = hk_core::AgentTypeId::from(type_idx);
        match graph.grow(type_id) {
            Some(_) => {
                self.added += 1;
                self.added_per_type[type_idx] += 1;
                ActionOutcome::Happened
            }
            None => ActionOutcome::FinishedOnly,
        }
    }

    fn on_graph_event(&mut self, _graph: &Graph, _event: &GraphEvent) {}

    fn describe(&self) -> String {
        format!("add_agent (weight={:.4} added={})", self.weight, self.added)
    }

    fn dump(&self, dir: &Path) -> HkResult<()> {
        std::fs::create_dir_all(dir)?;
        let mut w = hk_report::LineWriter::create(&dir.join("add_agent_stats.dat"))?;
        w.line(&format!("rate {:.6}", self.rate))?;
        w.line(&format!("total_added {}", self.added))?;
        w.line("# type added")?;
        for (idx, atype) in self.types() {
            w.line(&format!("{} {}", atype.name, self.added_per_type[idx]))?;
        }
        w.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_config::TomlConfig;
    use std::cell::Cell;

    const CONFIG: &str = r#"
        [rates.add]
        value = 3.0

        [[agents]]
        name = "default"
        weights.add = 1.0
    "#;

    #[test]
    fn invoke_grows_graph_until_full() {
        let cfg = TomlConfig::from_str(CONFIG).unwrap();
        let registry = Rc::new(Registry::build(&cfg));
        let mut graph = Graph::new(2, registry.len());
        let mut action = AddAgentAction::new();
        let time: TimeRef = Rc::new(Cell::new(Minutes::ZERO));
        action.init(&graph, registry, &cfg, time).unwrap();
        let mut rng = SimRng::new(1);

        assert_eq!(action.invoke(&mut graph, &mut rng), ActionOutcome::Happened);
        assert_eq!(action.invoke(&mut graph, &mut rng), ActionOutcome::Happened);
        assert_eq!(action.invoke(&mut graph, &mut rng), ActionOutcome::FinishedOnly);
        assert_eq!(action.added, 2);
    }

    #[test]
    fn weight_tracks_configured_rate() {
        let cfg = TomlConfig::from_str(CONFIG).unwrap();
        let registry = Rc::new(Registry::build(&cfg));
        let graph = Graph::new(10, registry.len());
        let mut action = AddAgentAction::new();
        let time: TimeRef = Rc::new(Cell::new(Minutes::ZERO));
        action.init(&graph, registry, &cfg, time).unwrap();
        action.update_weight(&graph, Minutes::ZERO);
        assert_eq!(action.weight(), 3.0);
    }
}
