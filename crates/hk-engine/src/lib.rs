//! The engine: holds the action list, the shared RNG, and the clock, and
//! drives one step at a time.
//!
//! Each step builds a weights vector from every registered action and
//! samples one via `sample_weighted`. There are no signal objects: `step`
//! inlines the event-rate/time-advance bookkeeping directly off the
//! `ActionOutcome` `invoke` returns, and routes any `GraphEvent`s the
//! invoked action produced to every action's `on_graph_event` before
//! returning — see DESIGN.md, "Graph signal delivery".

use std::cell::Cell;
use std::rc::Rc;

use hk_action::{Action, ActionOutcome, TimeRef};
use hk_core::{Minutes, SimRng};
use hk_graph::Graph;

/// Whether `Engine` advances time by a fixed `1/event_rate` step or draws an
/// exponential inter-event time — "deterministic" vs "Poisson" mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimeMode {
    Deterministic,
    Poisson,
}

pub struct Engine {
    actions: Vec<Box<dyn Action>>,
    rng: SimRng,
    time: TimeRef,
    steps: u64,
    event_rate: u64,
    time_mode: TimeMode,
}

impl Engine {
    pub fn new(seed: u64, time_mode: TimeMode) -> Self {
        Self {
            actions: Vec::new(),
            rng: SimRng::new(seed),
            time: Rc::new(Cell::new(Minutes::ZERO)),
            steps: 0,
            event_rate: 0,
            time_mode,
        }
    }

    /// Shared clock handle actions read from during `init`.
    pub fn time_handle(&self) -> TimeRef {
        self.time.clone()
    }

    pub fn register(&mut self, action: Box<dyn Action>) {
        self.actions.push(action);
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn time(&self) -> Minutes {
        self.time.get()
    }

    pub fn event_rate(&self) -> u64 {
        self.event_rate
    }

    pub fn describe(&self) -> String {
        format!(
            "engine(steps={} time={} event_rate={})",
            self.steps,
            self.time.get(),
            self.event_rate
        )
    }

    pub fn call_post_init(&mut self) {
        for action in &mut self.actions {
            action.post_init();
        }
    }

    pub fn reset(&mut self, graph: &Graph) {
        self.steps = 0;
        self.event_rate = 0;
        self.time.set(Minutes::ZERO);
        for action in &mut self.actions {
            action.reset(graph);
        }
    }

    /// Run one step: refresh weights, pick an action, invoke it, route any
    /// graph events, then advance the clock.
    ///
    /// Returns `false` if every action currently has zero weight — the
    /// engine has nothing left it could ever do, and the caller should stop.
    pub fn step(&mut self, graph: &mut Graph) -> bool {
        for action in &mut self.actions {
            action.update_weight(graph, self.time.get());
        }
        let weights: Vec<f64> = self.actions.iter().map(|a| a.weight()).collect();
        let Some(chosen) = hk_core::sample_weighted(&mut self.rng, &weights) else {
            return false;
        };

        let outcome = self.actions[chosen].invoke(graph, &mut self.rng);
        self.dispatch_events(graph);

        self.steps += 1;
        if outcome == ActionOutcome::Happened {
            self.event_rate += 1;
        }
        self.advance_time();
        log::trace!(
            "step {} chose {} ({:?}), time now {}",
            self.steps,
            self.actions[chosen].name(),
            outcome,
            self.time.get()
        );
        true
    }

    /// `event_rate == 0` means nothing has ever happened yet — leave time
    /// alone rather than dividing by zero.
    fn advance_time(&mut self) {
        if self.event_rate == 0 {
            return;
        }
        let dt = match self.time_mode {
            TimeMode::Deterministic => 1.0 / self.event_rate as f64,
            TimeMode::Poisson => {
                let u = self.rng.unit().max(f64::MIN_POSITIVE);
                -u.ln() / self.event_rate as f64
            }
        };
        self.time.set(self.time.get().advance(dt));
    }

    /// Drain any `GraphEvent`s the last mutation produced and route them to
    /// every action's `on_graph_event`, in registration order.
    fn dispatch_events(&mut self, graph: &mut Graph) {
        let events = graph.take_events();
        for event in &events {
            for action in &mut self.actions {
                action.on_graph_event(graph, event);
            }
        }
    }

    /// Grow the graph by one agent of `type_id` outside the normal weighted
    /// step loop — used to seed a simulation's initial population before
    /// `step` is called for the first time, so the follow action has
    /// candidates to draw from immediately.
    pub fn seed_agent(&mut self, graph: &mut Graph, type_id: hk_core::AgentTypeId) -> Option<hk_core::AgentId> {
        let id = graph.grow(type_id)?;
        self.dispatch_events(graph);
        Some(id)
    }

    pub fn dump_all(&self, dir: &std::path::Path) -> hk_core::HkResult<()> {
        for action in &self.actions {
            action.dump(dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_action::ActionOutcome;
    use hk_config::Config;
    use std::path::Path;

    /// A trivial always-happens action for exercising the step loop without
    /// pulling in hk-follow/hk-addagent (which would make this a circular
    /// dev-dependency).
    struct AlwaysHappens {
        weight: f64,
        calls: u32,
    }

    impl Action for AlwaysHappens {
        fn name(&self) -> &'static str {
            "always"
        }
        fn init(&mut self, _g: &Graph, _r: std::rc::Rc<hk_types::Registry>, _c: &dyn Config, _t: TimeRef) -> hk_core::HkResult<()> {
            Ok(())
        }
        fn reset(&mut self, _g: &Graph) {
            self.calls = 0;
        }
        fn update_weight(&mut self, _g: &Graph, _t: Minutes) {}
        fn weight(&self) -> f64 {
            self.weight
        }
        fn invoke(&mut self, _g: &mut Graph, _r: &mut SimRng) -> ActionOutcome {
            self.calls += 1;
            ActionOutcome::Happened
        }
        fn dump(&self, _dir: &Path) -> hk_core::HkResult<()> {
            Ok(())
        }
    }

    #[test]
    fn step_returns_false_when_all_weights_zero() {
        let mut engine = Engine::new(1, TimeMode::Deterministic);
        engine.register(Box::new(AlwaysHappens { weight: 0.0, calls: 0 }));
        let mut graph = Graph::new(10, 1);
        assert!(!engine.step(&mut graph));
    }

    #[test]
    fn step_advances_time_and_steps_on_happened() {
        let mut engine = Engine::new(1, TimeMode::Deterministic);
        engine.register(Box::new(AlwaysHappens { weight: 1.0, calls: 0 }));
        let mut graph = Graph::new(10, 1);
        assert!(engine.step(&mut graph));
        assert_eq!(engine.steps(), 1);
        assert_eq!(engine.event_rate(), 1);
        assert!(engine.time().0 > 0.0);
    }

    #[test]
    fn zero_event_rate_does_not_advance_time_or_panic() {
        // event_rate stays 0 only if outcome is never Happened, which this
        // harness can't produce with AlwaysHappens — this test instead
        // checks the initial state directly, matching the open-question
        // resolution documented in DESIGN.md.
        let engine = Engine::new(1, TimeMode::Deterministic);
        assert_eq!(engine.event_rate(), 0);
        assert_eq!(engine.time().0, 0.0);
    }
}
