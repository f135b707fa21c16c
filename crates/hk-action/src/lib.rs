//! The capability set every engine-driven action implements.
//!
//! This re-expresses what was `action_base` (a C++ template base class with
//! private pure-virtual `do_*` hooks) as a plain Rust trait with default
//! no-op methods — the same shape `SimObserver` uses elsewhere in this
//! workspace for callback-style collaborators. There is no `happened`/
//! `finished` signal type here: `invoke` returns an [`ActionOutcome`] and the
//! engine does the bookkeeping that used to live in signal handlers.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use hk_config::Config;
use hk_core::{HkResult, Minutes, SimRng};
use hk_graph::{Graph, GraphEvent};
use hk_types::Registry;

/// Shared handle to the engine's clock. `Rc<Cell<_>>` is safe here because
/// the whole simulation is single-threaded — no atomics needed.
pub type TimeRef = Rc<Cell<Minutes>>;

/// What happened when the engine invoked an action this step.
///
/// `Happened` means the action produced an observable effect this step;
/// `FinishedOnly` means it ran but didn't — e.g. the follow action's
/// candidate follower/followee draw came up empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Happened,
    FinishedOnly,
}

pub trait Action {
    /// Stable name used in logs and report file names.
    fn name(&self) -> &'static str;

    /// One-time setup: read config, build internal state, stash the shared
    /// clock handle and registry.
    fn init(
        &mut self,
        graph: &Graph,
        registry: Rc<Registry>,
        config: &dyn Config,
        time: TimeRef,
    ) -> HkResult<()>;

    /// Called once after every action has been `init`'d — a two-phase init
    /// since actions may need each other's state to be ready before
    /// finishing their own setup.
    fn post_init(&mut self) {}

    /// Clear internal counters/rate/weight back to a freshly-constructed
    /// state, without re-reading config. Used when a simulation is re-run
    /// from the same builder.
    fn reset(&mut self, graph: &Graph);

    /// Recompute this step's weight from current graph/clock state.
    fn update_weight(&mut self, graph: &Graph, time: Minutes);

    /// This action's current share of the engine's weighted selection.
    fn weight(&self) -> f64;

    /// Perform the action. May mutate `graph`; must not create its own RNG.
    fn invoke(&mut self, graph: &mut Graph, rng: &mut SimRng) -> ActionOutcome;

    /// React to a mutation some other action (or this one) caused, as
    /// routed by the engine after `invoke` returns. Default: ignore.
    fn on_graph_event(&mut self, _graph: &Graph, _event: &GraphEvent) {}

    /// Short diagnostic line for progress logging — not a report file.
    fn describe(&self) -> String {
        format!("{} (weight={:.4})", self.name(), self.weight())
    }

    /// Write this action's final report file(s) into `dir`.
    fn dump(&self, dir: &Path) -> HkResult<()>;
}
