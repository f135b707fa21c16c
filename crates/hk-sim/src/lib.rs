//! Wires a loaded [`hk_config::Config`] into a runnable [`Simulation`]:
//! builds the graph and agent-type registry, constructs and initializes the
//! add-agent and follow actions, registers them with the engine, seeds an
//! initial population, and exposes a `run()` loop that stops at a configured
//! step/time limit and writes every action's report files.
//!
//! | Module | Contents |
//! |---|---|
//! | [`builder`] | `SimulationBuilder` |
//! | [`sim`] | `Simulation`, `SimulationSummary` |
//! | [`termination`] | `TerminationCriteria` |
//! | [`error`] | `SimError`, `SimResult` |

mod builder;
mod error;
mod sim;
mod termination;

pub use builder::SimulationBuilder;
pub use error::{SimError, SimResult};
pub use sim::{Simulation, SimulationSummary};
pub use termination::TerminationCriteria;

#[cfg(test)]
mod tests {
    use super::*;
    use hk_config::TomlConfig;

    fn sample_config(output_dir: &std::path::Path) -> String {
        format!(
            r#"
            [network]
            max_agents = 40
            initial_agents = 3

            [termination]
            max_steps = 200

            [rates.add]
            value = 1.0

            [output]
            directory = "{}"

            follow.model = "random"

            [[agents]]
            name = "default"
            weights.add = 1.0
            weights.follow = 1.0
            "#,
            output_dir.display()
        )
    }

    #[test]
    fn builds_and_runs_to_step_limit() {
        let dir = std::env::temp_dir().join(format!("hk-sim-test-run-{}", std::process::id()));
        let cfg = TomlConfig::from_str(&sample_config(&dir)).unwrap();
        let mut sim = SimulationBuilder::new(&cfg, 123).build().unwrap();
        assert_eq!(sim.graph().size(), 3);

        let summary = sim.run().unwrap();
        assert!(summary.steps <= 200);
        assert!(summary.steps == 200 || summary.agent_count == 40);
        assert!(summary.agent_count >= 3 && summary.agent_count <= 40);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn reset_returns_to_initial_conditions() {
        let dir = std::env::temp_dir().join(format!("hk-sim-test-reset-{}", std::process::id()));
        let cfg = TomlConfig::from_str(&sample_config(&dir)).unwrap();
        let mut sim = SimulationBuilder::new(&cfg, 123).build().unwrap();
        sim.run().unwrap();
        sim.reset();
        assert_eq!(sim.graph().size(), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
