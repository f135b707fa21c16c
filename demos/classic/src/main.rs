//! classic — smallest runnable follower-network growth simulation.
//!
//! Two agent types (`influencer`, `regular`) grow a network of at most 200
//! agents, with `regular` agents far more likely to be added but far less
//! likely to be followed. Scale comment: this is a toy config; swap in a
//! config file with `network.max_agents` in the millions and a population of
//! realistic agent types to run at full scale.

use std::path::Path;

use anyhow::{Context, Result};

use hk_config::TomlConfig;
use hk_sim::SimulationBuilder;

const SEED: u64 = 1729;

const CONFIG: &str = r#"
[network]
max_agents     = 200
initial_agents = 4

[termination]
max_steps = 20_000

[rates.add]
value = 2.0

[engine]
poisson_time = true

[output]
directory = "output/classic"

[follow]
model = "twitter"

[follow.model_weights]
random          = 0.2
twitter_suggest = 0.8

[follow.bins]
bin_spacing = 3
min         = 0.0
max         = 1000.0
increment   = 1.0
exponent    = 1.5

[[agents]]
name = "influencer"
weights.add    = 1.0
weights.follow = 9.0
monthly_follow_weight.value = 9.0

[[agents]]
name = "regular"
weights.add    = 9.0
weights.follow = 1.0
monthly_follow_weight.value = 1.0
"#;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== classic — follower network growth ===");
    println!("Seed: {SEED}");
    println!();

    let cfg = TomlConfig::from_str(CONFIG).context("parsing embedded config")?;
    let mut sim = SimulationBuilder::new(&cfg, SEED)
        .build()
        .context("building simulation")?;

    println!(
        "Initial population: {} agents ({} types)",
        sim.graph().size(),
        sim.registry().len()
    );

    let t0 = std::time::Instant::now();
    let summary = sim.run().context("running simulation")?;
    let elapsed = t0.elapsed();

    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  steps          : {}", summary.steps);
    println!("  simulated time : {}", summary.simulated_time);
    println!("  final agents   : {}", summary.agent_count);
    println!();

    println!("{:<12} {:<10}", "Type", "Count");
    println!("{}", "-".repeat(24));
    for (id, agent_type) in sim.registry().iter_declaration_order() {
        println!("{:<12} {:<10}", agent_type.name, sim.graph().count(id));
    }
    println!();
    println!("Reports written under {}", Path::new("output/classic").display());

    Ok(())
}
