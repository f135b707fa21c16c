//! The agent-type registry.
//!
//! Built once at init by reading every `[[agents]]` entry and appending it in
//! **reverse** declaration order. That reversal is load-bearing, not an
//! oversight: downstream code that wants to print or report types "in
//! declaration order" (the `*_info.dat` files) walks the registry back to
//! front a second time, which recovers the order the user wrote in the
//! config. Walking it front-to-back anywhere that cares about declaration
//! order is a bug.

use hk_core::AgentTypeId;
pub use hk_config::FollowWeightConfig as FollowWeightSchedule;
use hk_config::Config;

/// One agent type as resolved into runtime state.
#[derive(Clone, Debug)]
pub struct AgentType {
    pub name: String,
    pub add_weight: f64,
    pub follow_weight: f64,
    pub monthly_follow_weight: FollowWeightSchedule,
    pub care_about_region: bool,
    pub care_about_ideology: bool,
}

pub struct Registry {
    /// Stored in reverse declaration order; see module docs.
    types: Vec<AgentType>,
}

impl Registry {
    /// Build from a loaded config, reversing declaration order (see module
    /// docs for why).
    pub fn build(cfg: &dyn Config) -> Self {
        let mut types: Vec<AgentType> = cfg
            .agents()
            .into_iter()
            .map(|a| AgentType {
                name: a.name,
                add_weight: a.add_weight,
                follow_weight: a.follow_weight,
                monthly_follow_weight: a.monthly_follow_weight,
                care_about_region: a.care_about_region,
                care_about_ideology: a.care_about_ideology,
            })
            .collect();
        types.reverse();
        Self { types }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, id: AgentTypeId) -> &AgentType {
        &self.types[id.index()]
    }

    /// Iterate in internal storage order (reverse of how the config declared
    /// them). Used by anything that only needs "all types", order-agnostic.
    pub fn iter(&self) -> impl Iterator<Item = (AgentTypeId, &AgentType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (AgentTypeId::from(i), t))
    }

    /// Iterate in the order the user declared them in the config — reverses
    /// storage order a second time, per the module docs.
    pub fn iter_declaration_order(&self) -> impl Iterator<Item = (AgentTypeId, &AgentType)> {
        self.types
            .iter()
            .enumerate()
            .rev()
            .map(|(i, t)| (AgentTypeId::from(i), t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_config::TomlConfig;

    const SAMPLE: &str = r#"
        [[agents]]
        name = "first"

        [[agents]]
        name = "second"

        [[agents]]
        name = "third"
    "#;

    #[test]
    fn build_reverses_declaration_order() {
        let cfg = TomlConfig::from_str(SAMPLE).unwrap();
        let reg = Registry::build(&cfg);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.get(AgentTypeId(0)).name, "third");
        assert_eq!(reg.get(AgentTypeId(1)).name, "second");
        assert_eq!(reg.get(AgentTypeId(2)).name, "first");
    }

    #[test]
    fn iter_declaration_order_recovers_config_order() {
        let cfg = TomlConfig::from_str(SAMPLE).unwrap();
        let reg = Registry::build(&cfg);
        let names: Vec<&str> = reg
            .iter_declaration_order()
            .map(|(_, t)| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
