//! Typed configuration lookup.
//!
//! Spec scopes config parsing out of the simulator's core as an external
//! collaborator — everything downstream only ever asks for a dotted key with
//! a default, or the list of configured agent types. [`Config`] is that
//! boundary; [`TomlConfig`] is the one real implementation, backed by a
//! parsed `toml::Value`.

mod agent;
mod toml_config;

pub use agent::{AgentTypeConfig, FollowWeightConfig};
pub use toml_config::TomlConfig;

/// Read-only typed access to a loaded configuration tree.
///
/// All getters take a `.`-separated dotted path (e.g. `"rates.add.value"`)
/// and a default, returned verbatim when the key is absent. A key present
/// but of the wrong shape returns the default too — callers that must
/// distinguish "missing" from "wrong type" use [`Config::require`].
pub trait Config {
    fn get_f64(&self, key: &str, default: f64) -> f64;
    fn get_u64(&self, key: &str, default: u64) -> u64;
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn get_string(&self, key: &str, default: &str) -> String;

    /// Fail loudly instead of falling back to a default — used for the
    /// handful of keys a simulation cannot run without.
    fn require_f64(&self, key: &str) -> hk_core::HkResult<f64>;

    /// The `[[agents]]` array of tables, in file declaration order.
    fn agents(&self) -> Vec<AgentTypeConfig>;
}
