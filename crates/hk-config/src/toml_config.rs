use std::str::FromStr;

use hk_core::{HkError, HkResult};
use toml::Value;

use crate::agent::{AgentTypeConfig, FollowWeightConfig};
use crate::Config;

/// [`Config`] backed by a parsed TOML document.
pub struct TomlConfig {
    root: Value,
}

impl TomlConfig {
    pub fn from_str(text: &str) -> HkResult<Self> {
        let root = Value::from_str(text).map_err(|e| HkError::ConfigParse(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn load(path: &std::path::Path) -> HkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut cur = &self.root;
        for segment in key.split('.') {
            cur = cur.as_table()?.get(segment)?;
        }
        Some(cur)
    }
}

impl Config for TomlConfig {
    fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.lookup(key) {
            Some(Value::Float(f)) => *f,
            Some(Value::Integer(i)) => *i as f64,
            _ => default,
        }
    }

    fn get_u64(&self, key: &str, default: u64) -> u64 {
        match self.lookup(key) {
            Some(Value::Integer(i)) if *i >= 0 => *i as u64,
            _ => default,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.lookup(key) {
            Some(Value::Boolean(b)) => *b,
            _ => default,
        }
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            _ => default.to_string(),
        }
    }

    fn require_f64(&self, key: &str) -> HkResult<f64> {
        match self.lookup(key) {
            Some(Value::Float(f)) => Ok(*f),
            Some(Value::Integer(i)) => Ok(*i as f64),
            Some(_) => Err(HkError::ConfigTypeMismatch {
                key: key.to_string(),
                expected: "number",
            }),
            None => Err(HkError::ConfigMissing(key.to_string())),
        }
    }

    fn agents(&self) -> Vec<AgentTypeConfig> {
        let Some(Value::Array(entries)) = self.lookup("agents") else {
            return Vec::new();
        };
        entries.iter().filter_map(parse_agent).collect()
    }
}

fn table_f64(table: &Value, key: &str, default: f64) -> f64 {
    let mut cur = table;
    for segment in key.split('.') {
        match cur.as_table().and_then(|t| t.get(segment)) {
            Some(v) => cur = v,
            None => return default,
        }
    }
    match cur {
        Value::Float(f) => *f,
        Value::Integer(i) => *i as f64,
        _ => default,
    }
}

fn table_bool(table: &Value, key: &str, default: bool) -> bool {
    let mut cur = table;
    for segment in key.split('.') {
        match cur.as_table().and_then(|t| t.get(segment)) {
            Some(v) => cur = v,
            None => return default,
        }
    }
    match cur {
        Value::Boolean(b) => *b,
        _ => default,
    }
}

fn parse_agent(entry: &Value) -> Option<AgentTypeConfig> {
    let table = entry.as_table()?;
    let name = table.get("name")?.as_str()?.to_string();
    let add_weight = table_f64(entry, "weights.add", 1.0);
    let follow_weight = table_f64(entry, "weights.follow", 1.0);

    let monthly_follow_weight = if table
        .get("monthly_follow_weight")
        .and_then(|v| v.as_table())
        .map(|t| t.contains_key("y_intercept") || t.contains_key("y_slope"))
        .unwrap_or(false)
    {
        FollowWeightConfig::Linear {
            y_intercept: table_f64(entry, "monthly_follow_weight.y_intercept", follow_weight),
            y_slope: table_f64(entry, "monthly_follow_weight.y_slope", 0.0),
        }
    } else {
        FollowWeightConfig::Constant(table_f64(
            entry,
            "monthly_follow_weight.value",
            follow_weight,
        ))
    };

    Some(AgentTypeConfig {
        name,
        add_weight,
        follow_weight,
        monthly_follow_weight,
        care_about_region: table_bool(entry, "hashtag_follow_options.care_about_region", false),
        care_about_ideology: table_bool(
            entry,
            "hashtag_follow_options.care_about_ideology",
            false,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [rates.add]
        value = 2.0

        [[agents]]
        name = "default"
        weights.add = 1.0
        weights.follow = 1.0

        [[agents]]
        name = "celebrity"
        weights.add = 0.1
        weights.follow = 50.0
        monthly_follow_weight.y_intercept = 50.0
        monthly_follow_weight.y_slope = -1.0
        hashtag_follow_options.care_about_region = true
    "#;

    #[test]
    fn dotted_lookup_reads_nested_tables() {
        let cfg = TomlConfig::from_str(SAMPLE).unwrap();
        assert_eq!(cfg.get_f64("rates.add.value", 0.0), 2.0);
        assert_eq!(cfg.get_f64("missing.key", 9.0), 9.0);
    }

    #[test]
    fn agents_are_parsed_in_declaration_order() {
        let cfg = TomlConfig::from_str(SAMPLE).unwrap();
        let agents = cfg.agents();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].name, "default");
        assert_eq!(agents[1].name, "celebrity");
        assert!(agents[1].care_about_region);
        assert_eq!(agents[1].monthly_follow_weight.at_month(0), 50.0);
        assert_eq!(agents[1].monthly_follow_weight.at_month(10), 40.0);
    }

    #[test]
    fn require_f64_surfaces_missing_key() {
        let cfg = TomlConfig::from_str(SAMPLE).unwrap();
        assert!(cfg.require_f64("rates.add.value").is_ok());
        assert!(cfg.require_f64("nonexistent").is_err());
    }
}
