//! Parsed shape of one `[[agents]]` entry.

/// One configured agent type, parsed straight from its `[[agents]]` table.
#[derive(Clone, Debug)]
pub struct AgentTypeConfig {
    pub name: String,
    pub add_weight: f64,
    pub follow_weight: f64,
    pub monthly_follow_weight: FollowWeightConfig,
    pub care_about_region: bool,
    pub care_about_ideology: bool,
}

/// The per-month follow-weight schedule for one agent type.
///
/// `Constant` reproduces a type whose propensity to be followed never
/// changes; `Linear` lets it grow or decay month over month (e.g. a "news"
/// account type that gets less interesting over time).
#[derive(Clone, Copy, Debug)]
pub enum FollowWeightConfig {
    Constant(f64),
    Linear { y_intercept: f64, y_slope: f64 },
}

impl FollowWeightConfig {
    pub fn at_month(&self, month: usize) -> f64 {
        match *self {
            FollowWeightConfig::Constant(v) => v,
            FollowWeightConfig::Linear { y_intercept, y_slope } => {
                (y_intercept + y_slope * month as f64).max(0.0)
            }
        }
    }
}
