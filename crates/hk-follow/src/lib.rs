//! The follow action `F`: the ~45% share of steps that create a new edge in
//! the follower graph.
//!
//! Three pieces: the bin index (`bins.rs`), the five follow models plus the
//! `twitter` composite (`models.rs`), and the report file formats
//! (`report.rs`).

mod bins;
mod models;
mod report;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use hk_action::{Action, ActionOutcome, TimeRef};
use hk_config::Config;
use hk_core::{sample_weighted, AgentId, AgentTypeId, HkResult, Minutes, SimRng, APPROX_MONTH_MINUTES};
use hk_graph::{Graph, GraphEvent};
use hk_types::Registry;

use bins::BinIndex;
use models::{FollowModelKind, BASE_MODELS, METHOD_COUNT};

pub struct FollowAction {
    bins: Option<BinIndex>,
    bin_params: (f64, f64, f64, f64, f64),
    registry: Option<Rc<Registry>>,
    time: Option<TimeRef>,

    default_model: FollowModelKind,
    model_weights: [f64; 5],

    /// `monthly_referral_rate[m] == 1 / (1 + m)`, the probability the
    /// `twitter_suggest` model even attempts a preferential draw for an
    /// agent that is `m` months old.
    monthly_referral_rate: Vec<f64>,

    creation_time: Vec<Minutes>,
    /// `by_type_month[type][month]` — agent ids of that type created in
    /// that month, backing `select_follower`'s weighted (type, month) draw.
    by_type_month: Vec<Vec<Vec<AgentId>>>,
    at_agents_per_month: Vec<Vec<u32>>,

    as_follower_counts: Vec<[u32; METHOD_COUNT]>,
    as_followee_counts: Vec<[u32; METHOD_COUNT]>,
    follow_attempts: [u64; METHOD_COUNT],
    follow_successes: [u64; METHOD_COUNT],
    /// Follows performed, indexed by the *follower's* type.
    at_follows_count: Vec<u64>,

    rate: u64,
    weight: f64,
    n_connections: u64,
    zero_add_rate: bool,
    output_dir: PathBuf,
}

impl Default for FollowAction {
    fn default() -> Self {
        Self {
            bins: None,
            bin_params: (1.0, 0.0, 1000.0, 1.0, 1.0),
            registry: None,
            time: None,
            default_model: FollowModelKind::Random,
            model_weights: [0.0; 5],
            monthly_referral_rate: Vec::new(),
            creation_time: Vec::new(),
            by_type_month: Vec::new(),
            at_agents_per_month: Vec::new(),
            as_follower_counts: Vec::new(),
            as_followee_counts: Vec::new(),
            follow_attempts: [0; METHOD_COUNT],
            follow_successes: [0; METHOD_COUNT],
            at_follows_count: Vec::new(),
            rate: 0,
            weight: 0.0,
            n_connections: 0,
            zero_add_rate: false,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl FollowAction {
    pub fn new() -> Self {
        Self::default()
    }

    fn bins_mut(&mut self) -> &mut BinIndex {
        self.bins.as_mut().expect("FollowAction::init must run first")
    }

    fn bins(&self) -> &BinIndex {
        self.bins.as_ref().expect("FollowAction::init must run first")
    }

    /// Extend every month-indexed structure up to and including `month`,
    /// snapshotting the degree distribution for each newly-crossed month.
    fn ensure_month_capacity(&mut self, month: usize) {
        let current_len = self.monthly_referral_rate.len();
        if month < current_len {
            return;
        }
        for m in current_len..=month {
            self.monthly_referral_rate.push(1.0 / (1.0 + m as f64));
            for row in &mut self.at_agents_per_month {
                row.push(0);
            }
            for row in &mut self.by_type_month {
                row.push(Vec::new());
            }
            if m > 0 {
                let bin_sizes: Vec<usize> = (0..self.bins().k()).map(|k| self.bins().bin(k).len()).collect();
                let _ = report::write_degree_distribution_month(&self.output_dir, m - 1, &bin_sizes);
            }
        }
    }

    fn random_model(&self, graph: &Graph, rng: &mut SimRng) -> Option<AgentId> {
        if graph.size() == 0 {
            return None;
        }
        Some(AgentId::from(rng.gen_range(0..graph.size() as usize)))
    }

    fn twitter_suggest_model(&self, rng: &mut SimRng, follower: AgentId, now: Minutes) -> Option<AgentId> {
        let age_minutes = (now.0 - self.creation_time[follower.index()].0).max(0.0);
        let bin_age = ((age_minutes / APPROX_MONTH_MINUTES).floor() as usize)
            .min(self.monthly_referral_rate.len().saturating_sub(1));
        let rate = self.monthly_referral_rate.get(bin_age).copied().unwrap_or(0.0);
        if !rng.gen_bool(rate) {
            return None;
        }
        let bins = self.bins();
        let kmax = bins.kmax();
        let weights: Vec<f64> = (0..=kmax).map(|k| bins.weight(k) * bins.bin(k).len() as f64).collect();
        let k = sample_weighted(rng, &weights)?;
        let bin = bins.bin(k);
        let offset = rng.gen_range(0..bin.len());
        bin.iter().nth(offset).copied()
    }

    fn select_followee(&self, graph: &Graph, rng: &mut SimRng, follower: AgentId, now: Minutes) -> Option<(AgentId, usize)> {
        let kind = match self.default_model {
            FollowModelKind::Twitter => BASE_MODELS[sample_weighted(rng, &self.model_weights)?],
            other => other,
        };
        let followee = match kind {
            FollowModelKind::Random => self.random_model(graph, rng),
            FollowModelKind::TwitterSuggest => self.twitter_suggest_model(rng, follower, now),
            FollowModelKind::Agent | FollowModelKind::PreferentialAgent | FollowModelKind::Hashtag => None,
            FollowModelKind::Twitter => unreachable!("composite already resolved to a base model"),
        }?;
        if followee == follower {
            return None;
        }
        Some((followee, kind.method_index()))
    }

    fn select_follower(&self, graph: &Graph, rng: &mut SimRng) -> Option<AgentId> {
        let registry = self.registry.as_ref()?;
        let months = self.monthly_referral_rate.len();
        if months == 0 || registry.is_empty() {
            return None;
        }
        let mut weights = Vec::with_capacity(registry.len() * months);
        for (tid, atype) in registry.iter() {
            for m in 0..months {
                let live = self.at_agents_per_month[tid.index()][m] > 0;
                let w = if live {
                    atype.monthly_follow_weight.at_month(m) * atype.add_weight
                } else {
                    0.0
                };
                weights.push(w);
            }
        }
        let idx = sample_weighted(rng, &weights)?;
        let tid = idx / months;
        let m = idx % months;
        let candidates = &self.by_type_month[tid][m];
        if candidates.is_empty() {
            return None;
        }
        let offset = rng.gen_range(0..candidates.len());
        Some(candidates[offset])
    }
}

impl Action for FollowAction {
    fn name(&self) -> &'static str {
        "follow"
    }

    fn init(&mut self, graph: &Graph, registry: Rc<Registry>, config: &dyn Config, time: TimeRef) -> HkResult<()> {
        self.bin_params = (
            config.get_f64("follow.bins.bin_spacing", 1.0),
            config.get_f64("follow.bins.min", 0.0),
            config.get_f64("follow.bins.max", 1000.0),
            config.get_f64("follow.bins.increment", 1.0),
            config.get_f64("follow.bins.exponent", 1.0),
        );
        let (spacing, min, max, increment, exponent) = self.bin_params;
        self.bins = Some(BinIndex::build(spacing, min, max, increment, exponent, graph.max_size()));
        self.default_model = FollowModelKind::parse(&config.get_string("follow.model", "twitter"));
        self.model_weights = [
            config.get_f64("follow.model_weights.random", 1.0),
            config.get_f64("follow.model_weights.twitter_suggest", 1.0),
            config.get_f64("follow.model_weights.agent", 0.0),
            config.get_f64("follow.model_weights.preferential_agent", 0.0),
            config.get_f64("follow.model_weights.hashtag", 0.0),
        ];
        self.zero_add_rate = config.get_f64("rates.add.value", 1.0) == 0.0;
        self.output_dir = PathBuf::from(config.get_string("output.directory", "output"));

        let type_count = registry.len();
        self.at_agents_per_month = vec![Vec::new(); type_count];
        self.by_type_month = vec![Vec::new(); type_count];
        self.at_follows_count = vec![0; type_count];
        self.registry = Some(registry);
        self.time = Some(time);
        Ok(())
    }

    fn reset(&mut self, graph: &Graph) {
        let type_count = self.registry.as_ref().map(|r| r.len()).unwrap_or(0);
        let (spacing, min, max, increment, exponent) = self.bin_params;
        self.bins = Some(BinIndex::build(spacing, min, max, increment, exponent, graph.max_size()));
        self.monthly_referral_rate.clear();
        self.creation_time.clear();
        self.by_type_month = vec![Vec::new(); type_count];
        self.at_agents_per_month = vec![Vec::new(); type_count];
        self.as_follower_counts.clear();
        self.as_followee_counts.clear();
        self.follow_attempts = [0; METHOD_COUNT];
        self.follow_successes = [0; METHOD_COUNT];
        self.at_follows_count = vec![0; type_count];
        self.rate = 0;
        self.weight = 0.0;
        self.n_connections = 0;
    }

    fn update_weight(&mut self, graph: &Graph, time: Minutes) {
        let month = time.month();
        let Some(registry) = self.registry.clone() else { return };
        if month >= self.monthly_referral_rate.len() {
            self.ensure_month_capacity(month);
        }
        let mut w = 0.0;
        for (tid, atype) in registry.iter() {
            let population = if self.zero_add_rate {
                graph.count(tid) as f64
            } else {
                self.at_agents_per_month[tid.index()][month] as f64
            };
            w += population * atype.monthly_follow_weight.at_month(month);
        }
        self.weight = w;
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn invoke(&mut self, graph: &mut Graph, rng: &mut SimRng) -> ActionOutcome {
        let now = self.time.as_ref().map(|t| t.get()).unwrap_or(Minutes::ZERO);
        self.ensure_month_capacity(now.month());

        let Some(follower) = self.select_follower(graph, rng) else {
            log::trace!("follow: no eligible follower this step");
            return ActionOutcome::FinishedOnly;
        };
        let Some((followee, method)) = self.select_followee(graph, rng, follower, now) else {
            log::trace!("follow: {follower} drew no followee this step");
            return ActionOutcome::FinishedOnly;
        };

        self.follow_attempts[method] += 1;

        if graph.connect(followee, follower) {
            self.n_connections += 1;
            self.follow_successes[method] += 1;
            let follower_type = graph.agent_type(follower);
            self.at_follows_count[follower_type.index()] += 1;
            self.as_followee_counts[followee.index()][method] += 1;
            self.as_follower_counts[follower.index()][method] += 1;
            ActionOutcome::Happened
        } else {
            ActionOutcome::FinishedOnly
        }
    }

    fn on_graph_event(&mut self, graph: &Graph, event: &GraphEvent) {
        match *event {
            GraphEvent::Grown { id, type_id } => {
                let now = self.time.as_ref().map(|t| t.get()).unwrap_or(Minutes::ZERO);
                self.ensure_month_capacity(now.month());
                self.bins_mut().insert_new(id);
                self.creation_time.push(now);
                self.as_follower_counts.push([0; METHOD_COUNT]);
                self.as_followee_counts.push([0; METHOD_COUNT]);
                let month = now.month();
                self.at_agents_per_month[type_id.index()][month] += 1;
                self.by_type_month[type_id.index()][month].push(id);
            }
            GraphEvent::ConnectionAdded { followee, .. } => {
                let new_size = graph.followers_size(followee);
                self.bins_mut().move_agent(followee, new_size);
                self.rate += 1;
            }
            GraphEvent::ConnectionRemoved { .. } => {}
        }
    }

    fn describe(&self) -> String {
        format!(
            "follow (weight={:.4} kmax={} connections={} rate={})",
            self.weight,
            self.bins().kmax(),
            self.n_connections,
            self.rate
        )
    }

    fn dump(&self, dir: &Path) -> HkResult<()> {
        std::fs::create_dir_all(dir)?;

        let total_attempts: u64 = self.follow_attempts.iter().sum();
        let total_successes: u64 = self.follow_successes.iter().sum();
        report::write_main_stats(
            &dir.join("main_stats.dat"),
            total_attempts,
            total_successes,
            &self.follow_attempts,
            &self.follow_successes,
        )?;

        let bins = self.bins();
        let bin_sizes: Vec<usize> = (0..bins.k()).map(|k| bins.bin(k).len()).collect();
        let bin_weights: Vec<f64> = (0..bins.k()).map(|k| bins.weight(k)).collect();
        report::write_categories_distro(&dir.join("categories_distro.dat"), &bin_sizes, &bin_weights)?;

        let mut as_follower_totals = [0u64; METHOD_COUNT];
        let mut as_followee_totals = [0u64; METHOD_COUNT];
        for counts in &self.as_follower_counts {
            for (i, &c) in counts.iter().enumerate() {
                as_follower_totals[i] += c as u64;
            }
        }
        for counts in &self.as_followee_counts {
            for (i, &c) in counts.iter().enumerate() {
                as_followee_totals[i] += c as u64;
            }
        }
        report::write_dd_by_follow_model(&dir.join("dd_by_follow_model.dat"), &as_follower_totals, &as_followee_totals)?;

        if let Some(registry) = &self.registry {
            report::write_type_info(dir, registry, &self.at_follows_count)?;
        }

        report::write_degree_distribution_month(dir, self.monthly_referral_rate.len().saturating_sub(1), &bin_sizes)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_config::TomlConfig;
    use std::cell::Cell;

    const CONFIG: &str = r#"
        follow.model = "random"

        [[agents]]
        name = "default"
        weights.add = 1.0
        weights.follow = 1.0
    "#;

    fn setup() -> (FollowAction, Graph, SimRng, TimeRef) {
        let cfg = TomlConfig::from_str(CONFIG).unwrap();
        let registry = Rc::new(Registry::build(&cfg));
        let mut graph = Graph::new(100, registry.len());
        let time: TimeRef = Rc::new(Cell::new(Minutes::ZERO));
        let mut follow = FollowAction::new();
        follow.init(&graph, registry, &cfg, time.clone()).unwrap();
        follow.post_init();
        // seed a few agents so select_follower/followee have candidates
        for _ in 0..5 {
            if let Some(id) = graph.grow(AgentTypeId(0)) {
                let events = graph.take_events();
                for ev in events {
                    follow.on_graph_event(&graph, &ev);
                }
                let _ = id;
            }
        }
        let rng = SimRng::new(7);
        (follow, graph, rng, time)
    }

    #[test]
    fn random_model_never_self_loops() {
        let (mut follow, mut graph, mut rng, _time) = setup();
        for _ in 0..200 {
            follow.update_weight(&graph, Minutes::ZERO);
            let outcome = follow.invoke(&mut graph, &mut rng);
            if outcome == ActionOutcome::Happened {
                let events = graph.take_events();
                for ev in &events {
                    if let GraphEvent::ConnectionAdded { followee, follower } = ev {
                        assert_ne!(followee, follower);
                    }
                    follow.on_graph_event(&graph, ev);
                }
            } else {
                graph.take_events();
            }
        }
    }

    #[test]
    fn dump_writes_expected_files() {
        let (follow, _graph, _rng, _time) = setup();
        let dir = std::env::temp_dir().join(format!("hk-follow-test-{}", std::process::id()));
        follow.dump(&dir).unwrap();
        assert!(dir.join("main_stats.dat").exists());
        assert!(dir.join("categories_distro.dat").exists());
        assert!(dir.join("default_info.dat").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
