//! Fixed plain-text report formats (not CSV — see DESIGN.md for why this
//! crate hand-formats rows instead of reaching for a `csv` writer).

use std::path::Path;

use hk_core::HkResult;
use hk_report::{percent, LineWriter};
use hk_types::Registry;

use crate::models::{METHOD_AGENT, METHOD_FOLLOWBACK, METHOD_HASHTAG, METHOD_PREFERENTIAL_AGENT, METHOD_RANDOM, METHOD_RETWEET, METHOD_TWITTER_SUGGEST};

/// `main_stats.dat`: totals plus a per-method attempt/success breakdown.
///
/// Append mode: each `dump()` adds a new block rather than overwriting the
/// file, so repeated dumps against the same output directory accumulate a
/// history instead of only keeping the last one.
///
/// The print order is `Random, Twitter_Suggest, Agent, Preferential_Agent,
/// Retweet, Hashtag, Followback` — note `Retweet` (method index 5) prints
/// *before* `Hashtag` (method index 4) even though its index is higher; this
/// is the report column order, not the storage order, and the two are not
/// the same anywhere in this module.
pub fn write_main_stats(
    path: &Path,
    total_attempts: u64,
    total_successes: u64,
    attempts: &[u64; 7],
    successes: &[u64; 7],
) -> HkResult<()> {
    let mut w = LineWriter::append(path)?;
    w.line(&format!("total_follow_attempts {total_attempts}"))?;
    w.line(&format!("total_follows {total_successes}"))?;
    w.line("# method attempts successes pct_of_successes")?;
    for (label, idx) in [
        ("Random", METHOD_RANDOM),
        ("Twitter_Suggest", METHOD_TWITTER_SUGGEST),
        ("Agent", METHOD_AGENT),
        ("Preferential_Agent", METHOD_PREFERENTIAL_AGENT),
        ("Retweet", METHOD_RETWEET),
        ("Hashtag", METHOD_HASHTAG),
        ("Followback", METHOD_FOLLOWBACK),
    ] {
        w.line(&format!(
            "{label} {} {} {:.2}",
            attempts[idx],
            successes[idx],
            percent(successes[idx], total_successes)
        ))?;
    }
    w.flush()
}

/// `categories_distro.dat`: how many agents currently sit in each follower
/// bin, and that bin's sampling weight.
pub fn write_categories_distro(path: &Path, bin_sizes: &[usize], bin_weights: &[f64]) -> HkResult<()> {
    let mut w = LineWriter::create(path)?;
    w.line("# bin population weight")?;
    for (k, (&size, &weight)) in bin_sizes.iter().zip(bin_weights).enumerate() {
        w.line(&format!("{k} {size} {weight:.6}"))?;
    }
    w.flush()
}

/// `dd_by_follow_model.dat`: total in-edges and out-edges attributed to each
/// method, summed across all agents.
pub fn write_dd_by_follow_model(
    path: &Path,
    as_follower_totals: &[u64; 7],
    as_followee_totals: &[u64; 7],
) -> HkResult<()> {
    let mut w = LineWriter::create(path)?;
    w.line("# method out_edges in_edges")?;
    for (label, idx) in [
        ("Random", METHOD_RANDOM),
        ("Twitter_Suggest", METHOD_TWITTER_SUGGEST),
        ("Agent", METHOD_AGENT),
        ("Preferential_Agent", METHOD_PREFERENTIAL_AGENT),
        ("Hashtag", METHOD_HASHTAG),
        ("Retweet", METHOD_RETWEET),
        ("Followback", METHOD_FOLLOWBACK),
    ] {
        w.line(&format!("{label} {} {}", as_follower_totals[idx], as_followee_totals[idx]))?;
    }
    w.flush()
}

/// `<type>_info.dat`, one per configured agent type, in declaration order.
///
/// `at_follows_count` is indexed by the *follower's* type (how many follows
/// agents of this type have performed), not the followee's.
pub fn write_type_info(dir: &Path, registry: &Registry, at_follows_count: &[u64]) -> HkResult<()> {
    for (tid, atype) in registry.iter_declaration_order() {
        let path = dir.join(format!("{}_info.dat", atype.name));
        let mut w = LineWriter::create(&path)?;
        w.line(&format!("name {}", atype.name))?;
        w.line(&format!("add_weight {:.6}", atype.add_weight))?;
        w.line(&format!("follow_weight {:.6}", atype.follow_weight))?;
        w.line(&format!("follows_performed {}", at_follows_count[tid.index()]))?;
        w.flush()?;
    }
    Ok(())
}

/// A monthly degree-distribution snapshot, taken whenever the simulated
/// clock crosses into a month beyond what has already been tabulated, plus
/// once more at the end of the run.
pub fn write_degree_distribution_month(dir: &Path, month: usize, bin_sizes: &[usize]) -> HkResult<()> {
    let path = dir.join(format!("degree_distribution_month_{month:03}.dat"));
    let mut w = LineWriter::create(&path)?;
    w.line("# bin population")?;
    for (k, &size) in bin_sizes.iter().enumerate() {
        w.line(&format!("{k} {size}"))?;
    }
    w.flush()
}
