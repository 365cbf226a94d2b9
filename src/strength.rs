//! Strength metrics for the links of the candidate graph.
//!
//! The candidates form the vertices of a complete directed graph and the
//! result is determined through the strongest paths of that graph. How the
//! strength of a single link derives from the voters' pairwise counts is not
//! fixed by the Schulze method itself; this module defines the interface and
//! the two common policies.
//!
//! Any custom metric must be monotone: non-decreasing in `support` and
//! non-increasing in `opposition`. The engine relies on this to guarantee that
//! winner extraction always finds an undominated candidate.

/// The single-method interface every strength metric implements.
pub trait StrengthMetric {
    /// Turns the pairwise counts of one ordered candidate pair into the weight
    /// of the corresponding link.
    ///
    /// * `support` ballots preferring the first candidate over the second
    /// * `opposition` ballots preferring the second over the first
    /// * `total_votes` size of the whole ballot collection
    fn strength(&self, support: u64, opposition: u64, total_votes: u64) -> i64;
}

/// The metric advised by the paper of Markus Schulze.
///
/// Of two links with more support than opposition, the one with more
/// supporters is stronger; equal support is broken by less opposition.
/// Links that lose their own pairwise comparison are weaker than ties.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct WinningVotes;

impl StrengthMetric for WinningVotes {
    fn strength(&self, support: u64, opposition: u64, total_votes: u64) -> i64 {
        if support > opposition {
            // The product can exceed i64 for enormous ballot counts; widen to
            // i128 and saturate instead of wrapping.
            let product = (total_votes as i128).saturating_mul(support as i128);
            clamp_to_i64(product - opposition as i128)
        } else if support == opposition {
            0
        } else {
            -1
        }
    }
}

/// The difference between support and opposition.
///
/// More intuitive than [`WinningVotes`], and equivalent to it (and to several
/// other metrics) whenever no pairwise count ties occur.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct Margin;

impl StrengthMetric for Margin {
    fn strength(&self, support: u64, opposition: u64, _total_votes: u64) -> i64 {
        clamp_to_i64(support as i128 - opposition as i128)
    }
}

fn clamp_to_i64(weight: i128) -> i64 {
    weight.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}
