/*!
Evaluation engine for the Schulze method, a Condorcet-consistent algorithm to
aggregate many ranked ballots (with ties allowed) into one canonical ranking.

The candidates are the vertices of a complete directed graph whose edge
weights derive from the pairwise ballot counts through a pluggable
[strength metric](strength). The aggregate ranking follows from the widest
paths of that graph: iteratively, the candidates undominated under the
widest-path relation form the next preference level.

See the [`quick_start`] module for a worked example, or jump directly to
[`evaluate`].

No tie breaking is performed beyond what the method itself yields: candidates
the ballots cannot separate end up tied in one level, ordered as in the
candidate list passed in.
*/

mod builder;
mod config;
pub mod quick_start;
pub mod strength;

use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::builder::Builder;
pub use crate::config::*;
pub use crate::strength::{Margin, StrengthMetric, WinningVotes};

// **** Private structures ****

/// Position of a candidate in the candidate list passed to evaluation.
///
/// The whole engine works on these dense indices; candidate names only
/// reappear at the public boundary.
type CandidateIndex = usize;

/// One checked ballot: for every candidate index, the preference level the
/// ballot puts it at (0 is the most preferred).
type BallotRanks = Vec<u32>;

// **** Validation ****

const RESERVED_SEPARATORS: [char; 2] = ['>', '='];

/// Checks the candidate list and every ballot, converting the ballots to
/// per-candidate level indices.
///
/// Runs to completion before any counting, so the tally never indexes an
/// undefined pair. Ballots are checked in input order and the first
/// structural violation is reported.
fn checks(ballots: &[Ballot], candidates: &[Candidate]) -> Result<Vec<BallotRanks>, SchulzeError> {
    for candidate in candidates {
        if candidate.as_str().contains(&RESERVED_SEPARATORS[..]) {
            return Err(SchulzeError::ReservedCharacter {
                candidate: candidate.as_str().to_string(),
            });
        }
    }

    let mut index: HashMap<&str, CandidateIndex> = HashMap::with_capacity(candidates.len());
    for (idx, candidate) in candidates.iter().enumerate() {
        if index.insert(candidate.as_str(), idx).is_some() {
            return Err(SchulzeError::RepeatedCandidate {
                candidate: candidate.as_str().to_string(),
            });
        }
    }
    let declared: HashSet<&str> = index.keys().copied().collect();

    let mut checked: Vec<BallotRanks> = Vec::with_capacity(ballots.len());
    for (ballot_idx, ballot) in ballots.iter().enumerate() {
        let named: Vec<&str> = ballot.candidates().map(|c| c.as_str()).collect();
        let named_set: HashSet<&str> = named.iter().copied().collect();

        // Set mismatches take precedence over duplicates, so a ballot that
        // both repeats and omits candidates reports the omission.
        if named_set != declared {
            if declared.is_subset(&named_set) {
                return Err(SchulzeError::SuperfluousCandidate { ballot: ballot_idx });
            } else {
                return Err(SchulzeError::MissingCandidate { ballot: ballot_idx });
            }
        }

        let mut ranks: Vec<Option<u32>> = vec![None; candidates.len()];
        for (level_idx, level) in ballot.levels().iter().enumerate() {
            for candidate in level {
                // Unindexed names were caught by the set comparison above.
                let cidx = index[candidate.as_str()];
                if ranks[cidx].is_some() {
                    return Err(SchulzeError::DuplicateCandidate {
                        ballot: ballot_idx,
                        candidate: candidate.as_str().to_string(),
                    });
                }
                ranks[cidx] = Some(level_idx as u32);
            }
        }
        // Every slot is filled: the candidate sets are equal and no
        // candidate appeared twice.
        checked.push(ranks.into_iter().flatten().collect());
    }
    Ok(checked)
}

// **** Tally and closure ****

/// Counts, for each ordered pair of candidates, the ballots strictly
/// preferring the first over the second. Ties contribute to neither
/// direction.
fn pairwise_tally(checked: &[BallotRanks], num_candidates: usize) -> Vec<Vec<u64>> {
    let mut counts: Vec<Vec<u64>> = vec![vec![0; num_candidates]; num_candidates];
    for ranks in checked {
        for x in 0..num_candidates {
            for y in 0..num_candidates {
                if ranks[x] < ranks[y] {
                    counts[x][y] += 1;
                }
            }
        }
    }
    counts
}

/// Derives the link strengths from the raw counts through the metric.
fn link_strengths<S: StrengthMetric + ?Sized>(
    counts: &[Vec<u64>],
    total_votes: u64,
    metric: &S,
) -> Vec<Vec<i64>> {
    let n = counts.len();
    let mut d: Vec<Vec<i64>> = vec![vec![0; n]; n];
    for x in 0..n {
        for y in 0..n {
            d[x][y] = metric.strength(counts[x][y], counts[y][x], total_votes);
        }
    }
    d
}

/// Computes the widest path weight for every ordered pair: the maximum over
/// all directed paths of the minimum link strength along the path.
///
/// This is a min-max variant of the Floyd-Warshall all-pairs closure. The
/// update is monotone and idempotent, so a single pass with every candidate
/// taken once as intermediate vertex reaches the unique fixed point, in any
/// intermediate order. The input table is left untouched.
fn widest_paths(d: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let n = d.len();
    let mut p: Vec<Vec<i64>> = d.to_vec();
    for i in 0..n {
        for j in 0..n {
            if j == i {
                continue;
            }
            for k in 0..n {
                if k == i || k == j {
                    continue;
                }
                p[j][k] = p[j][k].max(p[j][i].min(p[i][k]));
            }
        }
    }
    p
}

/// The undominated candidates of `remaining` under the closed strength table:
/// those at least as strongly connected to every other remaining candidate as
/// that candidate is back to them.
///
/// The widest-path closure of any total metric yields a transitive dominance
/// relation, so a non-empty `remaining` always has a maximal element.
fn undominated(p: &[Vec<i64>], remaining: &[CandidateIndex]) -> Vec<CandidateIndex> {
    remaining
        .iter()
        .copied()
        .filter(|&i| remaining.iter().all(|&j| p[i][j] >= p[j][i]))
        .collect()
}

/// Peels off preference levels from the closed strength table until every
/// candidate is placed.
///
/// Plain loop over an explicit working set: the remaining set strictly
/// shrinks each round, so this terminates after at most one round per
/// candidate. An empty undominated set would mean the strength metric broke
/// its monotonicity contract; that is reported rather than looped on.
fn extract_levels(p: &[Vec<i64>]) -> Result<Vec<Vec<CandidateIndex>>, SchulzeError> {
    let num_candidates = p.len();
    let mut leveled = vec![false; num_candidates];
    let mut num_placed = 0;
    let mut result: Vec<Vec<CandidateIndex>> = Vec::new();
    while num_placed < num_candidates {
        let remaining: Vec<CandidateIndex> = (0..num_candidates).filter(|&c| !leveled[c]).collect();
        let winners = undominated(p, &remaining);
        if winners.is_empty() {
            return Err(SchulzeError::NoUndominatedCandidate);
        }
        debug!(
            "extract_levels: level {}: winners {:?} out of remaining {:?}",
            result.len() + 1,
            winners,
            remaining
        );
        for &w in &winners {
            leveled[w] = true;
        }
        num_placed += winners.len();
        result.push(winners);
    }
    Ok(result)
}

/// The shared routine behind all entry points: checked counts plus leveled
/// result, both in candidate-index space.
fn evaluate_routine<S: StrengthMetric + ?Sized>(
    ballots: &[Ballot],
    candidates: &[Candidate],
    metric: &S,
) -> Result<(Vec<Vec<u64>>, Vec<Vec<CandidateIndex>>), SchulzeError> {
    info!(
        "evaluate_routine: processing {} ballots over {} candidates",
        ballots.len(),
        candidates.len()
    );
    let checked = checks(ballots, candidates)?;
    let counts = pairwise_tally(&checked, candidates.len());
    debug!("evaluate_routine: pairwise tally: {:?}", counts);
    let d = link_strengths(&counts, ballots.len() as u64, metric);
    let p = widest_paths(&d);
    let result = extract_levels(&p)?;
    Ok((counts, result))
}

fn condense(result: &[Vec<CandidateIndex>], candidates: &[Candidate]) -> String {
    result
        .iter()
        .map(|level| {
            level
                .iter()
                .map(|&c| candidates[c].as_str())
                .collect::<Vec<&str>>()
                .join("=")
        })
        .collect::<Vec<String>>()
        .join(">")
}

// **** Public interface ****

/// Aggregates the ranked ballots into one condensed ranking string, using the
/// default [`WinningVotes`] metric.
///
/// The returned string has the same shape as a ballot encoding: levels of
/// descending aggregate preference joined by `>`, tied candidates within a
/// level joined by `=`.
///
/// The result is identical under any permutation of the ballot collection and
/// under any permutation of tied candidates within one ballot level. The
/// order of the candidate list is significant: candidates tied in the result
/// keep their relative order from the list, so `1=2>0` and `2=1>0` carry the
/// same meaning but only one of them is returned.
///
/// Candidates must be passed explicitly rather than inferred from the
/// ballots; this keeps zero-ballot evaluations meaningful (every candidate
/// tied in a single level).
pub fn evaluate(ballots: &[Ballot], candidates: &[Candidate]) -> Result<String, SchulzeError> {
    evaluate_with(ballots, candidates, &WinningVotes)
}

/// Like [`evaluate`], with an explicit strength metric.
pub fn evaluate_with<S: StrengthMetric + ?Sized>(
    ballots: &[Ballot],
    candidates: &[Candidate],
    metric: &S,
) -> Result<String, SchulzeError> {
    let (_, result) = evaluate_routine(ballots, candidates, metric)?;
    Ok(condense(&result, candidates))
}

/// Evaluates the ballots and reports, for each adjacent pair of result
/// levels, how the voters compared the two levels' candidates.
///
/// An evaluation with `n` result levels yields `n - 1` entries, one per
/// boundary between adjacent levels. Concatenating the first entry's
/// `preferred` list with every entry's `rejected` list reconstructs the
/// condensed result of [`evaluate_with`].
pub fn evaluate_detailed<S: StrengthMetric + ?Sized>(
    ballots: &[Ballot],
    candidates: &[Candidate],
    metric: &S,
) -> Result<Vec<DetailedResultLevel>, SchulzeError> {
    let (counts, result) = evaluate_routine(ballots, candidates, metric)?;
    let mut detailed: Vec<DetailedResultLevel> = Vec::new();
    for pair in result.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        let mut support: PairwisePreference = HashMap::new();
        let mut opposition: PairwisePreference = HashMap::new();
        for &pref in upper {
            for &rej in lower {
                let key = (candidates[pref].clone(), candidates[rej].clone());
                support.insert(key.clone(), counts[pref][rej]);
                opposition.insert(key, counts[rej][pref]);
            }
        }
        detailed.push(DetailedResultLevel {
            preferred: upper.iter().map(|&c| candidates[c].clone()).collect(),
            rejected: lower.iter().map(|&c| candidates[c].clone()).collect(),
            support,
            opposition,
        });
    }
    Ok(detailed)
}

/// The raw pairwise tally, exposed standalone.
///
/// This does not yet reveal the overall preference, but it shows the voters'
/// sentiment on every pair of distinct candidates. The ballots are validated
/// the same way as for a full evaluation.
pub fn pairwise_preference(
    ballots: &[Ballot],
    candidates: &[Candidate],
) -> Result<PairwisePreference, SchulzeError> {
    let checked = checks(ballots, candidates)?;
    let counts = pairwise_tally(&checked, candidates.len());
    let mut prefs: PairwisePreference = HashMap::new();
    for (x, cx) in candidates.iter().enumerate() {
        for (y, cy) in candidates.iter().enumerate() {
            if x != y {
                prefs.insert((cx.clone(), cy.clone()), counts[x][y]);
            }
        }
    }
    Ok(prefs)
}
