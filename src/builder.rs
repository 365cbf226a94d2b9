use crate::{evaluate_detailed, evaluate_with, strength::StrengthMetric, WinningVotes};
use crate::{Ballot, Candidate, DetailedResultLevel, SchulzeError};

/// A builder collecting candidates and ballots for one evaluation.
///
/// Convenient when ballots arrive one by one, for example from a poll export.
///
/// ```
/// use schulze_condorcet::Builder;
///
/// let mut builder = Builder::new().candidates(&["Anna", "Bob"]);
///
/// builder.add_ballot_str("Anna>Bob");
/// builder.add_ballot_str("Bob>Anna");
/// builder.add_ballot_str("Anna=Bob");
///
/// assert_eq!(builder.evaluate()?, "Anna=Bob");
/// # Ok::<(), schulze_condorcet::SchulzeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    candidates: Vec<Candidate>,
    ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            candidates: Vec::new(),
            ballots: Vec::new(),
        }
    }

    /// Declares the candidate list. The order matters: candidates tied in the
    /// result are reported in this order.
    pub fn candidates(mut self, names: &[&str]) -> Builder {
        self.candidates = names.iter().map(|&n| Candidate::new(n)).collect();
        self
    }

    /// Adds one ballot in its condensed encoding, like `"a>b=c>d"`.
    ///
    /// The ballot is parsed structurally here; consistency against the
    /// candidate list is checked when evaluating.
    pub fn add_ballot_str(&mut self, encoded: &str) {
        self.ballots.push(Ballot::parse(encoded));
    }

    /// Adds one ballot in its level-based form.
    pub fn add_ballot(&mut self, ballot: Ballot) {
        self.ballots.push(ballot);
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    /// Evaluates the collected ballots under the default metric.
    pub fn evaluate(&self) -> Result<String, SchulzeError> {
        self.evaluate_with(&WinningVotes)
    }

    pub fn evaluate_with<S: StrengthMetric + ?Sized>(
        &self,
        metric: &S,
    ) -> Result<String, SchulzeError> {
        evaluate_with(&self.ballots, &self.candidates, metric)
    }

    pub fn evaluate_detailed<S: StrengthMetric + ?Sized>(
        &self,
        metric: &S,
    ) -> Result<Vec<DetailedResultLevel>, SchulzeError> {
        evaluate_detailed(&self.ballots, &self.candidates, metric)
    }
}
