// ********* Input data structures ***********

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// A single candidate standing in the election.
///
/// Any text is accepted at construction. The reserved separators `>` and `=`
/// are rejected during evaluation, before any ballot is counted.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct Candidate(String);

impl Candidate {
    pub fn new<S: Into<String>>(name: S) -> Candidate {
        Candidate(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Candidate {
    fn from(name: &str) -> Candidate {
        Candidate(name.to_string())
    }
}

/// A single ranked ballot: descending preference levels, all candidates within
/// one level tied.
///
/// The condensed wire form `"a>b=c>d"` and the level-based form round-trip
/// losslessly through [`FromStr`] and [`Display`]. Parsing is purely
/// structural; whether the ballot covers exactly the declared candidate set is
/// checked by the evaluation entry points.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ballot {
    levels: Vec<Vec<Candidate>>,
}

impl Ballot {
    /// Builds a ballot from explicit preference levels.
    pub fn from_levels(levels: Vec<Vec<Candidate>>) -> Ballot {
        Ballot { levels }
    }

    /// Parses the condensed encoding, like `"a>b=c>d"`.
    ///
    /// Parsing never fails: it only splits on the reserved separators. Any
    /// mismatch against the declared candidate set is reported by the
    /// evaluation entry points.
    pub fn parse(encoded: &str) -> Ballot {
        let levels = encoded
            .split('>')
            .map(|level| level.split('=').map(Candidate::from).collect())
            .collect();
        Ballot { levels }
    }

    pub fn levels(&self) -> &[Vec<Candidate>] {
        &self.levels
    }

    /// All candidates on this ballot, most preferred level first.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.levels.iter().flatten()
    }
}

impl FromStr for Ballot {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Ballot, Self::Err> {
        Ok(Ballot::parse(s))
    }
}

impl Display for Ballot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let condensed = self
            .levels
            .iter()
            .map(|level| {
                level
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<&str>>()
                    .join("=")
            })
            .collect::<Vec<String>>()
            .join(">");
        write!(f, "{}", condensed)
    }
}

// ******** Output data structures *********

/// How many ballots prefer the first candidate of the pair over the second.
pub type PairwisePreference = HashMap<(Candidate, Candidate), u64>;

/// One step of the aggregate preference, comparing a level against the level
/// immediately below it.
///
/// `support` and `opposition` are read from the raw pairwise tally, not from
/// the widest-path closure: the closure encodes transitive strength, while
/// these report how the voters actually compared the two levels' candidates.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DetailedResultLevel {
    /// The candidates of the upper level, in original candidate order.
    pub preferred: Vec<Candidate>,
    /// The candidates of the level directly below, in original candidate order.
    pub rejected: Vec<Candidate>,
    /// Ballots preferring `preferred` over `rejected`, per candidate pair.
    pub support: PairwisePreference,
    /// Ballots preferring `rejected` over `preferred`, keyed as (preferred, rejected).
    pub opposition: PairwisePreference,
}

// ********* Errors **********

/// Errors that prevent an evaluation from completing.
///
/// Validation runs eagerly over the whole input before any tally, so an
/// evaluation either fully succeeds or reports exactly one error: the first
/// structural problem found, in ballot order. `ballot` indices are zero-based
/// positions in the ballot collection as passed in.
#[derive(Error, Eq, PartialEq, Debug, Clone)]
pub enum SchulzeError {
    /// A candidate token contains one of the reserved separators `>` or `=`.
    /// The candidate list must be fixed before retrying.
    #[error("candidate {candidate:?} contains a reserved separator")]
    ReservedCharacter { candidate: String },

    /// The declared candidate list names the same candidate more than once.
    /// Candidates are identified by value, so a repeated name is a
    /// configuration mistake, not a distinct candidate.
    #[error("candidate {candidate:?} is declared more than once")]
    RepeatedCandidate { candidate: String },

    /// A ballot ranks a candidate that is not in the declared candidate set.
    #[error("superfluous candidate in ballot {ballot}")]
    SuperfluousCandidate { ballot: usize },

    /// A ballot omits one or more declared candidates.
    #[error("missing candidate in ballot {ballot}")]
    MissingCandidate { ballot: usize },

    /// A ballot ranks the same candidate more than once.
    #[error("candidate {candidate:?} occurs more than once in ballot {ballot}")]
    DuplicateCandidate { ballot: usize, candidate: String },

    /// Winner extraction found no undominated candidate in a non-empty
    /// remaining set. Unreachable with the bundled metrics; indicates a
    /// custom strength metric violating the monotonicity contract.
    #[error("no undominated candidate left, the strength metric is inconsistent")]
    NoUndominatedCandidate,
}
