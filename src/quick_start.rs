/*!

# Quick start

Suppose five candidates, named `0` through `4`, and a handful of voters who
each ranked all of them. A ballot is written in its condensed form: `>`
separates descending preference levels, `=` groups candidates the voter
considers equal, and every candidate appears exactly once.

```
use schulze_condorcet::{evaluate, Ballot, Candidate};

let candidates: Vec<Candidate> =
    ["0", "1", "2", "3", "4"].iter().map(|&s| Candidate::new(s)).collect();
let ballots: Vec<Ballot> = [
    "0>1>2>3>4",
    "4>3>2>1>0",
    "4=0>1=3>2",
    "3>0>2=4>1",
    "1>2=3>4=0",
    "2>1>4>0>3",
]
.iter()
.map(|s| Ballot::parse(s))
.collect();

let result = evaluate(&ballots, &candidates)?;
assert_eq!(result, "0=1>3>2>4");
# Ok::<(), schulze_condorcet::SchulzeError>(())
```

The aggregate ranking has the same shape as a ballot: here the voters could
not separate `0` and `1`, which together beat `3`, and so on. The candidate
list is passed explicitly. Its order decides how tied candidates are printed
(`0=1` rather than `1=0`), and it makes an election with zero ballots well
defined: everyone ties in a single level.

When ballots arrive one by one, the [`Builder`](crate::Builder) collects them
incrementally. For a closer look at how the voters compared two adjacent
result levels, use [`evaluate_detailed`](crate::evaluate_detailed), and for
the raw counts behind it all,
[`pairwise_preference`](crate::pairwise_preference).

The default metric weighing the pairwise counts is
[`WinningVotes`](crate::WinningVotes); pass
[`Margin`](crate::Margin) or your own
[`StrengthMetric`](crate::strength::StrengthMetric) to
[`evaluate_with`](crate::evaluate_with) to change it.

*/
