// src/scoring/resolve.rs

use rand::{Rng, seq::SliceRandom};

use crate::models::quiz::ScoreTally;

/// Picks the highest-scoring entity.
///
/// Canonical keys are added to the tally with 0 before the draw, so a non-empty
/// `canonical_keys` always produces a winner. Ties are broken uniformly at random.
/// Returns the winner and the (possibly extended) tally.
pub fn resolve<R: Rng + ?Sized>(
    mut tally: ScoreTally,
    canonical_keys: &[String],
    rng: &mut R,
) -> (Option<String>, ScoreTally) {
    for key in canonical_keys {
        tally.entry(key.clone()).or_insert(0);
    }

    let max_score = tally.values().copied().max().unwrap_or(0);
    let top: Vec<&String> = tally
        .iter()
        .filter(|(_, score)| **score == max_score)
        .map(|(key, _)| key)
        .collect();

    let winner = top.choose(rng).map(|key| (*key).clone());
    (winner, tally)
}

/// Highest entry, keeping the first one seen on ties.
pub fn first_highest(tally: &ScoreTally) -> Option<&str> {
    let mut best: Option<(&str, u32)> = None;
    for (key, score) in tally {
        if best.is_none_or(|(_, top)| *score > top) {
            best = Some((key.as_str(), *score));
        }
    }
    best.map(|(key, _)| key)
}
