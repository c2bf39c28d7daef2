// src/scoring/composite.rs

use indexmap::IndexMap;

use super::resolve::first_highest;
use crate::models::quiz::ScoreTally;

/// The two halves of a composite tally (wood and core for wands).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitTally {
    pub first: ScoreTally,
    pub second: ScoreTally,
}

impl SplitTally {
    /// Splits every `first<sep>second` key and credits the full weight to both halves.
    /// Keys without the separator are ignored.
    pub fn from_tally(tally: &ScoreTally, separator: &str) -> Self {
        let mut split = SplitTally::default();
        for (key, points) in tally {
            if let Some((first, second)) = key.split_once(separator) {
                let first_total = split.first.entry(first.to_string()).or_insert(0);
                *first_total = first_total.saturating_add(*points);
                let second_total = split.second.entry(second.to_string()).or_insert(0);
                *second_total = second_total.saturating_add(*points);
            }
        }
        split
    }

    /// Labels both halves, e.g. `{"wood": {...}, "core": {...}}`.
    pub fn into_labelled(self, first: &str, second: &str) -> IndexMap<String, ScoreTally> {
        IndexMap::from([
            (first.to_string(), self.first),
            (second.to_string(), self.second),
        ])
    }
}

/// Resolves a composite tally into a suggestion such as `"Yew (wood) with Phoenix core"`.
///
/// Each half takes its first-encountered maximum; there is no random draw here.
pub fn resolve_composite(
    tally: &ScoreTally,
    separator: &str,
    first_label: &str,
    second_label: &str,
) -> (Option<String>, SplitTally) {
    let split = SplitTally::from_tally(tally, separator);

    let suggestion = compose_suggestion(
        first_highest(&split.first),
        first_highest(&split.second),
        first_label,
        second_label,
    );

    (suggestion, split)
}

fn compose_suggestion(
    first: Option<&str>,
    second: Option<&str>,
    first_label: &str,
    second_label: &str,
) -> Option<String> {
    match (first, second) {
        (Some(a), Some(b)) => Some(format!("{a} ({first_label}) with {b} {second_label}")),
        (Some(a), None) => Some(format!("{a} ({first_label})")),
        (None, Some(b)) => Some(format!("{b} {second_label}")),
        (None, None) => None,
    }
}
