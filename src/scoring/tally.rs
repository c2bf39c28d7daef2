// src/scoring/tally.rs

use crate::models::quiz::{Question, ScoreAward, ScoreTally};

/// Finds the award for an answer label.
///
/// Exact match first, then a trimmed, case-insensitive match against every label.
/// Unknown labels yield `None`.
pub fn match_option<'a>(question: &'a Question, answer: &str) -> Option<&'a ScoreAward> {
    if let Some(award) = question.options.get(answer) {
        return Some(award);
    }

    let wanted = answer.trim().to_lowercase();
    question
        .options
        .iter()
        .find(|(label, _)| label.trim().to_lowercase() == wanted)
        .map(|(_, award)| award)
}

/// Sums the awards of every matched answer, pairing answers with questions by position.
/// Empty and unmatched answers contribute nothing. Totals saturate at `u32::MAX`.
pub fn tally_answers(questions: &[Question], answers: &[Option<String>]) -> ScoreTally {
    let mut scores = ScoreTally::new();

    for (question, answer) in questions.iter().zip(answers) {
        let Some(answer) = answer.as_deref().filter(|a| !a.is_empty()) else {
            continue;
        };
        let Some(award) = match_option(question, answer) else {
            continue;
        };
        for (entity, points) in award {
            let total = scores.entry(entity.clone()).or_insert(0);
            *total = total.saturating_add(*points);
        }
    }

    scores
}
