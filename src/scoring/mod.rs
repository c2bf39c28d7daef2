// src/scoring/mod.rs

//! Answer tallying and winner selection over a quiz catalog.
//!
//! The engine is pure apart from the tie-break draw, which always comes from
//! the random source handed in by the caller.

pub mod composite;
pub mod profile;
pub mod resolve;
pub mod tally;
pub mod tiebreak;

use std::sync::Arc;

use indexmap::IndexMap;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::models::quiz::{Catalog, QuizDefinition, Resolution, ScoreTally};

pub use composite::{SplitTally, resolve_composite};
pub use profile::Profile;
pub use resolve::resolve;
pub use tiebreak::TieBreaker;

/// Client-input failures detected before any tallying happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("unknown part")]
    UnknownQuiz { key: String },

    #[error("answers must be a list with length {expected}")]
    LengthMismatch {
        part: String,
        expected: usize,
        actual: usize,
    },
}

/// Scores of a scored part: flat, or one tally per half for composite parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PartScores {
    Flat(ScoreTally),
    Split(IndexMap<String, ScoreTally>),
}

impl Default for PartScores {
    fn default() -> Self {
        PartScores::Flat(ScoreTally::new())
    }
}

/// Winner (if any) and scores of one quiz part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartOutcome {
    pub result: Option<String>,
    pub scores: PartScores,
}

/// Tallies and resolves submissions against an injected, read-only catalog.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<Catalog>,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn definition(&self, quiz_key: &str) -> Result<&QuizDefinition, ScoringError> {
        self.catalog.get(quiz_key).ok_or_else(|| ScoringError::UnknownQuiz {
            key: quiz_key.to_string(),
        })
    }

    /// Sums the awards of `answers` for one quiz part.
    ///
    /// Fails when the part is unknown or the answer count differs from the question count.
    pub fn tally(
        &self,
        quiz_key: &str,
        answers: &[Option<String>],
    ) -> Result<ScoreTally, ScoringError> {
        let def = self.definition(quiz_key)?;
        check_length(quiz_key, def, answers)?;
        Ok(tally::tally_answers(&def.questions, answers))
    }

    /// Tallies one part and resolves it according to its resolution rule.
    pub fn score_part<R: Rng + ?Sized>(
        &self,
        quiz_key: &str,
        answers: &[Option<String>],
        rng: &mut R,
    ) -> Result<PartOutcome, ScoringError> {
        let def = self.definition(quiz_key)?;
        check_length(quiz_key, def, answers)?;
        let scores = tally::tally_answers(&def.questions, answers);

        let outcome = match &def.resolution {
            Resolution::Highest => {
                let (result, scores) = resolve(scores, &[], rng);
                PartOutcome {
                    result,
                    scores: PartScores::Flat(scores),
                }
            }
            Resolution::Canonical { keys } => {
                let (result, scores) = resolve(scores, keys, rng);
                PartOutcome {
                    result,
                    scores: PartScores::Flat(scores),
                }
            }
            Resolution::Composite {
                separator,
                first,
                second,
            } => {
                let (result, split) = resolve_composite(&scores, separator, first, second);
                PartOutcome {
                    result,
                    scores: PartScores::Split(split.into_labelled(first, second)),
                }
            }
            Resolution::ProfileOnly => PartOutcome {
                result: None,
                scores: PartScores::Flat(scores),
            },
        };

        tracing::debug!(part = quiz_key, result = ?outcome.result, "Scored quiz part");
        Ok(outcome)
    }
}

fn check_length(
    quiz_key: &str,
    def: &QuizDefinition,
    answers: &[Option<String>],
) -> Result<(), ScoringError> {
    let expected = def.question_count();
    if answers.len() != expected {
        return Err(ScoringError::LengthMismatch {
            part: quiz_key.to_string(),
            expected,
            actual: answers.len(),
        });
    }
    Ok(())
}
