// src/models/submission.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::scoring::PartScores;

/// DTO for submitting the answers of one quiz part.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitPartRequest {
    /// Quiz part key, e.g. "house" or "wand".
    #[serde(default)]
    pub part: String,

    /// One entry per question. `null` or "" skips the question.
    #[serde(default)]
    #[validate(custom(function = validate_answers))]
    pub answers: Vec<Option<String>>,
}

/// Result of scoring one quiz part.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitPartResponse {
    pub part: String,

    /// Winner, composite wand suggestion, or null.
    pub result: Option<String>,

    /// Tally. Nested (`{"wood": {...}, "core": {...}}`) for composite parts.
    #[schema(value_type = Object)]
    pub scores: PartScores,
}

/// DTO for the final, multi-part submission.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FinalResultRequest {
    /// Part key -> answers. Parts not listed count as not attempted.
    #[serde(default)]
    #[validate(custom(function = validate_answers_by_part))]
    #[schema(value_type = Object)]
    pub answers_by_part: IndexMap<String, Vec<Option<String>>>,
}

const MAX_ANSWER_LEN: usize = 500;

fn validate_answers(answers: &[Option<String>]) -> Result<(), validator::ValidationError> {
    for ans in answers.iter().flatten() {
        if ans.len() > MAX_ANSWER_LEN {
            return Err(validator::ValidationError::new("answer_too_long"));
        }
    }
    Ok(())
}

fn validate_answers_by_part(
    answers_by_part: &IndexMap<String, Vec<Option<String>>>,
) -> Result<(), validator::ValidationError> {
    for answers in answers_by_part.values() {
        validate_answers(answers)?;
    }
    Ok(())
}
