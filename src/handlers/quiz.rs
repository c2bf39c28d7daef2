// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};
use indexmap::IndexMap;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        quiz::PublicPart,
        submission::{FinalResultRequest, SubmitPartRequest, SubmitPartResponse},
    },
    scoring::{ScoringEngine, TieBreaker},
};

/// Lists every quiz part with its questions and option labels.
///
/// Scoring weights are never exposed.
#[utoipa::path(
    get,
    path = "/api/parts",
    tag = "quiz",
    responses(
        (status = 200, description = "Quiz parts keyed by part key", body = std::collections::HashMap<String, PublicPart>)
    )
)]
pub async fn list_parts(
    State(engine): State<Arc<ScoringEngine>>,
) -> Result<impl IntoResponse, AppError> {
    let parts: IndexMap<String, PublicPart> = engine
        .catalog()
        .parts
        .iter()
        .map(|(key, def)| (key.clone(), PublicPart::from(def)))
        .collect();

    Ok(Json(parts))
}

/// Retrieves a single quiz part by key.
#[utoipa::path(
    get,
    path = "/api/parts/{key}",
    tag = "quiz",
    params(("key" = String, Path, description = "Quiz part key, e.g. `house`")),
    responses(
        (status = 200, description = "The quiz part", body = PublicPart),
        (status = 404, description = "Unknown quiz part")
    )
)]
pub async fn get_part(
    State(engine): State<Arc<ScoringEngine>>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let part = engine
        .catalog()
        .get(&key)
        .map(PublicPart::from)
        .ok_or(AppError::NotFound("quiz part not found".to_string()))?;

    Ok(Json(part))
}

/// Scores the answers of one quiz part.
///
/// * Rejects unknown parts and answer lists of the wrong length (400).
/// * Empty or unrecognized answers simply score nothing.
#[utoipa::path(
    post,
    path = "/api/submit_part",
    tag = "quiz",
    request_body = SubmitPartRequest,
    responses(
        (status = 200, description = "Winner and tally", body = SubmitPartResponse),
        (status = 400, description = "Unknown part or wrong answer count")
    )
)]
pub async fn submit_part(
    State(engine): State<Arc<ScoringEngine>>,
    State(tie_breaker): State<TieBreaker>,
    payload: Result<Json<SubmitPartRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let outcome = tie_breaker
        .with_rng(|rng| engine.score_part(&req.part, &req.answers, rng))
        .map_err(|e| {
            tracing::info!(part = %req.part, "Rejected part submission: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(SubmitPartResponse {
        part: req.part,
        result: outcome.result,
        scores: outcome.scores,
    }))
}

/// Scores every attempted part at once and returns the combined profile.
///
/// Parts left out of `answers_by_part` come back as `null` with empty scores.
#[utoipa::path(
    post,
    path = "/api/final_result",
    tag = "quiz",
    request_body = FinalResultRequest,
    responses(
        (status = 200, description = "Flat profile with one result/scores pair per part"),
        (status = 400, description = "Wrong answer count for an attempted part")
    )
)]
pub async fn final_result(
    State(engine): State<Arc<ScoringEngine>>,
    State(tie_breaker): State<TieBreaker>,
    payload: Result<Json<FinalResultRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    tracing::debug!(parts = req.answers_by_part.len(), "Building final profile");

    let profile = tie_breaker.with_rng(|rng| engine.build_profile(&req.answers_by_part, rng))?;

    Ok(Json(profile))
}
