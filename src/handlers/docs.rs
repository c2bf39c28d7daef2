// src/handlers/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    handlers::quiz,
    models::{
        quiz::{PublicPart, PublicQuestion},
        submission::{FinalResultRequest, SubmitPartRequest, SubmitPartResponse},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Sorting Quiz API", description = "Hogwarts personality quiz scoring"),
    paths(
        quiz::list_parts,
        quiz::get_part,
        quiz::submit_part,
        quiz::final_result
    ),
    components(schemas(
        PublicPart,
        PublicQuestion,
        SubmitPartRequest,
        SubmitPartResponse,
        FinalResultRequest
    )),
    tags((name = "quiz", description = "Quiz catalog and scoring"))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
