use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::path::AppPath;
use crate::models::result::{ItemDistribution, ResultItem};
use crate::state::AppState;
use crate::store::ResultsService;

#[utoipa::path(
    get,
    path = "/",
    tag = "Results",
    operation_id = "getResults",
    summary = "Aggregated results per item",
    description = "Returns vote statistics and the composite rank for every item with at least \
        one vote, ordered by item id.",
    responses(
        (status = 200, description = "Results", body = Vec<ResultItem>),
    ),
)]
#[instrument(skip(state))]
pub async fn get_results(State(state): State<AppState>) -> Result<Json<Vec<ResultItem>>, AppError> {
    Ok(Json(ResultsService::new(&state.db).get_results().await?))
}

#[utoipa::path(
    get,
    path = "/ranked",
    tag = "Results",
    operation_id = "getRankedResults",
    summary = "Results sorted by rank",
    description = "Same entries as `/results`, sorted by `rank` descending. Ties keep item id order.",
    responses(
        (status = 200, description = "Ranked results", body = Vec<ResultItem>),
    ),
)]
#[instrument(skip(state))]
pub async fn get_results_ranked(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResultItem>>, AppError> {
    Ok(Json(ResultsService::new(&state.db).get_results_ranked().await?))
}

#[utoipa::path(
    get,
    path = "/distribution",
    tag = "Results",
    operation_id = "getDistributions",
    summary = "Score histogram per item",
    description = "For every item with votes, the number of votes at each score from -5 to 5.",
    responses(
        (status = 200, description = "Distributions", body = Vec<ItemDistribution>),
    ),
)]
#[instrument(skip(state))]
pub async fn get_distributions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemDistribution>>, AppError> {
    Ok(Json(ResultsService::new(&state.db).get_distributions().await?))
}

#[utoipa::path(
    get,
    path = "/{item_id}",
    tag = "Results",
    operation_id = "getItemResult",
    summary = "Results for one item",
    description = "Full statistics for a single item, in the same shape as `/results` entries. \
        An item without votes reports zeros.",
    params(("item_id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item result", body = ResultItem),
        (status = 400, description = "Non-numeric id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_item_result(
    State(state): State<AppState>,
    AppPath(item_id): AppPath<i32>,
) -> Result<Json<ResultItem>, AppError> {
    Ok(Json(
        ResultsService::new(&state.db)
            .get_item_result(item_id)
            .await?,
    ))
}
