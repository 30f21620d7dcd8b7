use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::vote::{VoteBatchIn, validate_vote_batch};
use crate::state::AppState;
use crate::store::VoteStore;

#[utoipa::path(
    post,
    path = "/",
    tag = "Votes",
    operation_id = "submitVotes",
    summary = "Submit a batch of votes",
    description = "Stores one vote per item for `user_id`, replacing any earlier vote by the same \
        user on the same item. Scores must be within -5..5 and every item must exist. The batch \
        is applied atomically: on any error nothing is stored.",
    request_body = VoteBatchIn,
    responses(
        (status = 204, description = "Votes stored"),
        (status = 400, description = "Score out of range or unknown item (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(user_id = %payload.user_id, count = payload.votes.len()))]
pub async fn submit_votes(
    State(state): State<AppState>,
    AppJson(payload): AppJson<VoteBatchIn>,
) -> Result<StatusCode, AppError> {
    validate_vote_batch(&payload)?;

    VoteStore::new(&state.db)
        .submit_votes(&payload.user_id, &payload.votes)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
