use serde::Deserialize;

use crate::error::AppError;

pub const MIN_SCORE: i32 = -5;
pub const MAX_SCORE: i32 = 5;
pub const MAX_USER_ID_LEN: usize = 128;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct VoteIn {
    #[schema(example = 1)]
    pub item_id: i32,
    /// Signed score in `-5..=5`.
    #[schema(example = 4, minimum = -5, maximum = 5)]
    pub score: i32,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct VoteBatchIn {
    /// Client-chosen voter identity (e.g. a nickname).
    #[schema(example = "alice")]
    pub user_id: String,
    pub votes: Vec<VoteIn>,
}

/// `user_id` is stored as sent; whitespace only counts against it when the
/// whole id is blank.
pub fn validate_vote_batch(payload: &VoteBatchIn) -> Result<(), AppError> {
    let user_id = &payload.user_id;
    if user_id.trim().is_empty() || user_id.chars().count() > MAX_USER_ID_LEN {
        return Err(AppError::Validation(format!(
            "user_id must be 1-{MAX_USER_ID_LEN} characters"
        )));
    }

    if let Some(vote) = payload
        .votes
        .iter()
        .find(|v| !(MIN_SCORE..=MAX_SCORE).contains(&v.score))
    {
        return Err(AppError::Validation(format!(
            "Score {} for item {} must be between {MIN_SCORE} and {MAX_SCORE}",
            vote.score, vote.item_id
        )));
    }

    Ok(())
}
