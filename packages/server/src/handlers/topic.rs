use axum::Json;
use axum::extract::State;

use crate::models::topic::TopicResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/topic",
    tag = "Topic",
    operation_id = "getTopic",
    summary = "Current voting topic",
    responses(
        (status = 200, description = "Topic", body = TopicResponse),
    ),
)]
pub async fn get_topic(State(state): State<AppState>) -> Json<TopicResponse> {
    Json(TopicResponse {
        title: state.config.voting.topic.clone(),
    })
}
