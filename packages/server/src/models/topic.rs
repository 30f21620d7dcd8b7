use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct TopicResponse {
    /// Title of the current voting round.
    #[schema(example = "Photo contest 2025")]
    pub title: String,
}
