use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/items", item_routes(config))
        .nest("/votes", vote_routes())
        .nest("/results", result_routes())
        .routes(routes!(handlers::topic::get_topic))
}

fn item_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::item::create_item,
            handlers::item::list_items
        ))
        .routes(routes!(handlers::item::get_item_image))
        .layer(handlers::item::image_upload_body_limit(
            config.server.max_upload_bytes,
        ))
}

fn vote_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::vote::submit_votes))
}

fn result_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::result::get_results))
        .routes(routes!(handlers::result::get_results_ranked))
        .routes(routes!(handlers::result::get_distributions))
        .routes(routes!(handlers::result::get_item_result))
}
