use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::path::AppPath;
use crate::models::item::{ItemCreated, ItemMeta, resolve_mime};
use crate::state::AppState;
use crate::store::ItemStore;

pub fn image_upload_body_limit(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Items",
    operation_id = "createItem",
    summary = "Upload a new item",
    description = "Creates an item from a multipart form with a `description` text field and an \
        `image` file field. The image is stored with the part's declared content type, falling \
        back to a guess from the file name.",
    request_body(content_type = "multipart/form-data", description = "Description and image file"),
    responses(
        (status = 201, description = "Item created", body = ItemCreated),
        (status = 400, description = "Missing field or empty image (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut description: Option<String> = None;
    let mut image: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read description: {e}"))
                })?;
                description = Some(text.trim().to_string());
            }
            Some("image") => {
                let mime = resolve_mime(field.content_type(), field.file_name());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read image: {e}")))?;
                image = Some((bytes.to_vec(), mime));
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let description =
        description.ok_or_else(|| AppError::Validation("Missing 'description' field".into()))?;
    let (bytes, mime) = image.ok_or_else(|| AppError::Validation("Missing 'image' field".into()))?;
    let size = bytes.len();

    let id = ItemStore::new(&state.db)
        .create_item(description, bytes, mime)
        .await?;
    info!(id, size, "Item created");

    Ok((StatusCode::CREATED, Json(ItemCreated { id })))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Items",
    operation_id = "listItems",
    summary = "List items",
    description = "Returns every item's id and description in id order. Image content is omitted.",
    responses(
        (status = 200, description = "Item list", body = Vec<ItemMeta>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<ItemMeta>>, AppError> {
    Ok(Json(ItemStore::new(&state.db).list_items().await?))
}

#[utoipa::path(
    get,
    path = "/{id}/image",
    tag = "Items",
    operation_id = "getItemImage",
    summary = "Download an item's image",
    description = "Returns the raw image bytes with the MIME type recorded at upload.",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Image content"),
        (status = 400, description = "Non-numeric id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_item_image(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let image = ItemStore::new(&state.db).get_item_image(id).await?;

    Ok(([(header::CONTENT_TYPE, image.mime)], image.bytes).into_response())
}
