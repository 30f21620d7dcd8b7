use sea_orm::FromQueryResult;
use serde::Serialize;

/// Item metadata without image content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct ItemMeta {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Sunset over the harbour")]
    pub description: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ItemCreated {
    #[schema(example = 1)]
    pub id: i32,
}

pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Pick the stored MIME type for an upload: the declared part type, else a
/// guess from the file name, else [`DEFAULT_MIME`].
pub fn resolve_mime(declared: Option<&str>, file_name: Option<&str>) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|m| !m.is_empty()) {
        return declared.to_string();
    }

    file_name
        .and_then(|name| mime_guess::from_path(name).first())
        .map(|m| m.to_string())
        .unwrap_or_else(|| DEFAULT_MIME.to_string())
}
