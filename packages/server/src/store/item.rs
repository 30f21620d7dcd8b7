use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::StoreError;
use crate::entity::item;
use crate::models::item::ItemMeta;

/// Stored image content together with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemImage {
    pub bytes: Vec<u8>,
    pub mime: String,
}

pub struct ItemStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ItemStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Persist a new item and return its generated id.
    pub async fn create_item(
        &self,
        description: String,
        image_bytes: Vec<u8>,
        mime: String,
    ) -> Result<i32, StoreError> {
        if image_bytes.is_empty() {
            return Err(StoreError::Validation("Empty image upload".into()));
        }

        let model = item::ActiveModel {
            description: Set(description),
            image_bytes: Set(image_bytes),
            image_mime: Set(mime),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        Ok(model.id)
    }

    /// All items in id order, without their image content.
    pub async fn list_items(&self) -> Result<Vec<ItemMeta>, StoreError> {
        let items = item::Entity::find()
            .select_only()
            .column(item::Column::Id)
            .column(item::Column::Description)
            .order_by_asc(item::Column::Id)
            .into_model::<ItemMeta>()
            .all(self.conn)
            .await?;

        Ok(items)
    }

    pub async fn get_item_image(&self, item_id: i32) -> Result<ItemImage, StoreError> {
        let (bytes, mime) = item::Entity::find_by_id(item_id)
            .select_only()
            .column(item::Column::ImageBytes)
            .column(item::Column::ImageMime)
            .into_tuple::<(Vec<u8>, String)>()
            .one(self.conn)
            .await?
            .ok_or_else(|| StoreError::NotFound("Item not found".into()))?;

        Ok(ItemImage { bytes, mime })
    }

    pub async fn exists(&self, item_id: i32) -> Result<bool, StoreError> {
        let count = self.count_existing(&[item_id]).await?;
        Ok(count == 1)
    }

    /// Number of ids in `ids` that refer to stored items. `ids` must be distinct.
    pub async fn count_existing(&self, ids: &[i32]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let count = item::Entity::find()
            .filter(item::Column::Id.is_in(ids.iter().copied()))
            .count(self.conn)
            .await?;

        Ok(count)
    }
}
