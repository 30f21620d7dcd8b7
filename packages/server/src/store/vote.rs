use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionSession, TransactionTrait,
};
use tracing::info;

use super::{ItemStore, StoreError};
use crate::entity::vote;
use crate::models::vote::VoteIn;

pub struct VoteStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C> VoteStore<'a, C>
where
    C: ConnectionTrait + TransactionTrait,
{
    /// Record `user_id`'s votes, replacing any earlier vote on the same item.
    ///
    /// The whole batch is one transaction: either every vote is stored or none.
    /// Fails with [`StoreError::Validation`] if any item does not exist.
    pub async fn submit_votes(&self, user_id: &str, votes: &[VoteIn]) -> Result<(), StoreError> {
        let latest = latest_scores(votes);
        if latest.is_empty() {
            return Ok(());
        }

        let item_ids: Vec<i32> = latest.keys().copied().collect();

        let txn = self.conn.begin().await?;

        let existing = ItemStore::new(&txn).count_existing(&item_ids).await?;
        if existing != item_ids.len() as u64 {
            return Err(StoreError::Validation(
                "One or more item_id do not exist".into(),
            ));
        }

        let now = Utc::now();
        let rows = latest.iter().map(|(&item_id, &score)| vote::ActiveModel {
            user_id: Set(user_id.to_string()),
            item_id: Set(item_id),
            score: Set(score),
            created_at: Set(now),
            ..Default::default()
        });

        vote::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([vote::Column::UserId, vote::Column::ItemId])
                    .update_columns([vote::Column::Score, vote::Column::CreatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;

        info!(user_id, count = latest.len(), "Votes recorded");
        Ok(())
    }
}

impl<'a, C: ConnectionTrait> VoteStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Every stored `(item_id, score)` pair, ordered by item.
    pub async fn all_scores(&self) -> Result<Vec<(i32, i32)>, StoreError> {
        let scores = vote::Entity::find()
            .select_only()
            .column(vote::Column::ItemId)
            .column(vote::Column::Score)
            .order_by_asc(vote::Column::ItemId)
            .order_by_asc(vote::Column::Id)
            .into_tuple::<(i32, i32)>()
            .all(self.conn)
            .await?;

        Ok(scores)
    }

    /// Stored scores for a single item.
    pub async fn scores_for_item(&self, item_id: i32) -> Result<Vec<i32>, StoreError> {
        let scores = vote::Entity::find()
            .filter(vote::Column::ItemId.eq(item_id))
            .select_only()
            .column(vote::Column::Score)
            .into_tuple::<i32>()
            .all(self.conn)
            .await?;

        Ok(scores)
    }
}

/// Collapse a batch to one score per item; later entries win.
fn latest_scores(votes: &[VoteIn]) -> HashMap<i32, i32> {
    votes.iter().map(|v| (v.item_id, v.score)).collect()
}
