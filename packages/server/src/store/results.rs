use sea_orm::ConnectionTrait;

use super::{ItemStore, StoreError, VoteStore};
use crate::models::result::{ItemDistribution, ResultItem};
use crate::ranking::{self, Tally};

/// Read-side view over the vote table.
pub struct ResultsService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ResultsService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Statistics for every item that has at least one vote, by item id.
    pub async fn get_results(&self) -> Result<Vec<ResultItem>, StoreError> {
        let scores = VoteStore::new(self.conn).all_scores().await?;
        Ok(ranking::aggregate(scores))
    }

    /// Same entries as [`get_results`](Self::get_results), highest rank first.
    pub async fn get_results_ranked(&self) -> Result<Vec<ResultItem>, StoreError> {
        let mut results = self.get_results().await?;
        ranking::sort_by_rank(&mut results);
        Ok(results)
    }

    /// Full statistics for one item; zeros when it has no votes yet.
    pub async fn get_item_result(&self, item_id: i32) -> Result<ResultItem, StoreError> {
        if !ItemStore::new(self.conn).exists(item_id).await? {
            return Err(StoreError::NotFound("Item not found".into()));
        }

        let scores = VoteStore::new(self.conn).scores_for_item(item_id).await?;
        let mut tally = Tally::default();
        for score in scores {
            tally.add(score);
        }

        Ok(tally.into_result(item_id))
    }

    pub async fn get_distributions(&self) -> Result<Vec<ItemDistribution>, StoreError> {
        let scores = VoteStore::new(self.conn).all_scores().await?;
        Ok(ranking::distributions(scores))
    }
}
