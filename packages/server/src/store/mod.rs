//! Persistence services over a borrowed connection.
//!
//! Each service is generic over [`ConnectionTrait`](sea_orm::ConnectionTrait)
//! so it can run against the pool or inside a transaction.

pub mod item;
pub mod results;
pub mod vote;

use sea_orm::DbErr;
use thiserror::Error;

pub use item::ItemStore;
pub use results::ResultsService;
pub use vote::VoteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}
