use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder, SqliteQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entity::vote;

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(config.sql_echo);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("vote_server::entity::*")
        .sync(&db)
        .await?;
    ensure_indexes(&db).await?;

    Ok(db)
}

/// Ensure required database indexes exist.
///
/// Schema-sync only emits unique indexes, so the grouping index used by the
/// results queries is created here.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let index = Index::create()
        .if_not_exists()
        .name("idx_votes_item_id")
        .table(vote::Entity)
        .col(vote::Column::ItemId)
        .to_owned();

    let stmt = match db.get_database_backend() {
        DbBackend::Postgres => index.to_string(PostgresQueryBuilder),
        DbBackend::Sqlite => index.to_string(SqliteQueryBuilder),
        // Only Postgres and SQLite drivers are compiled in.
        _ => return Ok(()),
    };

    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_votes_item_id exists");

    Ok(())
}
