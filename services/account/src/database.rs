//! Database setup for the account service

use common::{database, error::DatabaseResult};
use sqlx::{PgPool, migrate::Migrator};

/// Schema of the accounts and sessions tables
static MIGRATOR: Migrator = sqlx::migrate!();

/// Bring the schema up to date
pub async fn run_migrations(pool: &PgPool) -> DatabaseResult<()> {
    database::apply_migrations(pool, &MIGRATOR).await
}
