//! # Database Migrations
//!
//! Embedded SQL migrations for the rental schema.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Startup ──► check _sqlx_migrations ──► run pending files in order     │
//! │                                                                         │
//! │  Reset   ──► drop entity tables (children first)                       │
//! │          ──► drop _sqlx_migrations                                     │
//! │          ──► run every migration again                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones
//! 4. Add any new table to [`ENTITY_TABLES`] so reset drops it

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Entity tables in drop order: dependents before the tables they reference.
pub const ENTITY_TABLES: [&str; 4] = ["rentals", "cars", "customers", "branches"];

/// Runs all pending database migrations.
///
/// Idempotent: safe to run on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Drops every entity table and re-creates the schema from scratch.
///
/// All rows are lost. The drops run in one transaction so a failure leaves
/// the old schema in place.
pub async fn reset_schema(pool: &SqlitePool) -> DbResult<()> {
    warn!(tables = ?ENTITY_TABLES, "Dropping all tables");

    let mut tx = pool.begin().await?;
    for table in ENTITY_TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await?;
    }
    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    run_migrations(pool).await
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}
