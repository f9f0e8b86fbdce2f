//! # Branch Repository
//!
//! Database operations for branches. A branch view carries its cars, and
//! each car carries its rentals.

use sqlx::SqlitePool;
use tracing::debug;

use rental_core::{Branch, BranchView, Car, EntityId, NewBranch, Rental};

use crate::error::{DbError, DbResult};
use crate::repository::{CAR_COLUMNS, RENTAL_COLUMNS};

/// Repository for branch database operations.
#[derive(Debug, Clone)]
pub struct BranchRepository {
    pool: SqlitePool,
}

impl BranchRepository {
    /// Creates a new BranchRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BranchRepository { pool }
    }

    /// Lists every branch with its cars and their rentals, ordered by id.
    pub async fn list_views(&self) -> DbResult<Vec<BranchView>> {
        let branches = sqlx::query_as::<_, Branch>(
            "SELECT id, name, location FROM branches ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let cars = sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM cars ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        let rentals =
            sqlx::query_as::<_, Rental>(&format!("SELECT {RENTAL_COLUMNS} FROM rentals ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        debug!(count = branches.len(), "Listed branches");
        Ok(BranchView::assemble(branches, cars, rentals))
    }

    /// Gets a branch row by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Branch))` - Branch found
    /// * `Ok(None)` - Branch not found
    pub async fn get_by_id(&self, id: EntityId) -> DbResult<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>(
            "SELECT id, name, location FROM branches WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(branch)
    }

    /// Gets a branch with its cars and their rentals.
    ///
    /// Returns `DbError::NotFound` when the branch doesn't exist.
    pub async fn get_view(&self, id: EntityId) -> DbResult<BranchView> {
        let branch = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Branch", id))?;

        let cars = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE branch_id = ?1 ORDER BY id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let rentals = sqlx::query_as::<_, Rental>(
            r#"
            SELECT r.id, r.car_id, r.customer_id, r.start_date, r.end_date
            FROM rentals r
            INNER JOIN cars c ON c.id = r.car_id
            WHERE c.branch_id = ?1
            ORDER BY r.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        BranchView::assemble(vec![branch], cars, rentals)
            .pop()
            .ok_or_else(|| DbError::not_found("Branch", id))
    }

    /// Inserts a new branch and returns it with its assigned id.
    pub async fn insert(&self, branch: &NewBranch) -> DbResult<Branch> {
        debug!(name = %branch.name, "Inserting branch");

        let result = sqlx::query("INSERT INTO branches (name, location) VALUES (?1, ?2)")
            .bind(&branch.name)
            .bind(&branch.location)
            .execute(&self.pool)
            .await?;

        Ok(Branch {
            id: result.last_insert_rowid(),
            name: branch.name.clone(),
            location: branch.location.clone(),
        })
    }

    /// Updates an existing branch.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Branch doesn't exist
    pub async fn update(&self, branch: &Branch) -> DbResult<()> {
        debug!(id = branch.id, "Updating branch");

        let result = sqlx::query("UPDATE branches SET name = ?2, location = ?3 WHERE id = ?1")
            .bind(branch.id)
            .bind(&branch.name)
            .bind(&branch.location)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Branch", branch.id));
        }

        Ok(())
    }

    /// Deletes a branch.
    ///
    /// Fails with `DbError::ForeignKeyViolation` while any car still belongs
    /// to the branch.
    pub async fn delete(&self, id: EntityId) -> DbResult<()> {
        debug!(id, "Deleting branch");

        let result = sqlx::query("DELETE FROM branches WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Branch", id));
        }

        Ok(())
    }

    /// Counts branches (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM branches")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
