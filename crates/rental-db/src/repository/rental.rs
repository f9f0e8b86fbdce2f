//! # Rental Repository
//!
//! Database operations for rentals. Rentals are leaves of the entity graph:
//! nothing references them, so deleting one never fails on integrity.

use sqlx::SqlitePool;
use tracing::debug;

use rental_core::{EntityId, NewRental, Rental};

use crate::error::{DbError, DbResult};
use crate::repository::RENTAL_COLUMNS;

/// Repository for rental database operations.
#[derive(Debug, Clone)]
pub struct RentalRepository {
    pool: SqlitePool,
}

impl RentalRepository {
    /// Creates a new RentalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RentalRepository { pool }
    }

    /// Lists every rental, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Rental>> {
        let rentals =
            sqlx::query_as::<_, Rental>(&format!("SELECT {RENTAL_COLUMNS} FROM rentals ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        debug!(count = rentals.len(), "Listed rentals");
        Ok(rentals)
    }

    /// Gets a rental by its ID.
    pub async fn get_by_id(&self, id: EntityId) -> DbResult<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }

    /// Inserts a new rental.
    ///
    /// ## Returns
    /// * `Ok(Rental)` - Inserted rental with its assigned id
    /// * `Err(DbError::ForeignKeyViolation)` - car or customer doesn't exist
    pub async fn insert(&self, rental: &NewRental) -> DbResult<Rental> {
        debug!(
            car_id = rental.car_id,
            customer_id = rental.customer_id,
            "Inserting rental"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO rentals (car_id, customer_id, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(rental.car_id)
        .bind(rental.customer_id)
        .bind(rental.start_date)
        .bind(rental.end_date)
        .execute(&self.pool)
        .await?;

        Ok(Rental {
            id: result.last_insert_rowid(),
            car_id: rental.car_id,
            customer_id: rental.customer_id,
            start_date: rental.start_date,
            end_date: rental.end_date,
        })
    }

    /// Updates the dates of an existing rental.
    pub async fn update_dates(&self, rental: &Rental) -> DbResult<()> {
        debug!(id = rental.id, "Updating rental dates");

        let result = sqlx::query("UPDATE rentals SET start_date = ?2, end_date = ?3 WHERE id = ?1")
            .bind(rental.id)
            .bind(rental.start_date)
            .bind(rental.end_date)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Rental", rental.id));
        }

        Ok(())
    }

    /// Deletes a rental.
    pub async fn delete(&self, id: EntityId) -> DbResult<()> {
        debug!(id, "Deleting rental");

        let result = sqlx::query("DELETE FROM rentals WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Rental", id));
        }

        Ok(())
    }

    /// Counts rentals.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rentals")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
