//! # Car Repository
//!
//! Database operations for cars.
//!
//! ## Integrity Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert / update  ── branch_id must reference an existing branch       │
//! │  delete           ── no rental may still reference the car             │
//! │                                                                         │
//! │  Both are enforced by SQLite and surface as                            │
//! │  DbError::ForeignKeyViolation; the row is left unchanged.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use rental_core::{Car, CarView, EntityId, NewCar, Rental};

use crate::error::{DbError, DbResult};
use crate::repository::{CAR_COLUMNS, RENTAL_COLUMNS};

/// Repository for car database operations.
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: SqlitePool,
}

impl CarRepository {
    /// Creates a new CarRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CarRepository { pool }
    }

    /// Lists every car with its rentals, ordered by id.
    pub async fn list_views(&self) -> DbResult<Vec<CarView>> {
        let cars = sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM cars ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        let rentals =
            sqlx::query_as::<_, Rental>(&format!("SELECT {RENTAL_COLUMNS} FROM rentals ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        debug!(count = cars.len(), "Listed cars");
        Ok(CarView::assemble(cars, rentals))
    }

    /// Gets a car row by its ID.
    pub async fn get_by_id(&self, id: EntityId) -> DbResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    /// Gets a car with its rentals.
    ///
    /// Returns `DbError::NotFound` when the car doesn't exist.
    pub async fn get_view(&self, id: EntityId) -> DbResult<CarView> {
        let car = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Car", id))?;

        let rentals = sqlx::query_as::<_, Rental>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE car_id = ?1 ORDER BY id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(CarView { car, rentals })
    }

    /// Inserts a new car.
    ///
    /// ## Returns
    /// * `Ok(Car)` - Inserted car with its assigned id
    /// * `Err(DbError::ForeignKeyViolation)` - `branch_id` doesn't exist
    pub async fn insert(&self, car: &NewCar) -> DbResult<Car> {
        debug!(make = %car.make, model = %car.model, branch_id = car.branch_id, "Inserting car");

        let result = sqlx::query(
            r#"
            INSERT INTO cars (make, model, year, rental_rate, availability, branch_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.rental_rate)
        .bind(car.availability)
        .bind(car.branch_id)
        .execute(&self.pool)
        .await?;

        Ok(Car {
            id: result.last_insert_rowid(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            rental_rate: car.rental_rate,
            availability: car.availability,
            branch_id: car.branch_id,
        })
    }

    /// Updates an existing car.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Car doesn't exist
    /// * `Err(DbError::ForeignKeyViolation)` - new `branch_id` doesn't exist
    pub async fn update(&self, car: &Car) -> DbResult<()> {
        debug!(id = car.id, "Updating car");

        let result = sqlx::query(
            r#"
            UPDATE cars SET
                make = ?2,
                model = ?3,
                year = ?4,
                rental_rate = ?5,
                availability = ?6,
                branch_id = ?7
            WHERE id = ?1
            "#,
        )
        .bind(car.id)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.rental_rate)
        .bind(car.availability)
        .bind(car.branch_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Car", car.id));
        }

        Ok(())
    }

    /// Deletes a car.
    ///
    /// Fails with `DbError::ForeignKeyViolation` while a rental still
    /// references the car.
    pub async fn delete(&self, id: EntityId) -> DbResult<()> {
        debug!(id, "Deleting car");

        let result = sqlx::query("DELETE FROM cars WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Car", id));
        }

        Ok(())
    }

    /// Counts cars.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
