//! # Customer Repository
//!
//! Database operations for customers. Email addresses are unique; a
//! duplicate surfaces as `DbError::UniqueViolation`.

use sqlx::SqlitePool;
use tracing::debug;

use rental_core::{Customer, CustomerView, EntityId, NewCustomer, Rental};

use crate::error::{DbError, DbResult};
use crate::repository::RENTAL_COLUMNS;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists every customer with their rentals, ordered by id.
    pub async fn list_views(&self) -> DbResult<Vec<CustomerView>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, phone FROM customers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let rentals =
            sqlx::query_as::<_, Rental>(&format!("SELECT {RENTAL_COLUMNS} FROM rentals ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(CustomerView::assemble(customers, rentals))
    }

    /// Gets a customer row by its ID.
    pub async fn get_by_id(&self, id: EntityId) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, phone FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer with their rentals.
    ///
    /// Returns `DbError::NotFound` when the customer doesn't exist.
    pub async fn get_view(&self, id: EntityId) -> DbResult<CustomerView> {
        let customer = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id))?;

        let rentals = sqlx::query_as::<_, Rental>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE customer_id = ?1 ORDER BY id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(CustomerView { customer, rentals })
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - Inserted customer with its assigned id
    /// * `Err(DbError::UniqueViolation)` - email already in use
    pub async fn insert(&self, customer: &NewCustomer) -> DbResult<Customer> {
        debug!(email = %customer.email, "Inserting customer");

        let result = sqlx::query("INSERT INTO customers (name, email, phone) VALUES (?1, ?2, ?3)")
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .execute(&self.pool)
            .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        })
    }

    /// Updates an existing customer.
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = customer.id, "Updating customer");

        let result =
            sqlx::query("UPDATE customers SET name = ?2, email = ?3, phone = ?4 WHERE id = ?1")
                .bind(customer.id)
                .bind(&customer.name)
                .bind(&customer.email)
                .bind(&customer.phone)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", customer.id));
        }

        Ok(())
    }

    /// Deletes a customer.
    ///
    /// Fails with `DbError::ForeignKeyViolation` while a rental still
    /// references the customer.
    pub async fn delete(&self, id: EntityId) -> DbResult<()> {
        debug!(id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Counts customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
