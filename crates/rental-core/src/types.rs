//! # Domain Types
//!
//! The four rental entities and the nested views returned by the API.
//!
//! ## Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Entity Graph                                    │
//! │                                                                         │
//! │  ┌─────────────┐  1     *  ┌─────────────┐  1     *  ┌─────────────┐   │
//! │  │   Branch    │──────────►│     Car     │──────────►│   Rental    │   │
//! │  │  id         │           │  id         │           │  id         │   │
//! │  │  name       │           │  branch_id  │           │  car_id     │   │
//! │  │  location   │           │  make/model │           │  customer_id│   │
//! │  └─────────────┘           └─────────────┘           │  start_date │   │
//! │                                                      │  end_date   │   │
//! │  ┌─────────────┐  1                               *  └─────────────┘   │
//! │  │  Customer   │──────────────────────────────────────────►▲          │
//! │  │  email (UQ) │                                                       │
//! │  └─────────────┘                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Nested Views
//! Responses serialize dependents eagerly:
//! - [`BranchView`] = branch fields + `cars` (each a [`CarView`])
//! - [`CarView`] = car fields + `rentals`
//! - [`CustomerView`] = customer fields + `rentals`
//!
//! Views are assembled from flat rows by the `assemble` functions below, so
//! the database layer can load each table with a single query.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Database-assigned row identifier.
pub type EntityId = i64;

// =============================================================================
// Branch
// =============================================================================

/// A rental branch (physical location holding cars).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: EntityId,
    pub name: String,
    pub location: String,
}

// =============================================================================
// Car
// =============================================================================

/// A car in the fleet, stationed at exactly one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Car {
    pub id: EntityId,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Daily rate in currency units.
    pub rental_rate: f64,
    /// Whether the car can currently be rented. New cars start available.
    pub availability: bool,
    pub branch_id: EntityId,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer. Email addresses are unique across customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

// =============================================================================
// Rental
// =============================================================================

/// A rental of one car by one customer over a date range.
///
/// Dates serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Rental {
    pub id: EntityId,
    pub car_id: EntityId,
    pub customer_id: EntityId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// =============================================================================
// Nested Views
// =============================================================================

/// A car together with its rentals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarView {
    #[serde(flatten)]
    pub car: Car,
    pub rentals: Vec<Rental>,
}

/// A branch together with its cars (and their rentals).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchView {
    #[serde(flatten)]
    pub branch: Branch,
    pub cars: Vec<CarView>,
}

/// A customer together with their rentals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerView {
    #[serde(flatten)]
    pub customer: Customer,
    pub rentals: Vec<Rental>,
}

/// Groups rows by a parent key, keeping the input order within each group.
fn group_by<T>(rows: Vec<T>, key: impl Fn(&T) -> EntityId) -> BTreeMap<EntityId, Vec<T>> {
    let mut groups: BTreeMap<EntityId, Vec<T>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(&row)).or_default().push(row);
    }
    groups
}

impl CarView {
    /// Attaches each rental to its car.
    ///
    /// Rentals that belong to none of the given cars are ignored. Output
    /// order follows `cars`.
    pub fn assemble(cars: Vec<Car>, rentals: Vec<Rental>) -> Vec<CarView> {
        let mut by_car = group_by(rentals, |r| r.car_id);
        cars.into_iter()
            .map(|car| {
                let rentals = by_car.remove(&car.id).unwrap_or_default();
                CarView { car, rentals }
            })
            .collect()
    }
}

impl BranchView {
    /// Attaches cars (with their rentals) to each branch.
    pub fn assemble(branches: Vec<Branch>, cars: Vec<Car>, rentals: Vec<Rental>) -> Vec<BranchView> {
        let mut by_branch = group_by(CarView::assemble(cars, rentals), |v| v.car.branch_id);
        branches
            .into_iter()
            .map(|branch| {
                let cars = by_branch.remove(&branch.id).unwrap_or_default();
                BranchView { branch, cars }
            })
            .collect()
    }
}

impl CustomerView {
    /// Attaches each rental to its customer.
    pub fn assemble(customers: Vec<Customer>, rentals: Vec<Rental>) -> Vec<CustomerView> {
        let mut by_customer = group_by(rentals, |r| r.customer_id);
        customers
            .into_iter()
            .map(|customer| {
                let rentals = by_customer.remove(&customer.id).unwrap_or_default();
                CustomerView { customer, rentals }
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
