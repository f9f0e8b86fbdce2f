//! # Repository Module
//!
//! Database repository implementations, one per entity.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │  db.cars().get_view(7)                                         │
//! │       ▼                                                                 │
//! │  CarRepository                                                         │
//! │  ├── list_views / get_view   → nested JSON-ready views                 │
//! │  ├── get_by_id               → flat row (for updates)                  │
//! │  ├── insert / update         → FK checked by SQLite                    │
//! │  └── delete                  → fails while dependents exist            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nested views load each table with one query and are stitched together by
//! the `assemble` functions in `rental-core`.
//!
//! ## Available Repositories
//!
//! - [`BranchRepository`](branch::BranchRepository)
//! - [`CarRepository`](car::CarRepository)
//! - [`CustomerRepository`](customer::CustomerRepository)
//! - [`RentalRepository`](rental::RentalRepository)

pub mod branch;
pub mod car;
pub mod customer;
pub mod rental;

/// Column list shared by every rental query.
pub(crate) const RENTAL_COLUMNS: &str = "id, car_id, customer_id, start_date, end_date";

/// Column list shared by every car query.
pub(crate) const CAR_COLUMNS: &str = "id, make, model, year, rental_rate, availability, branch_id";
