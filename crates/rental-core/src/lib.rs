//! # rental-core: Domain Types for the Car Rental API
//!
//! This crate holds the entities of the rental business (branches, cars,
//! customers, rentals), the payloads clients send to create or change them,
//! and the nested views the API returns. Everything here is pure: no
//! database, no network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Car Rental Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    rental-api (axum)                            │   │
//! │  │    /api/branches  /api/cars  /api/customers  /api/rentals       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rental-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  payload  │  │validation │                  │   │
//! │  │   │  Branch   │  │BranchDraft│  │ require   │                  │   │
//! │  │   │  CarView  │  │CarChanges │  │parse_date │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rental-db (SQLite, FK enforced)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use rental_core::payload::BranchDraft;
//!
//! let draft = BranchDraft {
//!     name: Some("Downtown".to_string()),
//!     location: None,
//! };
//!
//! // `location` is missing, so the draft is rejected
//! let err = draft.validate().unwrap_err();
//! assert_eq!(err.to_string(), "Missing required field: location.");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod payload;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use payload::*;
pub use types::*;

/// Wire format of rental dates (`2024-06-01`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
