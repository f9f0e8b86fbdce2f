//! # Request Payloads
//!
//! What clients send to create or change entities.
//!
//! ## Two Shapes Per Entity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/cars            PUT /api/cars/{id}                           │
//! │       │                          │                                      │
//! │       ▼                          ▼                                      │
//! │  CarDraft (all Option)      CarChanges (all Option)                     │
//! │       │ validate()               │ apply(&mut Car)                      │
//! │       ▼                          ▼                                      │
//! │  NewCar (all required)      Car (present keys replaced)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Drafts deserialize every key as optional so a missing key surfaces as a
//! [`ValidationError::Required`] naming the field instead of a generic
//! deserialization failure. A `null` value is treated the same as an absent
//! key. Unknown keys are ignored.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::types::{Branch, Car, Customer, EntityId, Rental};
use crate::validation::{parse_date, require, require_date, ValidationResult};

// =============================================================================
// Branch
// =============================================================================

/// Body of `POST /api/branches`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchDraft {
    pub name: Option<String>,
    pub location: Option<String>,
}

/// A validated branch ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBranch {
    pub name: String,
    pub location: String,
}

impl BranchDraft {
    pub fn validate(self) -> ValidationResult<NewBranch> {
        Ok(NewBranch {
            name: require(self.name, "name")?,
            location: require(self.location, "location")?,
        })
    }
}

/// Body of `PUT /api/branches/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchChanges {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl BranchChanges {
    pub fn apply(self, branch: &mut Branch) {
        if let Some(name) = self.name {
            branch.name = name;
        }
        if let Some(location) = self.location {
            branch.location = location;
        }
    }
}

// =============================================================================
// Car
// =============================================================================

/// Body of `POST /api/cars`.
///
/// `availability` is not accepted on create: new cars are always available.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarDraft {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub rental_rate: Option<f64>,
    pub branch_id: Option<EntityId>,
}

/// A validated car ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub rental_rate: f64,
    pub availability: bool,
    pub branch_id: EntityId,
}

impl CarDraft {
    pub fn validate(self) -> ValidationResult<NewCar> {
        Ok(NewCar {
            make: require(self.make, "make")?,
            model: require(self.model, "model")?,
            year: require(self.year, "year")?,
            rental_rate: require(self.rental_rate, "rental_rate")?,
            availability: true,
            branch_id: require(self.branch_id, "branch_id")?,
        })
    }
}

/// Body of `PUT /api/cars/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarChanges {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub rental_rate: Option<f64>,
    pub availability: Option<bool>,
    pub branch_id: Option<EntityId>,
}

impl CarChanges {
    pub fn apply(self, car: &mut Car) {
        if let Some(make) = self.make {
            car.make = make;
        }
        if let Some(model) = self.model {
            car.model = model;
        }
        if let Some(year) = self.year {
            car.year = year;
        }
        if let Some(rate) = self.rental_rate {
            car.rental_rate = rate;
        }
        if let Some(availability) = self.availability {
            car.availability = availability;
        }
        if let Some(branch_id) = self.branch_id {
            car.branch_id = branch_id;
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Body of `POST /api/customers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A validated customer ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerDraft {
    pub fn validate(self) -> ValidationResult<NewCustomer> {
        Ok(NewCustomer {
            name: require(self.name, "name")?,
            email: require(self.email, "email")?,
            phone: require(self.phone, "phone")?,
        })
    }
}

/// Body of `PUT /api/customers/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerChanges {
    pub fn apply(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
    }
}

// =============================================================================
// Rental
// =============================================================================

/// Body of `POST /api/rentals`. Dates are `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentalDraft {
    pub car_id: Option<EntityId>,
    pub customer_id: Option<EntityId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A validated rental ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRental {
    pub car_id: EntityId,
    pub customer_id: EntityId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RentalDraft {
    pub fn validate(self) -> ValidationResult<NewRental> {
        Ok(NewRental {
            car_id: require(self.car_id, "car_id")?,
            customer_id: require(self.customer_id, "customer_id")?,
            start_date: require_date(self.start_date, "start_date")?,
            end_date: require_date(self.end_date, "end_date")?,
        })
    }
}

/// Body of `PUT /api/rentals/{id}`.
///
/// Only the dates can change; a rental is never moved to another car or
/// customer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentalChanges {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RentalChanges {
    /// Applies the changes. Both dates are parsed before either is written,
    /// so a bad `end_date` leaves the rental untouched.
    pub fn apply(self, rental: &mut Rental) -> Result<(), ValidationError> {
        let start = self
            .start_date
            .map(|raw| parse_date(&raw, "start_date"))
            .transpose()?;
        let end = self
            .end_date
            .map(|raw| parse_date(&raw, "end_date"))
            .transpose()?;

        if let Some(start) = start {
            rental.start_date = start;
        }
        if let Some(end) = end {
            rental.end_date = end;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_draft_requires_every_key() {
        let draft: CarDraft = serde_json::from_str(
            r#"{"make": "Honda", "model": "Civic", "year": 2020, "rental_rate": 39.99}"#,
        )
        .unwrap();
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::required("branch_id")
        );
    }

    #[test]
    fn test_car_draft_forces_availability() {
        let draft: CarDraft = serde_json::from_str(
            r#"{"make": "Honda", "model": "Civic", "year": 2020, "rental_rate": 39.99,
                "branch_id": 4, "availability": false}"#,
        )
        .unwrap();
        let car = draft.validate().unwrap();
        assert!(car.availability);
        assert_eq!(car.branch_id, 4);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let draft: CustomerDraft =
            serde_json::from_str(r#"{"name": "Ada", "email": null, "phone": "1"}"#).unwrap();
        assert_eq!(draft.validate().unwrap_err(), ValidationError::required("email"));
    }

    #[test]
    fn test_branch_changes_are_partial() {
        let mut branch = Branch {
            id: 1,
            name: "Old".to_string(),
            location: "Somewhere".to_string(),
        };
        let changes: BranchChanges = serde_json::from_str(r#"{"name": "New"}"#).unwrap();
        changes.apply(&mut branch);

        assert_eq!(branch.name, "New");
        assert_eq!(branch.location, "Somewhere");
    }

    #[test]
    fn test_rental_draft_parses_dates() {
        let draft = RentalDraft {
            car_id: Some(1),
            customer_id: Some(2),
            start_date: Some("2024-07-01".to_string()),
            end_date: Some("2024-07-03".to_string()),
        };
        let rental = draft.validate().unwrap();
        assert_eq!(rental.start_date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }

    #[test]
    fn test_rental_changes_reject_bad_date_without_partial_write() {
        let original = Rental {
            id: 1,
            car_id: 1,
            customer_id: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        };
        let mut rental = original.clone();
        let changes = RentalChanges {
            start_date: Some("2024-02-01".to_string()),
            end_date: Some("not-a-date".to_string()),
        };

        assert!(changes.apply(&mut rental).is_err());
        assert_eq!(rental, original);
    }
}
