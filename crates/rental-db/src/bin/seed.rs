//! # Seed Data Generator
//!
//! Populates a database with sample branches, cars, customers and rentals
//! for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./rental.db
//! cargo run -p rental-db --bin seed
//!
//! # Specify database path
//! cargo run -p rental-db --bin seed -- --db ./data/rental.db
//! ```

use std::env;

use chrono::{Duration, NaiveDate};
use rental_core::{NewBranch, NewCar, NewCustomer, NewRental};
use rental_db::{Database, DbConfig};

/// (name, location)
const BRANCHES: &[(&str, &str)] = &[
    ("Downtown", "12 Market Street"),
    ("Airport", "Terminal 2 Arrivals Hall"),
    ("Harbour", "4 Pier Road"),
];

/// (make, model, year, daily rate)
const CARS: &[(&str, &str, i32, f64)] = &[
    ("Toyota", "Corolla", 2021, 42.0),
    ("Honda", "Civic", 2022, 45.5),
    ("Volkswagen", "Golf", 2020, 39.9),
    ("Ford", "Focus", 2019, 35.0),
    ("Tesla", "Model 3", 2023, 89.0),
    ("BMW", "3 Series", 2022, 79.0),
    ("Kia", "Sportage", 2021, 55.0),
    ("Hyundai", "Tucson", 2023, 58.0),
    ("Mazda", "CX-5", 2020, 52.5),
];

/// (name, email, phone)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Ada Lovelace", "ada@example.com", "+44 20 7946 0001"),
    ("Grace Hopper", "grace@example.com", "+1 202 555 0102"),
    ("Alan Turing", "alan@example.com", "+44 20 7946 0003"),
    ("Katherine Johnson", "katherine@example.com", "+1 757 555 0104"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./rental.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Car Rental Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./rental.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Car Rental Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if !db.is_empty().await? {
        println!("⚠ Database already has data");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Call GET /api/reset-db or delete the file to regenerate.");
        return Ok(());
    }

    let mut branch_ids = Vec::with_capacity(BRANCHES.len());
    for (name, location) in BRANCHES {
        let branch = db
            .branches()
            .insert(&NewBranch {
                name: name.to_string(),
                location: location.to_string(),
            })
            .await?;
        branch_ids.push(branch.id);
    }
    println!("✓ {} branches", branch_ids.len());

    let mut car_ids = Vec::with_capacity(CARS.len());
    for (idx, (make, model, year, rate)) in CARS.iter().enumerate() {
        let car = db
            .cars()
            .insert(&NewCar {
                make: make.to_string(),
                model: model.to_string(),
                year: *year,
                rental_rate: *rate,
                availability: true,
                branch_id: branch_ids[idx % branch_ids.len()],
            })
            .await?;
        car_ids.push(car.id);
    }
    println!("✓ {} cars", car_ids.len());

    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for (name, email, phone) in CUSTOMERS {
        let customer = db
            .customers()
            .insert(&NewCustomer {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
            })
            .await?;
        customer_ids.push(customer.id);
    }
    println!("✓ {} customers", customer_ids.len());

    // One rental per customer, staggered a week apart
    let first_day = NaiveDate::from_ymd_opt(2024, 6, 1).ok_or("invalid seed date")?;
    for (idx, customer_id) in customer_ids.iter().enumerate() {
        let start_date = first_day + Duration::days(7 * idx as i64);
        db.rentals()
            .insert(&NewRental {
                car_id: car_ids[idx % car_ids.len()],
                customer_id: *customer_id,
                start_date,
                end_date: start_date + Duration::days(3),
            })
            .await?;
    }
    println!("✓ {} rentals", db.rentals().count().await?);

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
