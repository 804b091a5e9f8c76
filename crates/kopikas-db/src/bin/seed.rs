//! # Seed Data Generator
//!
//! Populates the database with sample payments for development.
//!
//! ## Usage
//! ```bash
//! # Generate 60 payments for owner 1 (defaults)
//! cargo run -p kopikas-db --bin seed
//!
//! # Generate custom amount for another owner
//! cargo run -p kopikas-db --bin seed -- --count 200 --owner 3
//!
//! # Specify database path
//! cargo run -p kopikas-db --bin seed -- --db ./data/kopikas.db
//! ```
//!
//! ## Generated Payments
//! Spreads transactions over the trailing twelve months so every dashboard
//! view has something to show:
//! - Both canonical coffee types plus the occasional off-list label
//! - Weights between 0.5 and 10 kg
//! - Prices proportional to weight with per-type rates

use chrono::{Days, Utc};
use std::env;

use kopikas_core::{PaymentFields, Rupiah};
use kopikas_db::{Database, DbConfig};

/// Coffee types with a per-kg rate in rupiah.
/// The off-list "Kopi Luwak" exercises the uncategorized path on purpose.
const COFFEE_TYPES: &[(&str, i64)] = &[
    ("Kopi Bubuk", 130_000),
    ("Kopi Bijian", 110_000),
    ("Kopi Bubuk", 130_000),
    ("Kopi Bijian", 110_000),
    ("Kopi Luwak", 750_000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 60;
    let mut owner_id: i64 = 1;
    let mut db_path = String::from("./kopikas_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--owner" | "-o" => {
                if i + 1 < args.len() {
                    owner_id = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kopikas Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of payments to generate (default: 60)");
                println!("  -o, --owner <ID>   Owner id to attach payments to (default: 1)");
                println!("  -d, --db <PATH>    Database file path (default: ./kopikas_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kopikas Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Owner:    {}", owner_id);
    println!("Payments: {}", count);
    println!();

    // Connect to database (runs migrations)
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing payments for this owner
    let existing = db.payments().count(owner_id).await?;
    if existing > 0 {
        println!("⚠ Owner {} already has {} payments", owner_id, existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating payments...");

    let today = Utc::now().date_naive();
    let repo = db.payments();
    let mut generated = 0;
    let start = std::time::Instant::now();

    for seq in 0..count {
        let fields = generate_payment(seq, count, today);

        if let Err(e) = repo.insert(owner_id, &fields, None).await {
            eprintln!("Failed to insert payment {}: {}", seq, e);
            continue;
        }

        generated += 1;

        if generated % 50 == 0 {
            println!("  Generated {} payments...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} payments in {:?}", generated, elapsed);

    // Quick sanity read-back, newest first
    let all = repo.find_all(owner_id).await?;
    if let Some(latest) = all.first() {
        println!(
            "  Latest: {} {} {}kg {}",
            latest.date, latest.coffee_type, latest.weight_kg, latest.total_price
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single payment with plausible data.
///
/// Dates walk backwards from today so the sample covers roughly a year and
/// the growth windows are never empty.
fn generate_payment(seq: usize, count: usize, today: chrono::NaiveDate) -> PaymentFields {
    // Spread `count` payments over ~360 days, newest first
    let spread_days = 360 * seq / count.max(1);
    let date = today
        .checked_sub_days(Days::new(spread_days as u64))
        .unwrap_or(today);

    let (coffee_type, rate) = COFFEE_TYPES[seq % COFFEE_TYPES.len()];

    // Weights cycle through 0.5 .. 10.0 kg in half-kilo steps
    let weight_kg = 0.5 + (seq * 7 % 20) as f64 * 0.5;
    let total_price = Rupiah::new((weight_kg * rate as f64) as i64);

    PaymentFields {
        date,
        coffee_type: coffee_type.to_string(),
        weight_kg,
        total_price,
    }
}
