//! # Seed Data Generator
//!
//! Populates a storage document with sample companies and offers for
//! development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 companies (default)
//! cargo run -p ritmo-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p ritmo-store --bin seed -- --count 200
//!
//! # Specify storage path
//! cargo run -p ritmo-store --bin seed -- --storage ./data/storage.json
//! ```
//!
//! ## Generated Data
//! - Company names from a fixed list, suffixed when the list runs out
//! - Fiscal IDs: `B{INDEX:08}`
//! - Two out of three companies get an offer
//! - Offer statuses rotate through every status, amounts vary with the index

use std::env;

use ritmo_core::{CompanyFields, Money, NewOffer, OfferStatus};
use ritmo_store::{Store, StoreConfig};

/// Base names for generated companies
const COMPANY_NAMES: &[&str] = &[
    "Acme",
    "Globex",
    "Initech",
    "Umbrella",
    "Hooli",
    "Stark Industries",
    "Wayne Enterprises",
    "Wonka Chocolates",
    "Tyrell",
    "Cyberdyne",
    "Soylent",
    "Aperture Labs",
];

/// (region, city) pairs
const LOCATIONS: &[(&str, &str)] = &[
    ("Madrid", "Madrid"),
    ("Catalonia", "Barcelona"),
    ("Valencia", "Valencia"),
    ("Andalusia", "Seville"),
    ("Basque Country", "Bilbao"),
];

/// Statuses assigned after creation, in rotation
const STATUSES: &[OfferStatus] = &[
    OfferStatus::Pending,
    OfferStatus::PreApproved,
    OfferStatus::Approved,
    OfferStatus::Rejected,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut storage_path = String::from("./storage/storage.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--storage" | "-s" => {
                if i + 1 < args.len() {
                    storage_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Ritmo Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>       Number of companies to generate (default: 50)");
                println!("  -s, --storage <PATH>  Storage file path (default: ./storage/storage.json)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ritmo Seed Data Generator");
    println!("============================");
    println!("Storage:   {}", storage_path);
    println!("Companies: {}", count);
    println!();

    let store = Store::open(StoreConfig::new(&storage_path).create_if_missing(true)).await?;
    println!("✓ Storage document opened");

    let existing = store.companies().count().await;
    if existing > 0 {
        println!("⚠ Storage already has {} companies", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the storage file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating companies and offers...");

    let start = std::time::Instant::now();
    let mut offers = 0;

    for seed in 0..count {
        let company = store.companies().create(generate_company(seed)).await?;

        if seed % 3 == 2 {
            continue;
        }

        let offer = store.offers().create(generate_offer(&company.id, seed)).await?;
        let status = STATUSES[seed % STATUSES.len()];
        if status.is_settable() {
            store.offers().update_status(&offer.id, status).await?;
        }
        if status == OfferStatus::Approved && seed % 2 == 0 {
            store.offers().set_accepted(&offer.id, true).await?;
        }
        offers += 1;

        if (seed + 1) % 25 == 0 {
            println!("  Generated {} companies...", seed + 1);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} companies and {} offers in {:?}",
        count, offers, elapsed
    );

    store.close().await?;
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates the fields of a single company.
fn generate_company(seed: usize) -> CompanyFields {
    let base = COMPANY_NAMES[seed % COMPANY_NAMES.len()];
    let round = seed / COMPANY_NAMES.len();
    let name = if round == 0 {
        base.to_string()
    } else {
        format!("{} {}", base, round + 1)
    };

    let (region, city) = LOCATIONS[seed % LOCATIONS.len()];

    CompanyFields {
        name,
        fiscal_id: format!("B{:08}", seed),
        address: format!("Calle Mayor {}", seed % 200 + 1),
        address_line_two: if seed % 4 == 0 {
            format!("Planta {}", seed % 9 + 1)
        } else {
            String::new()
        },
        region: region.to_string(),
        city: city.to_string(),
    }
}

/// Generates a new offer for `company_id`.
fn generate_offer(company_id: &str, seed: usize) -> NewOffer {
    // Advance: 1,000.00 - 50,950.00 in steps of 50.00
    let advance = Money::from_cents(100_000 + ((seed * 37) % 1000) as i64 * 5_000);

    // Refund is 0-30% of the advance
    let refund = Money::from_cents(advance.cents() * ((seed % 4) as i64 * 10) / 100);

    NewOffer {
        company_id: company_id.to_string(),
        charges: 3 + (seed % 10) as i64,
        sales_percentage: 5 + (seed % 16) as i64,
        advance,
        refund,
    }
}
