//! # Seed Data Generator
//!
//! Populates the database with sample handmade listings for development.
//!
//! ## Usage
//! ```bash
//! # Generate 20 products (default)
//! cargo run -p knitcraft-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p knitcraft-db --bin seed -- --count 50
//!
//! # Specify database path
//! cargo run -p knitcraft-db --bin seed -- --db ./data/knitcraft.db
//! ```
//!
//! Seeded listings have no image; the storefront shows them without one.

use std::env;
use std::time::Instant;

use knitcraft_core::{Category, NewProduct};
use knitcraft_db::{Database, DbConfig};

/// Sample item names per category.
const ITEMS: &[(Category, &[&str])] = &[
    (Category::Scarf, &["Chunky Scarf", "Infinity Scarf", "Lace Shawl", "Striped Muffler"]),
    (Category::Sweater, &["Cable Knit Sweater", "Baby Cardigan", "Fair Isle Pullover"]),
    (Category::Toy, &["Amigurumi Bunny", "Crochet Octopus", "Teddy Bear", "Tiny Whale"]),
    (Category::Accessory, &["Beanie", "Fingerless Gloves", "Tote Bag", "Hair Scrunchie"]),
    (Category::Other, &["Coaster Set", "Plant Hanger", "Granny Square Blanket"]),
];

const COLOURS: &[&str] = &["Blue", "Rose", "Mustard", "Sage", "Cream", "Charcoal"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut count: usize = 20;
    let mut db_path = String::from("./knitcraft_dev.db");

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--count" | "-c" => {
                if let Some(value) = args.next() {
                    count = value.parse().unwrap_or(count);
                }
            }
            "--db" | "-d" => {
                if let Some(value) = args.next() {
                    db_path = value;
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
    }

    println!("🧶 Seeding {} sample listings into {}", count, db_path);

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let products = db.products();
    let existing = products.count().await?;
    if existing > 0 {
        println!("Store already holds {} listings; nothing to do.", existing);
        println!("Remove {} to start over.", db_path);
        return Ok(());
    }

    let started = Instant::now();
    let mut inserted = 0;

    for n in 0..count {
        let listing = sample_listing(n);
        match products.insert(&listing).await {
            Ok(_) => inserted += 1,
            Err(e) => eprintln!("Skipped {}: {}", listing.name, e),
        }
    }

    println!("Inserted {} listings in {:?}", inserted, started.elapsed());

    db.close().await;
    Ok(())
}

fn print_usage() {
    println!("Usage: seed [--count N] [--db PATH]");
    println!();
    println!("  -c, --count <N>    listings to insert (default: 20)");
    println!("  -d, --db <PATH>    store file (default: ./knitcraft_dev.db)");
    println!("  -h, --help         print this message");
}

/// Builds a deterministic sample listing from a sequence number.
fn sample_listing(n: usize) -> NewProduct {
    let (category, names) = ITEMS[n % ITEMS.len()];
    let name = names[(n / ITEMS.len()) % names.len()];
    let colour = COLOURS[(n * 7) % COLOURS.len()];

    // 149.0 - 1499.0 in steps of 50
    let price = 149.0 + ((n * 13) % 28) as f64 * 50.0;

    NewProduct {
        name: format!("{} {}", colour, name),
        price,
        description: format!("Handmade {} {}.", colour.to_lowercase(), name.to_lowercase()),
        category: category.as_str().to_string(),
        image: None,
    }
}
