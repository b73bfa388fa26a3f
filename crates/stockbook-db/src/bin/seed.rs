//! # Seed Data Generator
//!
//! Populates the database with sample products and sales for development.
//!
//! ## Usage
//! ```bash
//! # Seed with defaults
//! cargo run -p stockbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockbook-db --bin seed -- --db ./data/stockbook.db
//!
//! # Record more sales
//! cargo run -p stockbook-db --bin seed -- --sales 120
//! ```
//!
//! Products span every category with realistic buying/selling prices, and
//! sales are recorded through the real ledger path so stock levels and
//! profit snapshots line up the way production data would.

use std::env;

use stockbook_core::ProductCategory;
use stockbook_db::{Database, DbConfig, NewProduct, NewSale};

/// Sample catalogue: (name, category, buying cents, selling cents, stock).
const CATALOGUE: &[(&str, ProductCategory, i64, i64, i64)] = &[
    ("Laptop", ProductCategory::Electronics, 80000, 120000, 15),
    ("Wireless Mouse", ProductCategory::Electronics, 1500, 2999, 60),
    ("USB-C Cable", ProductCategory::Electronics, 300, 899, 120),
    ("Bluetooth Speaker", ProductCategory::Electronics, 4500, 7999, 25),
    ("T-Shirt", ProductCategory::Clothing, 600, 1499, 80),
    ("Hoodie", ProductCategory::Clothing, 1800, 3999, 40),
    ("Running Shoes", ProductCategory::Clothing, 3500, 6999, 30),
    ("Coffee Beans 1kg", ProductCategory::Food, 1200, 2199, 50),
    ("Green Tea Box", ProductCategory::Food, 400, 999, 90),
    ("Chocolate Bar", ProductCategory::Food, 120, 299, 200),
    ("Paperback Novel", ProductCategory::Books, 500, 1299, 45),
    ("Cookbook", ProductCategory::Books, 900, 2499, 20),
    ("Desk Lamp", ProductCategory::Home, 1100, 2499, 35),
    ("Plant Pot", ProductCategory::Home, 350, 899, 70),
    ("Yoga Mat", ProductCategory::Sports, 900, 1999, 40),
    ("Tennis Balls 3pk", ProductCategory::Sports, 350, 799, 65),
    ("Board Game", ProductCategory::Toys, 1400, 2999, 25),
    ("Puzzle 1000pc", ProductCategory::Toys, 700, 1599, 30),
    ("Face Cream", ProductCategory::Beauty, 800, 1899, 55),
    ("Shampoo", ProductCategory::Beauty, 300, 799, 85),
    ("Motor Oil 5L", ProductCategory::Automotive, 1800, 3299, 40),
    ("Wiper Blades", ProductCategory::Automotive, 600, 1499, 50),
    ("Gift Card Sleeve", ProductCategory::Other, 50, 199, 300),
];

const SUPPLIERS: &[&str] = &[
    "TechSource",
    "Northline Wholesale",
    "Acme Distribution",
    "Harbor Imports",
];

const CUSTOMERS: &[&str] = &["Ada Lovelace", "Grace Hopper", "Alan Turing", "Walk-in"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./stockbook_dev.db");
    let mut sale_count: usize = 40;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sale_count = args[i + 1].parse().unwrap_or(40);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("stockbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>     Database file path (default: ./stockbook_dev.db)");
                println!("  -s, --sales <N>     Number of sales to record (default: 40)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("stockbook Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {} products", existing);
        println!("Skipping seed to avoid duplicates.");
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    let clerk = db.users().insert("demo-clerk").await?;

    // Insert the catalogue.
    let mut product_ids = Vec::with_capacity(CATALOGUE.len());
    for (idx, (name, category, buying, selling, stock)) in CATALOGUE.iter().enumerate() {
        let product = db
            .products()
            .insert(&NewProduct {
                name: (*name).to_string(),
                category: *category,
                buying_price_cents: *buying,
                selling_price_cents: *selling,
                quantity: *stock,
                supplier: SUPPLIERS[idx % SUPPLIERS.len()].to_string(),
                added_by: Some(clerk.id.clone()),
            })
            .await?;
        product_ids.push(product.id);
    }
    println!("Inserted {} products", product_ids.len());

    // Record sales through the real ledger path so stock and snapshots are
    // consistent. Deterministic spread; no RNG needed for demo data.
    let mut recorded = 0;
    for n in 0..sale_count {
        let product_id = &product_ids[n % product_ids.len()];
        let quantity = (n % 3 + 1) as i64;

        let result = db
            .sales()
            .record_sale(&NewSale {
                product_id: product_id.clone(),
                quantity_sold: quantity,
                customer_name: Some(CUSTOMERS[n % CUSTOMERS.len()].to_string()),
                notes: None,
                sold_by: Some(clerk.id.clone()),
            })
            .await;

        match result {
            Ok(_) => recorded += 1,
            // A demo product ran dry; keep going with the rest.
            Err(stockbook_db::SaleError::InsufficientStock { .. }) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    println!("Recorded {} sales", recorded);

    let summary = db.reports().sales_summary(None, None).await?;
    println!();
    println!("Seed complete!");
    println!(
        "  Revenue {}  Profit {}  Transactions {}",
        summary.total_sales(),
        summary.total_profit(),
        summary.total_transactions
    );

    let low = db.products().list_low_stock().await?;
    if !low.is_empty() {
        println!("  Low stock items: {}", low.len());
    }

    Ok(())
}
