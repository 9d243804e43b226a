//! # Seed Data Generator
//!
//! Populates the database with sample books for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 books (default) into $DATABASE_URL
//! cargo run -p bookworm-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p bookworm-db --bin seed -- --count 1000
//! ```
//!
//! Each book gets a title from a fixed list, an author, a publisher, an
//! image path and one or two categories. Titles repeat with a volume suffix
//! once the list is exhausted.

use std::env;

use bookworm_core::{Book, Category, NewBook, Validator};
use bookworm_db::{BookRepo, Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const TITLES: &[&str] = &[
    "The Sealed Nectar",
    "Riyad as-Salihin",
    "Fortress of the Muslim",
    "In the Footsteps of the Prophet",
    "The Book of Assistance",
    "Purification of the Heart",
    "Islam and the Destiny of Man",
    "The Vision of Islam",
    "Muhammad: His Life Based on the Earliest Sources",
    "The Study Quran",
    "Christianity and Islam in Dialogue",
    "The World's Religions",
    "A History of God",
    "Comparative Religion: A History",
    "The Meaning and End of Religion",
    "Patterns in Comparative Religion",
];

const AUTHORS: &[&str] = &[
    "Safiur Rahman Mubarakpuri",
    "Imam Nawawi",
    "Said bin Ali bin Wahaf Al-Qahtani",
    "Tariq Ramadan",
    "Abdallah ibn Alawi al-Haddad",
    "Hamza Yusuf",
    "Martin Lings",
    "Huston Smith",
    "Karen Armstrong",
    "Eric Sharpe",
];

const PUBLISHERS: &[&str] = &[
    "Darussalam",
    "Islamic Texts Society",
    "Oxford University Press",
    "HarperOne",
    "Fortress Press",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut count: usize = 100;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(count);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bookworm Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of books to generate (default: 100)");
                println!("  -h, --help         Show this help message");
                println!();
                println!("The target database is read from DATABASE_URL.");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = DbConfig::from_env()?;
    let db = Database::new(config).await?;
    let books = db.books();

    let existing = books.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has books, skipping seed");
        return Ok(());
    }

    info!(count, "Generating books");
    let start = std::time::Instant::now();
    let mut generated = 0usize;

    for seed in 0..count {
        let mut book = Book::from(generate_book(seed));

        let mut v = Validator::new();
        book.validate(&mut v);
        if let Err(errors) = v.finish() {
            warn!(seed, %errors, "Generated an invalid book");
            continue;
        }

        if let Err(e) = books.insert(&mut book).await {
            warn!(name = %book.name, error = %e, "Failed to insert book");
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            info!(generated, "Progress");
        }
    }

    info!(generated, elapsed = ?start.elapsed(), "Seed complete");
    db.close().await;

    Ok(())
}

/// Builds a deterministic sample book for `seed`.
fn generate_book(seed: usize) -> NewBook {
    let title = TITLES[seed % TITLES.len()];
    let volume = seed / TITLES.len();
    let name = if volume == 0 {
        title.to_string()
    } else {
        format!("{title}, Volume {}", volume + 1)
    };

    // Later titles in the list are comparative works.
    let mut categories = vec![if seed % TITLES.len() < 10 {
        Category::Islamic
    } else {
        Category::ComparativeReligion
    }];
    if seed % 7 == 0 {
        let other = match categories[0] {
            Category::Islamic => Category::ComparativeReligion,
            Category::ComparativeReligion => Category::Islamic,
        };
        categories.push(other);
    }

    NewBook {
        image: format!("images/books/{seed:05}.jpg"),
        cover_image: if seed % 3 == 0 {
            format!("images/covers/{seed:05}.jpg")
        } else {
            String::new()
        },
        name,
        author: AUTHORS[seed % AUTHORS.len()].to_string(),
        publisher: PUBLISHERS[seed % PUBLISHERS.len()].to_string(),
        categories: Some(categories),
    }
}
