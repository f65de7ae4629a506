//! Records and sequences as nested tags.
//!
//! Run with: cargo run --example xml_records

use serde::{Deserialize, Serialize};
use serde_csvxml::{xml, XmlOptions};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Book {
    title: String,
    author: String,
    year: u16,
    available: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Shelf {
    name: String,
    books: Vec<Book>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let books = vec![
        Book {
            title: "The Rust Programming Language".to_string(),
            author: "Klabnik, Nichols".to_string(),
            year: 2018,
            available: true,
        },
        Book {
            title: "Programming Rust".to_string(),
            author: "Blandy, Orendorff".to_string(),
            year: 2017,
            available: false,
        },
    ];

    let options = XmlOptions::new().with_root("library").with_item_tag("book");
    let text = xml::to_string_with_options(&books, &options)?;
    println!("XML output:\n{}\n", text);

    let back: Vec<Book> = xml::from_str_with_options(&text, &options)?;
    assert_eq!(books, back);
    println!("✓ Round-trip successful");

    // A record field may hold a whole sequence of records
    let shelf = Shelf {
        name: "Systems".to_string(),
        books,
    };
    let options = XmlOptions::new().with_root("shelf").with_item_tag("book");
    let text = xml::to_string_with_options(&shelf, &options)?;
    println!("\nNested output:\n{}\n", text);

    let back: Shelf = xml::from_str_with_options(&text, &options)?;
    assert_eq!(shelf, back);
    println!("✓ Nested round-trip successful");

    Ok(())
}
