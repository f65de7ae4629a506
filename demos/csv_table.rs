//! Tables with a header row.
//!
//! Run with: cargo run --example csv_table

use serde::{Deserialize, Serialize};
use serde_csvxml::{csv, CsvOptions, HeaderMode};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Employee {
    id: u32,
    name: String,
    department: String,
    salary: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let employees = vec![
        Employee {
            id: 1,
            name: "Alice Johnson".to_string(),
            department: "Research, Development".to_string(),
            salary: 98000.0,
        },
        Employee {
            id: 2,
            name: "Bob \"Bobby\" Smith".to_string(),
            department: "Sales".to_string(),
            salary: 72500.5,
        },
    ];

    // The KeySet fixes column order and becomes the header row
    let keys = ["id", "name", "department", "salary"];
    let text = csv::to_string_with_keys(&employees, keys)?;
    println!("CSV output:\n{}\n", text);

    // The header row supplies the keys on the way back
    let back: Vec<Employee> = csv::from_str(&text)?;
    assert_eq!(employees, back);
    println!("✓ Round-trip successful");

    // Without a header row the keys must be supplied
    let options = CsvOptions::new()
        .with_keys(keys)
        .with_header(HeaderMode::Absent);
    let body = csv::to_string_with_options(&employees, &options)?;
    println!("\nWithout header:\n{}\n", body);

    let back: Vec<Employee> = csv::from_str_with_options(&body, &options)?;
    assert_eq!(employees, back);
    println!("✓ Headerless round-trip successful");

    Ok(())
}
