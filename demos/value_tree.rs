//! Moving untyped data between the two formats.
//!
//! Run with: cargo run --example value_tree

use serde_csvxml::{csv, value, xml, Value, XmlOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Build rows dynamically with the value! macro
    let rows = value!([
        { "host": "alpha", "port": 8080, "secure": true },
        { "host": "beta", "port": 8443, "secure": false }
    ]);

    let text = csv::to_string_with_keys(&rows, ["host", "port", "secure"])?;
    println!("As CSV:\n{}\n", text);

    // A table decodes to a sequence of records of untyped text
    let table: Value = csv::from_str(&text)?;
    assert_eq!(table, rows);

    if let Some(first) = table.get_index(0) {
        let port = first.get("port").and_then(Value::parse::<u16>);
        println!("First port: {:?}", port);
    }

    let options = XmlOptions::new().with_root("servers").with_item_tag("server");
    let tagged = xml::to_string_with_options(&table, &options)?;
    println!("\nAs XML:\n{}\n", tagged);

    let back: Value = xml::from_str_with_options(&tagged, &options)?;
    assert_eq!(back, rows);
    println!("✓ CSV → Value → XML → Value round-trip successful");

    Ok(())
}
