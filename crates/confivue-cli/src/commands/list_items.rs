//! The `confivue list-items` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use confivue_core::{load_catalog, AgeBand};

pub fn execute(catalog_path: PathBuf, age_band: Option<AgeBand>, domain: Option<String>) -> Result<()> {
    let catalog = load_catalog(&catalog_path)?;
    let items = catalog.filter(age_band, domain.as_deref());

    if items.is_empty() {
        println!("No matching items.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Age band", "Domain", "Format", "Stem"]);
    for item in &items {
        table.add_row(vec![
            Cell::new(&item.id),
            Cell::new(item.age_band),
            Cell::new(&item.domain),
            Cell::new(item.format),
            Cell::new(&item.stem),
        ]);
    }

    println!("{table}");
    println!("{} item(s)", items.len());

    Ok(())
}
