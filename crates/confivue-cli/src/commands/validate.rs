//! The `confivue validate` command.

use std::path::PathBuf;

use anyhow::Result;

use confivue_core::catalog::{load_catalog, validate_catalog};
use confivue_core::AgeBand;

pub fn execute(catalog_path: PathBuf, max_items: usize) -> Result<()> {
    let catalog = load_catalog(&catalog_path)?;

    println!("Catalog: {} ({} items)", catalog_path.display(), catalog.len());
    for band in AgeBand::ALL {
        let count = catalog.filter(Some(band), None).len();
        println!("  {band}: {count} items");
    }

    let warnings = validate_catalog(&catalog, max_items);
    for w in &warnings {
        let prefix = w
            .item_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
