//! The `confivue init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("confivue.toml").exists() {
        println!("confivue.toml already exists, skipping.");
    } else {
        std::fs::write("confivue.toml", SAMPLE_CONFIG)?;
        println!("Created confivue.toml");
    }

    std::fs::create_dir_all("data")?;
    let catalog_path = Path::new("data/items_seed.json");
    if catalog_path.exists() {
        println!("data/items_seed.json already exists, skipping.");
    } else {
        std::fs::write(catalog_path, SEED_CATALOG)?;
        println!("Created data/items_seed.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: confivue validate --catalog data/items_seed.json");
    println!("  2. Run: confivue serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# confivue configuration

host = "0.0.0.0"
port = 8000
catalog_path = "data/items_seed.json"

# Items presented per assessment, and the sem at which an assessment stops
max_items = 8
sem_stop_threshold = 0.35

# Uncomment for reproducible item selection
# seed = 42
"#;

const SEED_CATALOG: &str = include_str!("../../../../data/items_seed.json");
