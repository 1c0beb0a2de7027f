//! confivue CLI — serve the assessment API and work with item catalogs.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use confivue_core::{AgeBand, Mode};

mod commands;

#[derive(Parser)]
#[command(name = "confivue", version, about = "Adaptive assessment API server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Item catalog JSON file (overrides config)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Fixed seed for item selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate an item catalog file
    Validate {
        /// Path to the catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Per-session item cap used for pool-size warnings
        #[arg(long, default_value = "8")]
        max_items: usize,
    },

    /// List catalog items
    ListItems {
        /// Path to the catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Only items for this age band (7-10, 11-13, 14-19)
        #[arg(long)]
        age_band: Option<AgeBand>,

        /// Only items in this domain (case-insensitive)
        #[arg(long)]
        domain: Option<String>,
    },

    /// Run one assessment in-process and print the trace and report
    Simulate {
        /// Path to the catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Age band of the simulated client
        #[arg(long)]
        age_band: AgeBand,

        /// Assessment mode: baseline, mid, post
        #[arg(long, default_value = "baseline")]
        mode: Mode,

        /// Fixed seed for item selection
        #[arg(long)]
        seed: Option<u64>,

        /// Category given to every item (0-4)
        #[arg(long, default_value = "2", conflicts_with = "answers")]
        category: u8,

        /// Comma-separated categories, one per item; the last one repeats
        #[arg(long)]
        answers: Option<String>,

        /// Print the final report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create starter config and seed catalog
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "confivue=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            catalog,
            seed,
        } => commands::serve::execute(config, host, port, catalog, seed).await,
        Commands::Validate { catalog, max_items } => {
            commands::validate::execute(catalog, max_items)
        }
        Commands::ListItems {
            catalog,
            age_band,
            domain,
        } => commands::list_items::execute(catalog, age_band, domain),
        Commands::Simulate {
            catalog,
            age_band,
            mode,
            seed,
            category,
            answers,
            json,
        } => {
            commands::simulate::execute(catalog, age_band, mode, seed, category, answers, json)
                .await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
