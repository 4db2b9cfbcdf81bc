//! roads — run national-road-map commands from a file or standard input.
//!
//! ```text
//! roads [--roads network.csv] [--max-route-id N] [--verbose] [INPUT]
//! ```
//!
//! Descriptions are printed on stdout, `ERROR <line>` on stderr.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use nr_cli::Session;
use nr_core::MapConfig;
use nr_routes::RoadMap;

#[derive(Parser, Debug)]
#[command(name = "roads", version, about = "National road map command interpreter")]
struct Args {
    /// Command file; standard input when omitted.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// CSV file of `city_a,city_b,length,year` roads loaded before any command.
    #[arg(long, value_name = "CSV")]
    roads: Option<PathBuf>,

    /// Highest valid route number.
    #[arg(long, default_value_t = MapConfig::DEFAULT_MAX_ROUTE_ID)]
    max_route_id: u32,

    /// Log every change to the map (same as RUST_LOG=debug).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = MapConfig { max_route_id: args.max_route_id, ..MapConfig::default() };
    let mut map = RoadMap::with_config(config);

    if let Some(path) = &args.roads {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let added = map
            .load_roads(BufReader::new(file))
            .with_context(|| format!("loading roads from {}", path.display()))?;
        info!("loaded {added} roads from {}", path.display());
    }

    let mut session = Session::new(map);
    let stdout = io::stdout().lock();
    let stderr = io::stderr().lock();
    match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            session.run(BufReader::new(file), stdout, stderr)?
        }
        None => session.run(io::stdin().lock(), stdout, stderr)?,
    };
    Ok(())
}
