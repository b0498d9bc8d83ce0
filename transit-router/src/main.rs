use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use transit_router::snapshot::{load_router, save_router};
use transit_router::transit::{CatalogueData, QueryError, TransitRouter};

/// Fastest bus itineraries between stops.
#[derive(Debug, Parser)]
#[command(version, about)]
struct TransitApp {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a router from a catalogue file and save its snapshot
    MakeBase {
        /// Catalogue JSON with `routing_settings` and `base_requests`
        catalogue: PathBuf,
        /// Where to write the snapshot
        snapshot: PathBuf,
    },
    /// Print the fastest itinerary between two stops as JSON
    Route {
        /// Snapshot written by `make-base`
        snapshot: PathBuf,
        from: String,
        to: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so route output on stdout stays parseable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = TransitApp::parse();
    match app.command {
        Command::MakeBase {
            catalogue,
            snapshot,
        } => make_base(&catalogue, &snapshot),
        Command::Route { snapshot, from, to } => {
            let router = load_router(&snapshot)
                .with_context(|| format!("failed to load snapshot {}", snapshot.display()))?;
            println!("{}", route_output(&router, &from, &to)?);
            Ok(())
        }
    }
}

fn make_base(catalogue_path: &Path, snapshot_path: &Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(catalogue_path)
        .with_context(|| format!("failed to read {}", catalogue_path.display()))?;
    let data = CatalogueData::from_json(&json)
        .with_context(|| format!("failed to parse {}", catalogue_path.display()))?;
    let catalogue = data.to_catalogue();

    let router = TransitRouter::build(&catalogue, data.routing_settings)
        .context("failed to build router")?;
    if router.layout().stops().is_empty() {
        warn!(path = %catalogue_path.display(), "Catalogue has no stops");
    }
    save_router(&router, snapshot_path)
        .with_context(|| format!("failed to save snapshot {}", snapshot_path.display()))?;

    println!(
        "Saved {} stops and {} buses to {}",
        catalogue.stop_count(),
        catalogue.bus_count(),
        snapshot_path.display()
    );
    Ok(())
}

/// Itinerary JSON for `from -> to`, or the "not found" response when the
/// stops aren't connected or either one doesn't exist.
fn route_output(router: &TransitRouter, from: &str, to: &str) -> anyhow::Result<String> {
    let itinerary = match router.route(from, to) {
        Ok(Some(itinerary)) => itinerary,
        Ok(None) | Err(QueryError::UnknownStop(_)) => {
            return Ok(serde_json::json!({ "error_message": "not found" }).to_string());
        }
        Err(e) => return Err(e).context("route query failed"),
    };
    Ok(serde_json::to_string_pretty(&itinerary)?)
}
