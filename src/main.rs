use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};

use sdnwatch::environment::get_env_var_or;
use sdnwatch::fetch::fetch_document;
use sdnwatch::logging::configure_logging;
use sdnwatch::sdn::{extract_addresses, SchemaProfile, ADVANCED_PROFILE, BASIC_PROFILE};
use sdnwatch::snapshot::{write_snapshot, Snapshot};
use sdnwatch::TARGET_EXTRACT;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Basic,
    Advanced,
}

#[derive(Parser)]
#[command(
    name = "sdnwatch",
    about = "Fetches the OFAC SDN list and writes a JSON snapshot of sanctioned cryptocurrency addresses"
)]
struct Cli {
    /// Which source schema to target
    #[arg(long, value_enum, default_value = "basic")]
    source: SourceArg,

    /// Where to write the snapshot
    #[arg(long, default_value = "sanctioned_addresses.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let cli = Cli::parse();
    let profile: &SchemaProfile = match cli.source {
        SourceArg::Basic => &BASIC_PROFILE,
        SourceArg::Advanced => &ADVANCED_PROFILE,
    };
    let url = get_env_var_or("SDN_LIST_URL", profile.default_url);

    info!("Fetching {} from {}", profile.label, url);
    let text = fetch_document(&url).await?;

    let outcome = extract_addresses(&text, profile)?;

    for diagnostic in &outcome.diagnostics {
        warn!(
            target: TARGET_EXTRACT,
            "Entity {} (uid {:?}): {}",
            diagnostic.entity_index,
            diagnostic.entity_uid,
            diagnostic.message
        );
    }

    info!(
        target: TARGET_EXTRACT,
        "Processed {} entities ({} skipped): {} candidates, {} accepted, {} unique addresses",
        outcome.counters.entities_processed,
        outcome.counters.entities_skipped,
        outcome.counters.candidates_seen,
        outcome.counters.addresses_accepted,
        outcome.counters.unique_addresses
    );

    let snapshot = Snapshot::new(profile.label, &url, outcome.addresses);
    write_snapshot(&snapshot, &cli.output)?;

    Ok(())
}
