//! Snapshot serialization for completed runs.
//!
//! The snapshot is a full-file replace: the document is written to a
//! temporary file beside the destination and renamed into place, so a failed
//! run never disturbs a previously written snapshot.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::sdn::AddressRecord;
use crate::TARGET_SNAPSHOT;

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMetadata {
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub source: String,
    #[serde(rename = "totalAddresses")]
    pub total_addresses: usize,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub metadata: SnapshotMetadata,
    pub addresses: BTreeMap<String, AddressRecord>,
}

impl Snapshot {
    pub fn new(source: &str, url: &str, addresses: BTreeMap<String, AddressRecord>) -> Self {
        let metadata = SnapshotMetadata {
            last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            source: source.to_string(),
            total_addresses: addresses.len(),
            url: url.to_string(),
        };

        Snapshot {
            metadata,
            addresses,
        }
    }
}

/// Write the snapshot to `path`, replacing any previous file only on success
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json.as_bytes())
        .with_context(|| format!("Failed to write temporary snapshot {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move snapshot into place at {}", path.display()))?;

    info!(
        target: TARGET_SNAPSHOT,
        "Wrote {} addresses to {}",
        snapshot.metadata.total_addresses,
        path.display()
    );
    Ok(())
}
