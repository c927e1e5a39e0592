//! Type definitions for the extraction pipeline.

use serde::Serialize;
use std::collections::BTreeMap;

/// Normalized values shorter than this are treated as parser artifacts, not
/// real wallet addresses, and rejected.
pub const MIN_ADDRESS_LEN: usize = 10;

/// An identifier type label denotes a wallet address iff it contains this
/// substring, case-insensitively. Strict match only; looser keyword sets
/// ("crypto", "wallet") pull in unrelated identifier types.
pub const CRYPTO_TYPE_MARKER: &str = "digital currency";

pub const UNKNOWN_ENTITY: &str = "Unknown Entity";
pub const PROGRAM_NOT_SPECIFIED: &str = "Not specified";
pub const DATE_NOT_SPECIFIED: &str = "Date not specified";
pub const DEFAULT_REASON: &str = "Listed on the OFAC SDN sanctions list";

/// A typed identifier attached to a sanctioned entity (passport number, tax
/// ID, wallet address, etc.)
#[derive(Debug, Clone)]
pub struct Identifier {
    pub type_label: String,
    pub value: Option<String>,
}

/// One designated entity record as parsed from the source document
#[derive(Debug, Clone)]
pub struct SanctionEntry {
    pub uid: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub aka: Vec<String>,
    pub identifiers: Vec<Identifier>,
    pub programs: Vec<String>,
    pub remarks: Option<String>,
    pub published_date: Option<String>,
}

/// Per-entity detail preserved when several entities share one address
#[derive(Debug, Clone, Serialize)]
pub struct EntryDetail {
    pub entity: String,
    pub program: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// The output record for one normalized wallet address.
///
/// The flat fields always describe the first entity that contributed the
/// address; `entries` serializes only when more than one entity did.
#[derive(Debug, Clone, Serialize)]
pub struct AddressRecord {
    pub entity: String,
    pub program: String,
    pub date: String,
    pub reason: String,
    #[serde(rename = "type")]
    pub id_type: String,
    #[serde(skip_serializing_if = "single_contributor")]
    pub entries: Vec<EntryDetail>,
}

fn single_contributor(entries: &[EntryDetail]) -> bool {
    entries.len() < 2
}

/// Run-level counters, the only verifiable signal that extraction behaved
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionCounters {
    pub entities_processed: usize,
    pub entities_skipped: usize,
    pub candidates_seen: usize,
    pub addresses_accepted: usize,
    pub unique_addresses: usize,
}

/// A recovered extraction failure, recorded with enough context to diagnose
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub entity_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_uid: Option<String>,
    pub message: String,
}

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub addresses: BTreeMap<String, AddressRecord>,
    pub publish_date: Option<String>,
    pub counters: ExtractionCounters,
    pub diagnostics: Vec<Diagnostic>,
}
