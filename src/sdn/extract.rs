//! Address extraction and normalization.
//!
//! Walks each parsed entity's identifier list, keeps the identifiers that
//! denote a cryptocurrency wallet address, and folds them into a mapping from
//! normalized address to [`AddressRecord`].

use anyhow::Result;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

use super::parser::parse_document;
use super::schema::SchemaProfile;
use super::types::{
    AddressRecord, Diagnostic, EntryDetail, ExtractionCounters, ExtractionOutcome, SanctionEntry,
    CRYPTO_TYPE_MARKER, DATE_NOT_SPECIFIED, DEFAULT_REASON, MIN_ADDRESS_LEN,
    PROGRAM_NOT_SPECIFIED, UNKNOWN_ENTITY,
};
use crate::TARGET_EXTRACT;

/// Run the full extraction pipeline over one document.
///
/// Recovered failures (malformed entities, empty or implausibly short
/// identifier values) are absorbed into the returned diagnostics; only a
/// structurally invalid document escapes as an error.
pub fn extract_addresses(text: &str, profile: &SchemaProfile) -> Result<ExtractionOutcome> {
    let parsed = parse_document(text, profile)?;

    let mut counters = ExtractionCounters {
        entities_processed: parsed.entries_seen,
        entities_skipped: parsed.entries_seen - parsed.entries.len(),
        ..Default::default()
    };
    let mut diagnostics = parsed.diagnostics;
    let mut addresses: BTreeMap<String, AddressRecord> = BTreeMap::new();

    for (index, entry) in parsed.entries.iter().enumerate() {
        let entity = display_name(entry);
        let program = join_programs(&entry.programs);
        let date = entry
            .published_date
            .clone()
            .or_else(|| parsed.publish_date.clone())
            .unwrap_or_else(|| DATE_NOT_SPECIFIED.to_string());
        let reason = entry
            .remarks
            .clone()
            .unwrap_or_else(|| DEFAULT_REASON.to_string());

        for identifier in &entry.identifiers {
            if !is_crypto_type(&identifier.type_label) {
                continue;
            }
            counters.candidates_seen += 1;

            let raw = match identifier.value.as_deref() {
                Some(value) => value,
                None => {
                    diagnostics.push(Diagnostic {
                        entity_index: index,
                        entity_uid: entry.uid.clone(),
                        message: format!(
                            "candidate identifier '{}' has no value",
                            identifier.type_label
                        ),
                    });
                    continue;
                }
            };

            let normalized = normalize_address(raw);
            if normalized.len() < MIN_ADDRESS_LEN {
                debug!(
                    target: TARGET_EXTRACT,
                    "Rejecting implausibly short value '{}' on entity {:?}",
                    normalized,
                    entry.uid
                );
                diagnostics.push(Diagnostic {
                    entity_index: index,
                    entity_uid: entry.uid.clone(),
                    message: format!(
                        "identifier value '{}' is below the minimum plausible length",
                        normalized
                    ),
                });
                continue;
            }

            counters.addresses_accepted += 1;

            let detail = EntryDetail {
                entity: entity.clone(),
                program: program.clone(),
                uid: entry.uid.clone(),
                aliases: entry.aka.clone(),
            };

            // Accumulate policy: every contributing entity is preserved in
            // document order; the flat fields stay those of the first.
            match addresses.entry(normalized) {
                Entry::Vacant(slot) => {
                    slot.insert(AddressRecord {
                        entity: entity.clone(),
                        program: program.clone(),
                        date: date.clone(),
                        reason: reason.clone(),
                        id_type: identifier.type_label.clone(),
                        entries: vec![detail],
                    });
                }
                Entry::Occupied(mut slot) => {
                    slot.get_mut().entries.push(detail);
                }
            }
        }
    }

    counters.unique_addresses = addresses.len();

    Ok(ExtractionOutcome {
        addresses,
        publish_date: parsed.publish_date,
        counters,
        diagnostics,
    })
}

/// Build the display name for an entity: last name, else first name, else a
/// fixed placeholder; both present join as "first last" with single spaces.
pub fn display_name(entry: &SanctionEntry) -> String {
    match (entry.first_name.as_deref(), entry.last_name.as_deref()) {
        (Some(first), Some(last)) => format!("{} {}", first, last)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
        (Some(first), None) => first.trim().to_string(),
        (None, Some(last)) => last.trim().to_string(),
        (None, None) => UNKNOWN_ENTITY.to_string(),
    }
}

/// Whether an identifier type label denotes a cryptocurrency wallet address
pub fn is_crypto_type(type_label: &str) -> bool {
    type_label.to_lowercase().contains(CRYPTO_TYPE_MARKER)
}

/// Lower-case and trim a raw identifier value into its lookup key
pub fn normalize_address(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Comma-join program labels, falling back to a fixed placeholder
pub fn join_programs(programs: &[String]) -> String {
    if programs.is_empty() {
        PROGRAM_NOT_SPECIFIED.to_string()
    } else {
        programs.join(", ")
    }
}
