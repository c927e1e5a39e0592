//! SDN list processing module for sdnwatch.
//!
//! This module handles parsing of the sanctions document and extraction of
//! normalized cryptocurrency address records from it.

mod extract;
mod parser;
mod schema;
mod types;

// Re-export types for the rest of the crate
pub use self::types::*;

// Re-export specific functions for lib.rs to use
pub use self::extract::extract_addresses;
pub use self::parser::{parse_document, ParsedDocument};
pub use self::schema::{SchemaProfile, ADVANCED_PROFILE, BASIC_PROFILE};
