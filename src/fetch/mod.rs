//! Source document fetching for sdnwatch.
//!
//! This module handles the HTTP retrieval, decompression, and decoding of the
//! sanctions list prior to extraction.

mod client;
mod fetcher;
mod types;
mod util;

// Re-export types for the rest of the crate
pub use self::types::*;

// Re-export specific functions for lib.rs to use
pub use self::fetcher::fetch_document;

// Re-export other modules
pub use self::client::*;
pub use self::util::*;
