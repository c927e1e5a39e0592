//! Utility functions for response decoding and document cleanup.

use flate2;
use std::io::Read;
use tracing::debug;
use url;

use crate::TARGET_WEB_REQUEST;

/// Helper function to validate a URL
pub fn is_valid_url(url: &str) -> bool {
    if let Ok(parsed) = url::Url::parse(url) {
        parsed.scheme() == "http" || parsed.scheme() == "https"
    } else {
        false
    }
}

/// Try various decompression methods for a byte array
pub fn try_decompressions(bytes: &[u8], url: &str) -> Vec<u8> {
    // First try gzip
    let mut decoder = flate2::read::GzDecoder::new(bytes);
    let mut decoded = Vec::new();
    if decoder.read_to_end(&mut decoded).is_ok() && !decoded.is_empty() {
        debug!(target: TARGET_WEB_REQUEST, "Successfully decompressed with gzip from {}", url);
        return decoded;
    }

    // Try zlib
    let mut decoder = flate2::read::ZlibDecoder::new(bytes);
    let mut decoded = Vec::new();
    if decoder.read_to_end(&mut decoded).is_ok() && !decoded.is_empty() {
        debug!(target: TARGET_WEB_REQUEST, "Successfully decompressed with zlib from {}", url);
        return decoded;
    }

    // Try deflate
    let mut decoder = flate2::read::DeflateDecoder::new(bytes);
    let mut decoded = Vec::new();
    if decoder.read_to_end(&mut decoded).is_ok() && !decoded.is_empty() {
        debug!(target: TARGET_WEB_REQUEST, "Successfully decompressed with deflate from {}", url);
        return decoded;
    }

    // If no decompression worked, use original bytes
    debug!(target: TARGET_WEB_REQUEST, "No decompression method worked for {}, using original bytes", url);
    bytes.to_vec()
}

/// Decode response bytes to text, honoring the Content-Type charset when present
pub fn decode_text(bytes: &[u8], content_type: Option<&str>) -> String {
    let charset = content_type
        .and_then(|ct| {
            ct.split(';')
                .find_map(|part| part.trim().strip_prefix("charset="))
        })
        .map(|cs| cs.trim_matches('"').to_string());

    let encoding = charset
        .as_deref()
        .and_then(|cs| encoding_rs::Encoding::for_label(cs.as_bytes()))
        .unwrap_or(encoding_rs::UTF_8);

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!(
            target: TARGET_WEB_REQUEST,
            "Replacement characters introduced while decoding as {}",
            encoding.name()
        );
    }

    text.into_owned()
}

/// Clean up malformed XML
pub fn cleanup_xml(xml: &str) -> String {
    let mut cleaned = xml.trim().to_string();

    // Remove any UTF-8 BOM if present
    if let Some(stripped) = cleaned.strip_prefix('\u{FEFF}') {
        cleaned = stripped.to_string();
    }

    // Remove any leading junk before the XML declaration or the first tag
    if let Some(xml_start) = cleaned.find("<?xml") {
        cleaned = cleaned[xml_start..].to_string();
    } else if let Some(tag_start) = cleaned.find('<') {
        cleaned = cleaned[tag_start..].to_string();
    }

    // Remove any invalid XML characters
    cleaned = cleaned
        .chars()
        .filter(|&c| {
            matches!(c,
                '\u{0009}' | // tab
                '\u{000A}' | // newline
                '\u{000D}' | // carriage return
                '\u{0020}'..='\u{D7FF}' |
                '\u{E000}'..='\u{FFFD}' |
                '\u{10000}'..='\u{10FFFF}'
            )
        })
        .collect();

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://www.treasury.gov/ofac/downloads/sdn.xml"));
        assert!(is_valid_url("http://localhost:8080/sdn.xml"));
        assert!(!is_valid_url("ftp://example.com/sdn.xml"));
        assert!(!is_valid_url("not a url"));
    }

    #[test]
    fn test_cleanup_xml_strips_bom_and_leading_junk() {
        let dirty = "\u{FEFF}\n  garbage<?xml version=\"1.0\"?><sdnList/>";
        let cleaned = cleanup_xml(dirty);
        assert!(cleaned.starts_with("<?xml"));
        assert!(cleaned.ends_with("<sdnList/>"));
    }

    #[test]
    fn test_decode_text_falls_back_to_utf8() {
        let text = decode_text("<sdnList/>".as_bytes(), Some("text/xml"));
        assert_eq!(text, "<sdnList/>");

        let latin1 = decode_text(&[0xE9u8], Some("text/xml; charset=iso-8859-1"));
        assert_eq!(latin1, "é");
    }
}
