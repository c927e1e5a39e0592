//! XML parsing for SDN-style sanctions documents.

use anyhow::{anyhow, Result};
use roxmltree::{Document, Node};
use tracing::debug;

use super::schema::SchemaProfile;
use super::types::{Diagnostic, Identifier, SanctionEntry};
use crate::TARGET_EXTRACT;

/// The entity sequence parsed from one document, plus parse-level diagnostics
#[derive(Debug)]
pub struct ParsedDocument {
    pub entries: Vec<SanctionEntry>,
    pub publish_date: Option<String>,
    /// Count of entity elements seen, including ones that failed to parse
    pub entries_seen: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse the sanctions document into a sequence of entity records.
///
/// A document without the entity-list container is fatal. A malformed
/// individual entity is skipped with a diagnostic; parsing continues with the
/// next entity.
pub fn parse_document(text: &str, profile: &SchemaProfile) -> Result<ParsedDocument> {
    let doc = Document::parse(text)
        .map_err(|err| anyhow!("Unparseable sanctions document: {}", err))?;

    let container = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == profile.entry_container)
        .ok_or_else(|| {
            anyhow!(
                "Document has no <{}> entity list, refusing to continue",
                profile.entry_container
            )
        })?;

    let publish_date = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == profile.publish_date)
        .and_then(element_text);

    let mut parsed = ParsedDocument {
        entries: Vec::new(),
        publish_date,
        entries_seen: 0,
        diagnostics: Vec::new(),
    };

    for node in container
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == profile.entry)
    {
        let index = parsed.entries_seen;
        parsed.entries_seen += 1;

        match parse_entry(node, profile) {
            Ok(entry) => parsed.entries.push(entry),
            Err(err) => {
                debug!(target: TARGET_EXTRACT, "Skipping entity at index {}: {}", index, err);
                parsed.diagnostics.push(Diagnostic {
                    entity_index: index,
                    entity_uid: child_text(node, profile.uid),
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(parsed)
}

fn parse_entry(node: Node, profile: &SchemaProfile) -> Result<SanctionEntry> {
    if !node.children().any(|c| c.is_element()) {
        return Err(anyhow!("entity element has no child elements"));
    }

    let identifiers = node
        .descendants()
        .filter(|n| {
            n.is_element()
                && n.tag_name().name() == profile.id
                && has_ancestor(*n, node, profile.id_list)
        })
        .map(|id_node| Identifier {
            type_label: child_text(id_node, profile.id_type).unwrap_or_default(),
            value: child_text(id_node, profile.id_number)
                .or_else(|| child_text(id_node, profile.id_text)),
        })
        .collect();

    let aka = node
        .descendants()
        .filter(|n| {
            n.is_element()
                && n.tag_name().name() == profile.aka
                && has_ancestor(*n, node, profile.aka_list)
        })
        .filter_map(|aka_node| alias_name(aka_node, profile))
        .collect();

    // Program elements appear both as a list under a wrapper and as a bare
    // scalar child; collecting every occurrence covers both shapes.
    let programs = node
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == profile.program)
        .filter_map(element_text)
        .collect();

    Ok(SanctionEntry {
        uid: entity_field(node, profile, profile.uid),
        first_name: entity_field(node, profile, profile.first_name),
        last_name: entity_field(node, profile, profile.last_name),
        aka,
        identifiers,
        programs,
        remarks: entity_field(node, profile, profile.remarks),
        published_date: entity_field(node, profile, profile.publish_date),
    })
}

/// Look up an entity-level scalar field: direct children first, then nested
/// descendants, skipping the identifier and alias subtrees whose inner
/// elements reuse the same names.
fn entity_field(node: Node, profile: &SchemaProfile, name: &str) -> Option<String> {
    if let Some(text) = child_text(node, name) {
        return Some(text);
    }

    node.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == name)
        .find(|n| {
            !has_ancestor(*n, node, profile.id_list) && !has_ancestor(*n, node, profile.aka_list)
        })
        .and_then(element_text)
}

/// Whether `node` has an ancestor named `name` below `stop` (exclusive)
fn has_ancestor(node: Node, stop: Node, name: &str) -> bool {
    node.ancestors()
        .skip(1)
        .take_while(|a| a.id() != stop.id())
        .any(|a| a.is_element() && a.tag_name().name() == name)
}

fn alias_name(node: Node, profile: &SchemaProfile) -> Option<String> {
    let first = child_text(node, profile.first_name);
    let last = child_text(node, profile.last_name);

    match (first, last) {
        (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
        (Some(first), None) => Some(first),
        (None, Some(last)) => Some(last),
        // Alias rendered as plain text rather than name parts
        (None, None) => element_text(node),
    }
}

fn child_text(node: Node, name: &str) -> Option<String> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
        .and_then(element_text)
}

fn element_text(node: Node) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdn::schema::{ADVANCED_PROFILE, BASIC_PROFILE};

    #[test]
    fn test_parse_basic_entry() {
        let xml = r#"<sdnList>
            <publshInformation><Publish_Date>03/08/2022</Publish_Date></publshInformation>
            <sdnEntry>
                <uid>36</uid>
                <lastName>LAZARUS GROUP</lastName>
                <remarks>a.k.a. HIDDEN COBRA.</remarks>
                <programList><program>DPRK3</program></programList>
                <akaList><aka><lastName>APT-C-26</lastName></aka></akaList>
                <idList>
                    <id><uid>1</uid><idType>Digital Currency Address - XBT</idType><idNumber>1A2b3C4d5E6f7G8h9I0j</idNumber></id>
                    <id><uid>2</uid><idType>Passport</idType><idNumber>123456789</idNumber></id>
                </idList>
            </sdnEntry>
        </sdnList>"#;

        let parsed = parse_document(xml, &BASIC_PROFILE).unwrap();
        assert_eq!(parsed.entries_seen, 1);
        assert_eq!(parsed.publish_date.as_deref(), Some("03/08/2022"));
        assert!(parsed.diagnostics.is_empty());

        let entry = &parsed.entries[0];
        assert_eq!(entry.uid.as_deref(), Some("36"));
        assert_eq!(entry.last_name.as_deref(), Some("LAZARUS GROUP"));
        assert_eq!(entry.first_name, None);
        assert_eq!(entry.aka, vec!["APT-C-26"]);
        assert_eq!(entry.programs, vec!["DPRK3"]);
        assert_eq!(entry.identifiers.len(), 2);
        assert_eq!(
            entry.identifiers[0].type_label,
            "Digital Currency Address - XBT"
        );
        assert_eq!(
            entry.identifiers[0].value.as_deref(),
            Some("1A2b3C4d5E6f7G8h9I0j")
        );
    }

    #[test]
    fn test_parse_advanced_entry_with_nested_names() {
        let xml = r#"<Sanctions>
            <DateOfPublication><DatePublished>2022-03-08</DatePublished></DateOfPublication>
            <DistinctParties>
                <DistinctParty>
                    <FixedRef>36</FixedRef>
                    <Profile><Identity><LastName>LAZARUS GROUP</LastName></Identity></Profile>
                    <SanctionsPrograms><SanctionsProgram>DPRK3</SanctionsProgram></SanctionsPrograms>
                    <IDRegDocuments>
                        <IDRegDocument>
                            <IDType>Digital Currency Address - ETH</IDType>
                            <IDNumber>0x098B716B8Aaf21512996dC57EB0615e2383E2f96</IDNumber>
                        </IDRegDocument>
                    </IDRegDocuments>
                </DistinctParty>
            </DistinctParties>
        </Sanctions>"#;

        let parsed = parse_document(xml, &ADVANCED_PROFILE).unwrap();
        assert_eq!(parsed.entries_seen, 1);
        assert_eq!(parsed.publish_date.as_deref(), Some("2022-03-08"));

        let entry = &parsed.entries[0];
        assert_eq!(entry.uid.as_deref(), Some("36"));
        // Name is nested under Profile/Identity; the walker still finds it
        assert_eq!(entry.last_name.as_deref(), Some("LAZARUS GROUP"));
        assert_eq!(entry.programs, vec!["DPRK3"]);
        assert_eq!(entry.identifiers.len(), 1);
    }

    #[test]
    fn test_identifier_value_falls_back_to_companion_field() {
        let xml = r#"<sdnList><sdnEntry>
            <uid>1</uid>
            <lastName>EXAMPLE</lastName>
            <idList><id>
                <idType>Digital Currency Address - XMR</idType>
                <idComment>4abcdef1234567890</idComment>
            </id></idList>
        </sdnEntry></sdnList>"#;

        let parsed = parse_document(xml, &BASIC_PROFILE).unwrap();
        let entry = &parsed.entries[0];
        assert_eq!(
            entry.identifiers[0].value.as_deref(),
            Some("4abcdef1234567890")
        );
    }

    #[test]
    fn test_entity_uid_not_taken_from_identifier_list() {
        // No entity-level uid; the uid inside idList must not leak out
        let xml = r#"<sdnList><sdnEntry>
            <lastName>EXAMPLE</lastName>
            <idList><id><uid>999</uid><idType>Passport</idType><idNumber>X123</idNumber></id></idList>
        </sdnEntry></sdnList>"#;

        let parsed = parse_document(xml, &BASIC_PROFILE).unwrap();
        assert_eq!(parsed.entries[0].uid, None);
    }

    #[test]
    fn test_missing_container_is_fatal() {
        let err = parse_document("<somethingElse/>", &BASIC_PROFILE).unwrap_err();
        assert!(err.to_string().contains("sdnList"));
    }

    #[test]
    fn test_unparseable_document_is_fatal() {
        assert!(parse_document("not xml at all", &BASIC_PROFILE).is_err());
    }

    #[test]
    fn test_malformed_entity_is_skipped_with_diagnostic() {
        let xml = r#"<sdnList>
            <sdnEntry>just text, no structure</sdnEntry>
            <sdnEntry><uid>2</uid><lastName>GOOD</lastName></sdnEntry>
        </sdnList>"#;

        let parsed = parse_document(xml, &BASIC_PROFILE).unwrap();
        assert_eq!(parsed.entries_seen, 2);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].entity_index, 0);
    }

    #[test]
    fn test_single_entity_document_parses_as_one_element_sequence() {
        let xml = r#"<sdnList><sdnEntry><uid>1</uid><lastName>ONLY</lastName></sdnEntry></sdnList>"#;
        let parsed = parse_document(xml, &BASIC_PROFILE).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert!(parsed.entries[0].identifiers.is_empty());
    }
}
