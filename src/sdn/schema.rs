//! Source schema profiles.
//!
//! The sanctions list is published in two XML layouts: a "basic" schema with
//! flat per-entity identifier lists, and an "advanced" schema with nested
//! party/identifier structures under different element names. A profile maps
//! each canonical field to its source-specific element name so one extraction
//! walker covers both layouts. Elements are matched by local name, so
//! namespace prefixes in either layout do not matter.

/// Mapping from canonical field names to source-specific element names
#[derive(Debug, Clone)]
pub struct SchemaProfile {
    pub label: &'static str,
    pub default_url: &'static str,
    /// Element holding the entity list; its absence is fatal for the run
    pub entry_container: &'static str,
    pub entry: &'static str,
    pub uid: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub aka_list: &'static str,
    pub aka: &'static str,
    pub program: &'static str,
    pub remarks: &'static str,
    pub id_list: &'static str,
    pub id: &'static str,
    pub id_type: &'static str,
    /// Primary field carrying the identifier value
    pub id_number: &'static str,
    /// Companion free-text field, consulted when the primary field is empty
    pub id_text: &'static str,
    pub publish_date: &'static str,
}

/// The flat legacy layout
pub const BASIC_PROFILE: SchemaProfile = SchemaProfile {
    label: "OFAC SDN (basic)",
    default_url: "https://www.treasury.gov/ofac/downloads/sdn.xml",
    entry_container: "sdnList",
    entry: "sdnEntry",
    uid: "uid",
    first_name: "firstName",
    last_name: "lastName",
    aka_list: "akaList",
    aka: "aka",
    program: "program",
    remarks: "remarks",
    id_list: "idList",
    id: "id",
    id_type: "idType",
    id_number: "idNumber",
    id_text: "idComment",
    publish_date: "Publish_Date",
};

/// The nested party-oriented layout
pub const ADVANCED_PROFILE: SchemaProfile = SchemaProfile {
    label: "OFAC SDN (advanced)",
    default_url: "https://www.treasury.gov/ofac/downloads/sanctions/1.0/sdn_advanced.xml",
    entry_container: "DistinctParties",
    entry: "DistinctParty",
    uid: "FixedRef",
    first_name: "FirstName",
    last_name: "LastName",
    aka_list: "AliasList",
    aka: "Alias",
    program: "SanctionsProgram",
    remarks: "Comment",
    id_list: "IDRegDocuments",
    id: "IDRegDocument",
    id_type: "IDType",
    id_number: "IDNumber",
    id_text: "IDText",
    publish_date: "DatePublished",
};
