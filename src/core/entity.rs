//! Record trait - common interface for all catalog record types

use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::EntityId;

/// Common trait for all KBT catalog records
pub trait Record: Serialize + DeserializeOwned {
    /// The record type prefix (e.g., "ENG", "PART")
    const PREFIX: &'static str;

    /// Get the record's unique ID
    fn id(&self) -> &EntityId;

    /// Get the record's URL-safe slug
    fn slug(&self) -> &str;

    /// Get the record's display name
    fn name(&self) -> &str;
}

/// Resolve a reference (full ID or slug) against a list of records.
///
/// Build files reference catalog records by either form; ID match wins
/// over slug match so a slug can never shadow an explicit ID.
pub fn find_record<'a, T: Record>(records: &'a [T], reference: &str) -> Option<&'a T> {
    records
        .iter()
        .find(|r| r.id().to_string() == reference)
        .or_else(|| records.iter().find(|r| r.slug() == reference))
}
