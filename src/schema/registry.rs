//! Embedded JSON Schemas for catalog record files

use rust_embed::RustEmbed;

use crate::core::identity::EntityPrefix;

#[derive(RustEmbed)]
#[folder = "src/schema/schemas/"]
struct EmbeddedSchemas;

/// Registry of the built-in record schemas
#[derive(Debug, Default)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Get the JSON Schema source for a record type
    pub fn get(&self, prefix: EntityPrefix) -> Option<String> {
        let filename = match prefix {
            EntityPrefix::Eng => "eng.schema.json",
            EntityPrefix::Mtr => "mtr.schema.json",
            EntityPrefix::Part => "part.schema.json",
            EntityPrefix::Bld => "bld.schema.json",
        };

        EmbeddedSchemas::get(filename)
            .and_then(|file| String::from_utf8(file.data.into_owned()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_prefixes_have_schemas() {
        let registry = SchemaRegistry;
        for prefix in EntityPrefix::all() {
            let schema = registry.get(*prefix);
            assert!(schema.is_some(), "missing schema for {}", prefix);
            // Every schema must be valid JSON
            let parsed: serde_json::Value =
                serde_json::from_str(&schema.unwrap()).unwrap();
            assert!(parsed.get("properties").is_some());
        }
    }
}
