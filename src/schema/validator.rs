//! Schema validation for catalog and build files

use jsonschema::{validator_for, Validator as JsonValidator};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::identity::EntityPrefix;
use crate::schema::registry::SchemaRegistry;

/// A single validation issue within a file
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// JSON pointer to the offending value ("" for the document root)
    pub path: String,

    /// Human-readable description of the violation
    pub message: String,
}

/// Result of validating one file
#[derive(Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn success() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    fn failure(issues: Vec<ValidationIssue>) -> Self {
        Self {
            valid: false,
            issues,
        }
    }
}

/// Errors raised while preparing or running validation
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("no schema registered for record type {0}")]
    MissingSchema(EntityPrefix),

    #[error("file is not valid YAML: {0}")]
    InvalidYaml(String),
}

/// Schema validator with compiled schemas for every record type
pub struct Validator {
    compiled: HashMap<EntityPrefix, JsonValidator>,
}

impl Validator {
    /// Compile every schema in the registry.
    ///
    /// Schemas are embedded in the binary, so a schema that fails to
    /// compile is a build defect; it is simply absent here and reported
    /// per-file as [`ValidatorError::MissingSchema`].
    pub fn new(registry: &SchemaRegistry) -> Self {
        let mut compiled = HashMap::new();

        for prefix in EntityPrefix::all() {
            if let Some(schema_str) = registry.get(*prefix) {
                if let Ok(schema_json) = serde_json::from_str::<JsonValue>(&schema_str) {
                    if let Ok(compiled_schema) = validator_for(&schema_json) {
                        compiled.insert(*prefix, compiled_schema);
                    }
                }
            }
        }

        Self { compiled }
    }

    /// Validate YAML content against the schema for a record type
    pub fn validate(
        &self,
        prefix: EntityPrefix,
        content: &str,
    ) -> Result<ValidationResult, ValidatorError> {
        let schema = self
            .compiled
            .get(&prefix)
            .ok_or(ValidatorError::MissingSchema(prefix))?;

        let value: JsonValue = serde_yml::from_str(content)
            .map_err(|e| ValidatorError::InvalidYaml(e.to_string()))?;

        let issues: Vec<ValidationIssue> = schema
            .iter_errors(&value)
            .map(|error| ValidationIssue {
                path: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();

        if issues.is_empty() {
            Ok(ValidationResult::success())
        } else {
            Ok(ValidationResult::failure(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::engine::GasEngine;
    use crate::entities::part::{Part, PartCategory};

    fn validator() -> Validator {
        Validator::new(&SchemaRegistry)
    }

    #[test]
    fn test_valid_engine_passes() {
        let engine = GasEngine::new("Predator 212", "predator-212", 212.0, 6.5, 0.75);
        let yaml = serde_yml::to_string(&engine).unwrap();

        let result = validator().validate(EntityPrefix::Eng, &yaml).unwrap();
        assert!(result.valid, "issues: {:?}", result.issues);
    }

    #[test]
    fn test_valid_part_passes() {
        let part = Part::new("60T Sprocket", "60t-sprocket", PartCategory::Sprocket);
        let yaml = serde_yml::to_string(&part).unwrap();

        let result = validator().validate(EntityPrefix::Part, &yaml).unwrap();
        assert!(result.valid, "issues: {:?}", result.issues);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let yaml = "slug: incomplete\nname: Incomplete Engine\n";
        let result = validator().validate(EntityPrefix::Eng, yaml).unwrap();

        assert!(!result.valid);
        assert!(!result.issues.is_empty());
    }

    #[test]
    fn test_unknown_category_fails() {
        let part = Part::new("Widget", "widget", PartCategory::Other);
        let mut value: serde_json::Value =
            serde_yml::from_str(&serde_yml::to_string(&part).unwrap()).unwrap();
        value["category"] = serde_json::Value::String("flux_capacitor".to_string());
        let yaml = serde_yml::to_string(&value).unwrap();

        let result = validator().validate(EntityPrefix::Part, &yaml).unwrap();
        assert!(!result.valid);
        assert!(result.issues.iter().any(|i| i.path.contains("category")));
    }

    #[test]
    fn test_unparsable_yaml_is_reported() {
        let err = validator().validate(EntityPrefix::Part, ": : :").unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidYaml(_)));
    }
}
