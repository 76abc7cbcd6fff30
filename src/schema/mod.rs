//! Schema system - catalog file validation

pub mod registry;
pub mod validator;

pub use registry::SchemaRegistry;
pub use validator::{ValidationIssue, ValidationResult, Validator};
