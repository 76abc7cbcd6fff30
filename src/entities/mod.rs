//! Catalog record type definitions
//!
//! KBT works with the following record types:
//!
//! **Catalog:**
//! - [`GasEngine`] - Gas engines with shaft and output specifications
//! - [`ElectricMotor`] - Electric motors with voltage and power ratings
//! - [`Part`] - Individual parts keyed by category with a specification map
//!
//! **Builds:**
//! - [`Build`] - A saved build file referencing one power source and parts
//! - [`Selection`] - The in-memory unit the compatibility and performance
//!   engines operate on, resolved from a build against the catalog

pub mod build;
pub mod engine;
pub mod motor;
pub mod part;
pub mod power_source;
pub mod selection;

pub use build::Build;
pub use engine::GasEngine;
pub use motor::ElectricMotor;
pub use part::{Part, PartCategory, SpecValue};
pub use power_source::PowerSource;
pub use selection::Selection;
